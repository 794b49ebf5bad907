use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::defaults;
use crate::models::{
    Destination, DestinationDraft, DestinationRow, Hotel, HotelDraft, HotelRow,
    NewDestinationRow, NewHotelRow, NewPackageRow, Package, PackageDraft, PackageRow,
};

/// The three catalog record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Package,
    Hotel,
    Destination,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Package, EntityKind::Hotel, EntityKind::Destination];

    /// Remote table holding this kind
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Package => "packages",
            EntityKind::Hotel => "hotels",
            EntityKind::Destination => "destinations",
        }
    }

    /// Key of the on-device fallback snapshot
    pub fn cache_key(&self) -> &'static str {
        match self {
            EntityKind::Package => "afim-rahok-packages",
            EntityKind::Hotel => "afim-rahok-hotels",
            EntityKind::Destination => "afim-rahok-destinations",
        }
    }

    /// Plural display title
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Package => "חבילות",
            EntityKind::Hotel => "מלונות",
            EntityKind::Destination => "יעדים",
        }
    }
}

/// A catalog record type and its mapping to and from the remote table.
pub trait CatalogEntity:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Row shape as the store returns it
    type Row: DeserializeOwned;
    /// Fields submitted on create
    type Draft: Clone + Debug + Send + Sync + 'static;
    /// Insert payload in remote column names
    type NewRow: Serialize + for<'a> From<&'a Self::Draft>;

    const KIND: EntityKind;

    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn sort_order(&self) -> Option<i64>;
    fn set_sort_order(&mut self, sort_order: i64);
    fn from_row(row: Self::Row) -> Self;
    fn to_draft(&self) -> Self::Draft;

    /// Bundled default set, in display order
    fn defaults() -> Vec<Self>;
}

impl CatalogEntity for Package {
    type Row = PackageRow;
    type Draft = PackageDraft;
    type NewRow = NewPackageRow;

    const KIND: EntityKind = EntityKind::Package;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn sort_order(&self) -> Option<i64> {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i64) {
        self.sort_order = Some(sort_order);
    }

    fn from_row(row: PackageRow) -> Self {
        row.to_package()
    }

    fn to_draft(&self) -> PackageDraft {
        Package::to_draft(self)
    }

    fn defaults() -> Vec<Self> {
        defaults::packages()
    }
}

impl CatalogEntity for Hotel {
    type Row = HotelRow;
    type Draft = HotelDraft;
    type NewRow = NewHotelRow;

    const KIND: EntityKind = EntityKind::Hotel;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn sort_order(&self) -> Option<i64> {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i64) {
        self.sort_order = Some(sort_order);
    }

    fn from_row(row: HotelRow) -> Self {
        row.to_hotel()
    }

    fn to_draft(&self) -> HotelDraft {
        Hotel::to_draft(self)
    }

    fn defaults() -> Vec<Self> {
        defaults::hotels()
    }
}

impl CatalogEntity for Destination {
    type Row = DestinationRow;
    type Draft = DestinationDraft;
    type NewRow = NewDestinationRow;

    const KIND: EntityKind = EntityKind::Destination;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn sort_order(&self) -> Option<i64> {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i64) {
        self.sort_order = Some(sort_order);
    }

    fn from_row(row: DestinationRow) -> Self {
        row.to_destination()
    }

    fn to_draft(&self) -> DestinationDraft {
        Destination::to_draft(self)
    }

    fn defaults() -> Vec<Self> {
        defaults::destinations()
    }
}
