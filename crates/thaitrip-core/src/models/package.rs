use serde::{Deserialize, Serialize};
use tracing::warn;

/// Audience category a package is built for.
///
/// Serialized with the Hebrew labels the store's `type` column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum TripType {
    #[default]
    #[serde(rename = "זוגות")]
    Couples,
    #[serde(rename = "משפחות")]
    Families,
    #[serde(rename = "צעירים")]
    Young,
}

impl TripType {
    pub const ALL: [TripType; 3] = [TripType::Couples, TripType::Families, TripType::Young];

    pub fn label(&self) -> &'static str {
        match self {
            TripType::Couples => "זוגות",
            TripType::Families => "משפחות",
            TripType::Young => "צעירים",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label.trim())
    }

    /// Next category, wrapping around (used by form selectors)
    pub fn next(&self) -> Self {
        match self {
            TripType::Couples => TripType::Families,
            TripType::Families => TripType::Young,
            TripType::Young => TripType::Couples,
        }
    }
}

/// Display filter for the packages view. `All` is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripFilter {
    #[default]
    All,
    Only(TripType),
}

impl TripFilter {
    pub const ALL: [TripFilter; 4] = [
        TripFilter::All,
        TripFilter::Only(TripType::Couples),
        TripFilter::Only(TripType::Families),
        TripFilter::Only(TripType::Young),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TripFilter::All => "הכל",
            TripFilter::Only(t) => t.label(),
        }
    }

    pub fn matches(&self, package: &Package) -> bool {
        match self {
            TripFilter::All => true,
            TripFilter::Only(t) => package.trip_type == *t,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            TripFilter::All => TripFilter::Only(TripType::Couples),
            TripFilter::Only(TripType::Couples) => TripFilter::Only(TripType::Families),
            TripFilter::Only(TripType::Families) => TripFilter::Only(TripType::Young),
            TripFilter::Only(TripType::Young) => TripFilter::All,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            TripFilter::All => TripFilter::Only(TripType::Young),
            TripFilter::Only(TripType::Couples) => TripFilter::All,
            TripFilter::Only(TripType::Families) => TripFilter::Only(TripType::Couples),
            TripFilter::Only(TripType::Young) => TripFilter::Only(TripType::Families),
        }
    }
}

/// A trip package as shown in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Starting price per person, in USD
    pub price_start: f64,
    pub duration: String,
    #[serde(rename = "type")]
    pub trip_type: TripType,
    pub image: String,
    pub highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

/// Package fields submitted on create; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDraft {
    pub title: String,
    pub description: String,
    pub price_start: f64,
    pub duration: String,
    pub trip_type: TripType,
    pub image: String,
    pub highlights: Vec<String>,
    pub sort_order: Option<i64>,
}

/// Row shape of the `packages` table. Every column but `id` may be null.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageRow {
    #[serde(deserialize_with = "super::id_as_string")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_number")]
    pub price_start: Option<f64>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, rename = "type")]
    pub trip_type: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Insert payload for the `packages` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewPackageRow {
    pub title: String,
    pub description: String,
    pub price_start: f64,
    pub duration: String,
    #[serde(rename = "type")]
    pub trip_type: TripType,
    pub image: String,
    pub highlights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

impl PackageRow {
    pub fn to_package(self) -> Package {
        let trip_type = match self.trip_type.as_deref() {
            Some(label) => TripType::from_label(label).unwrap_or_else(|| {
                warn!(id = %self.id, label, "Unknown package type, showing as couples");
                TripType::default()
            }),
            None => TripType::default(),
        };

        Package {
            id: self.id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price_start: self.price_start.unwrap_or(0.0),
            duration: self.duration.unwrap_or_default(),
            trip_type,
            image: self.image.unwrap_or_default(),
            highlights: self.highlights.unwrap_or_default(),
            sort_order: self.sort_order,
        }
    }
}

impl From<&PackageDraft> for NewPackageRow {
    fn from(draft: &PackageDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            price_start: draft.price_start,
            duration: draft.duration.clone(),
            trip_type: draft.trip_type,
            image: draft.image.clone(),
            highlights: draft.highlights.clone(),
            sort_order: draft.sort_order,
        }
    }
}

impl Package {
    /// Strip the id, e.g. to re-insert bundled defaults
    pub fn to_draft(&self) -> PackageDraft {
        PackageDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            price_start: self.price_start,
            duration: self.duration.clone(),
            trip_type: self.trip_type,
            image: self.image.clone(),
            highlights: self.highlights.clone(),
            sort_order: self.sort_order,
        }
    }
}
