//! Data-access layer over the remote store.
//!
//! Maps remote rows to catalog entities and back, and exposes
//! fetch/add/delete/reset/reorder per entity kind. Errors are logged here
//! and handed to the caller, who decides between falling back and
//! surfacing them.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::CatalogEntity;
use crate::api::{RemoteStore, StoreError};
use crate::models::{
    Destination, DestinationDraft, Hotel, HotelDraft, Package, PackageDraft,
};

/// All three kinds, fetched together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub packages: Vec<Package>,
    pub hotels: Vec<Hotel>,
    pub destinations: Vec<Destination>,
}

/// Catalog repository.
/// Clone is cheap - the store is shared behind an Arc.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn RemoteStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    fn map_row<E: CatalogEntity>(row: Value) -> Result<E, StoreError> {
        serde_json::from_value::<E::Row>(row)
            .map(E::from_row)
            .map_err(|e| {
                StoreError::InvalidResponse(format!(
                    "Failed to map {} row: {}",
                    E::KIND.table(),
                    e
                ))
            })
    }

    fn map_rows<E: CatalogEntity>(rows: Vec<Value>) -> Result<Vec<E>, StoreError> {
        rows.into_iter().map(Self::map_row::<E>).collect()
    }

    fn new_row<E: CatalogEntity>(draft: &E::Draft) -> Result<Value, StoreError> {
        serde_json::to_value(E::NewRow::from(draft)).map_err(|e| {
            StoreError::InvalidResponse(format!(
                "Failed to encode {} row: {}",
                E::KIND.table(),
                e
            ))
        })
    }

    /// All rows of a kind, ordered by sort order (missing last) then
    /// creation time.
    pub async fn fetch<E: CatalogEntity>(&self) -> Result<Vec<E>, StoreError> {
        let table = E::KIND.table();
        let rows = self.store.select_ordered(table).await.map_err(|e| {
            error!(table, error = %e, "Fetch failed");
            e
        })?;
        let items = Self::map_rows::<E>(rows)?;
        debug!(table, count = items.len(), "Catalog fetched");
        Ok(items)
    }

    /// Insert a new entity and return it with its store-assigned id.
    pub async fn add<E: CatalogEntity>(&self, draft: &E::Draft) -> Result<E, StoreError> {
        let table = E::KIND.table();
        let row = Self::new_row::<E>(draft)?;
        let mut created = self.store.insert(table, vec![row]).await.map_err(|e| {
            error!(table, error = %e, "Insert failed");
            e
        })?;

        if created.len() != 1 {
            return Err(StoreError::InvalidResponse(format!(
                "{}: insert returned {} rows, expected 1",
                table,
                created.len()
            )));
        }
        let entity = Self::map_row::<E>(created.remove(0))?;
        info!(table, id = entity.id(), "Entity added");
        Ok(entity)
    }

    /// Delete by id. Deleting an id that does not exist succeeds.
    pub async fn delete<E: CatalogEntity>(&self, id: &str) -> Result<(), StoreError> {
        let table = E::KIND.table();
        self.store.delete_by_id(table, id).await.map_err(|e| {
            error!(table, id, error = %e, "Delete failed");
            e
        })?;
        info!(table, id, "Entity deleted");
        Ok(())
    }

    /// Replace every row of a kind with the bundled defaults.
    ///
    /// Two round trips with no transaction: if the insert fails after the
    /// delete succeeded, the table is left empty and the error comes back
    /// as `StoreError::PartialReset`. Nothing is rolled back.
    pub async fn reset<E: CatalogEntity>(&self) -> Result<Vec<E>, StoreError> {
        let table = E::KIND.table();

        self.store.delete_all(table).await.map_err(|e| {
            error!(table, error = %e, "Reset: delete failed");
            e
        })?;

        let rows = E::defaults()
            .iter()
            .map(|entity| Self::new_row::<E>(&entity.to_draft()))
            .collect::<Result<Vec<_>, _>>()?;

        let inserted = match self.store.insert(table, rows).await {
            Ok(inserted) => inserted,
            Err(e) => {
                warn!(table, error = %e, "Reset: insert failed, table left empty");
                return Err(StoreError::PartialReset {
                    table,
                    source: Box::new(e),
                });
            }
        };

        let items = Self::map_rows::<E>(inserted).map_err(|e| {
            warn!(table, error = %e, "Reset: defaults written but returned rows unreadable");
            StoreError::ResetUnconfirmed {
                table,
                source: Box::new(e),
            }
        })?;
        info!(table, count = items.len(), "Catalog reset to defaults");
        Ok(items)
    }

    /// Update only the sort order of one entity and return the stored row.
    pub async fn update_order<E: CatalogEntity>(
        &self,
        id: &str,
        sort_order: i64,
    ) -> Result<E, StoreError> {
        let table = E::KIND.table();
        let row = self
            .store
            .update_sort_order(table, id, sort_order)
            .await
            .map_err(|e| {
                error!(table, id, sort_order, error = %e, "Sort order update failed");
                e
            })?;
        Self::map_row::<E>(row)
    }

    /// Fetch every kind concurrently. Fails if any fetch fails.
    pub async fn fetch_all(&self) -> Result<CatalogSnapshot, StoreError> {
        let (packages, hotels, destinations) = futures::try_join!(
            self.fetch::<Package>(),
            self.fetch::<Hotel>(),
            self.fetch::<Destination>(),
        )?;
        Ok(CatalogSnapshot {
            packages,
            hotels,
            destinations,
        })
    }

    // ===== Packages =====

    pub async fn fetch_packages(&self) -> Result<Vec<Package>, StoreError> {
        self.fetch().await
    }

    pub async fn add_package(&self, draft: &PackageDraft) -> Result<Package, StoreError> {
        self.add::<Package>(draft).await
    }

    pub async fn delete_package(&self, id: &str) -> Result<(), StoreError> {
        self.delete::<Package>(id).await
    }

    pub async fn reset_packages(&self) -> Result<Vec<Package>, StoreError> {
        self.reset().await
    }

    pub async fn update_package_order(&self, id: &str, sort_order: i64) -> Result<Package, StoreError> {
        self.update_order(id, sort_order).await
    }

    // ===== Hotels =====

    pub async fn fetch_hotels(&self) -> Result<Vec<Hotel>, StoreError> {
        self.fetch().await
    }

    pub async fn add_hotel(&self, draft: &HotelDraft) -> Result<Hotel, StoreError> {
        self.add::<Hotel>(draft).await
    }

    pub async fn delete_hotel(&self, id: &str) -> Result<(), StoreError> {
        self.delete::<Hotel>(id).await
    }

    pub async fn reset_hotels(&self) -> Result<Vec<Hotel>, StoreError> {
        self.reset().await
    }

    pub async fn update_hotel_order(&self, id: &str, sort_order: i64) -> Result<Hotel, StoreError> {
        self.update_order(id, sort_order).await
    }

    // ===== Destinations =====

    pub async fn fetch_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        self.fetch().await
    }

    pub async fn add_destination(&self, draft: &DestinationDraft) -> Result<Destination, StoreError> {
        self.add::<Destination>(draft).await
    }

    pub async fn delete_destination(&self, id: &str) -> Result<(), StoreError> {
        self.delete::<Destination>(id).await
    }

    pub async fn reset_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        self.reset().await
    }

    pub async fn update_destination_order(
        &self,
        id: &str,
        sort_order: i64,
    ) -> Result<Destination, StoreError> {
        self.update_order(id, sort_order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MemoryStore, StoreOp};
    use crate::catalog::EntityKind;

    fn catalog() -> (Arc<MemoryStore>, Catalog) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), Catalog::new(store))
    }

    /// Compare ignoring ids
    fn drafts<E: CatalogEntity>(items: &[E]) -> Vec<String> {
        items.iter().map(|e| format!("{:?}", e.to_draft())).collect()
    }

    async fn assert_reset_matches_defaults<E: CatalogEntity>(catalog: &Catalog) {
        let inserted = catalog.reset::<E>().await.unwrap();
        let fetched = catalog.fetch::<E>().await.unwrap();

        assert_eq!(drafts(&inserted), drafts(&E::defaults()));
        assert_eq!(drafts(&fetched), drafts(&E::defaults()));
        // Fresh ids, not the bundled ones
        assert!(fetched
            .iter()
            .zip(E::defaults())
            .all(|(f, d)| f.id() != d.id()));
    }

    #[tokio::test]
    async fn test_reset_then_fetch_yields_defaults_for_all_kinds() {
        let (_, catalog) = catalog();
        assert_reset_matches_defaults::<Package>(&catalog).await;
        assert_reset_matches_defaults::<Hotel>(&catalog).await;
        assert_reset_matches_defaults::<Destination>(&catalog).await;
    }

    #[tokio::test]
    async fn test_reset_replaces_existing_rows() {
        let (store, catalog) = catalog();
        catalog.reset_hotels().await.unwrap();
        let extra = Hotel::defaults()[0].to_draft();
        catalog.add_hotel(&extra).await.unwrap();
        assert_eq!(store.row_count("hotels"), 4);

        catalog.reset_hotels().await.unwrap();
        assert_eq!(store.row_count("hotels"), 3);
    }

    #[tokio::test]
    async fn test_add_returns_store_assigned_id() {
        let (_, catalog) = catalog();
        let draft = DestinationDraft {
            name: "קרבי".into(),
            description: "צוקי גיר".into(),
            image: String::new(),
            season: "כל השנה".into(),
            sort_order: Some(999),
        };
        let created = catalog.add_destination(&draft).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.to_draft(), draft);
        assert_eq!(catalog.fetch_destinations().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_fetch_all_fails_when_any_kind_fails() {
        let (store, catalog) = catalog();
        catalog.reset_hotels().await.unwrap();
        let snapshot = catalog.fetch_all().await.unwrap();
        assert_eq!(snapshot.hotels.len(), 3);
        assert!(snapshot.packages.is_empty());

        store.fail(StoreOp::Select);
        assert!(catalog.fetch_all().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_propagates_store_error() {
        let (store, catalog) = catalog();
        store.fail(StoreOp::Select);
        assert!(catalog.fetch_packages().await.is_err());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_succeeds() {
        let (_, catalog) = catalog();
        catalog.delete_package("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_order_unknown_id_fails() {
        let (_, catalog) = catalog();
        let err = catalog.update_package_order("missing", 1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_order_touches_only_sort_order() {
        let (_, catalog) = catalog();
        let packages = catalog.reset_packages().await.unwrap();
        let target = &packages[2];

        let updated = catalog.update_package_order(&target.id, 0).await.unwrap();
        assert_eq!(updated.sort_order, Some(0));
        assert_eq!(updated.title, target.title);

        let fetched = catalog.fetch_packages().await.unwrap();
        assert_eq!(fetched[0].id, target.id);
    }

    #[tokio::test]
    async fn test_reset_insert_failure_leaves_table_empty() {
        let (store, catalog) = catalog();
        catalog.reset_destinations().await.unwrap();
        store.fail(StoreOp::Insert);

        let err = catalog.reset_destinations().await.unwrap_err();
        assert!(err.left_table_empty());
        assert_eq!(store.row_count(EntityKind::Destination.table()), 0);
    }

    /// Writes through to memory but answers inserts with rows of the wrong shape
    struct UnreadableInserts(Arc<MemoryStore>);

    #[async_trait::async_trait]
    impl RemoteStore for UnreadableInserts {
        async fn select_ordered(&self, table: &str) -> Result<Vec<Value>, StoreError> {
            self.0.select_ordered(table).await
        }

        async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, StoreError> {
            let stored = self.0.insert(table, rows).await?;
            Ok(stored.iter().map(|_| serde_json::json!({ "unexpected": true })).collect())
        }

        async fn delete_by_id(&self, table: &str, id: &str) -> Result<(), StoreError> {
            self.0.delete_by_id(table, id).await
        }

        async fn delete_all(&self, table: &str) -> Result<(), StoreError> {
            self.0.delete_all(table).await
        }

        async fn update_sort_order(
            &self,
            table: &str,
            id: &str,
            sort_order: i64,
        ) -> Result<Value, StoreError> {
            self.0.update_sort_order(table, id, sort_order).await
        }
    }

    #[tokio::test]
    async fn test_reset_with_unreadable_response_reports_rows_written() {
        let memory = Arc::new(MemoryStore::new());
        let catalog = Catalog::new(Arc::new(UnreadableInserts(memory.clone())));

        let err = catalog.reset::<Hotel>().await.unwrap_err();
        assert!(err.rows_written());
        assert!(!err.left_table_empty());
        assert_eq!(
            memory.row_count(EntityKind::Hotel.table()),
            Hotel::defaults().len()
        );
    }

    #[tokio::test]
    async fn test_reset_delete_failure_keeps_rows() {
        let (store, catalog) = catalog();
        catalog.reset_hotels().await.unwrap();
        store.fail(StoreOp::DeleteAll);

        let err = catalog.reset_hotels().await.unwrap_err();
        assert!(!err.left_table_empty());
        assert_eq!(store.row_count("hotels"), 3);
    }
}
