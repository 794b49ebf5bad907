use async_trait::async_trait;
use serde_json::Value;

use super::StoreError;

/// Column the catalog tables are primarily ordered by (nulls last)
pub const SORT_COLUMN: &str = "sort_order";

/// Secondary ordering column, creation time ascending
pub const CREATED_COLUMN: &str = "created_at";

/// Table-level operations the catalog needs from the hosted database.
///
/// Rows cross this boundary as JSON objects in the remote (snake_case)
/// shape; mapping to entities happens in the data-access layer. Every call
/// is a single round trip with no retry and no transaction.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All rows, ordered by `sort_order` ascending with nulls last, then
    /// `created_at` ascending.
    async fn select_ordered(&self, table: &str) -> Result<Vec<Value>, StoreError>;

    /// Insert rows (without id/created_at) and return them as stored.
    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, StoreError>;

    /// Delete one row. Matching nothing is not an error.
    async fn delete_by_id(&self, table: &str, id: &str) -> Result<(), StoreError>;

    /// Delete every row of the table.
    async fn delete_all(&self, table: &str) -> Result<(), StoreError>;

    /// Set `sort_order` on one row and return the updated row. Fails with
    /// `StoreError::NotFound` when no row has that id.
    async fn update_sort_order(
        &self,
        table: &str,
        id: &str,
        sort_order: i64,
    ) -> Result<Value, StoreError>;
}
