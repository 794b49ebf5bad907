//! In-process store with the same contract as the hosted database.
//!
//! Backs the local demo mode (no store credentials configured) and the test
//! suite. Rows are kept in insertion order, which doubles as `created_at`
//! order for the fetch tie-break.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::debug;

use super::store::{RemoteStore, CREATED_COLUMN, SORT_COLUMN};
use super::StoreError;
use crate::catalog::order::effective_sort_order;

/// Store operations that can be made to fail on purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Select,
    Insert,
    Delete,
    DeleteAll,
    UpdateSortOrder,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Map<String, Value>>>>,
    failing: Mutex<HashSet<StoreOp>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call of `op` fail with a transport error
    pub fn fail(&self, op: StoreOp) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(op);
        }
    }

    /// Undo `fail`
    pub fn recover(&self, op: StoreOp) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.remove(&op);
        }
    }

    /// Number of rows currently stored in `table`
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .map(|tables| tables.get(table).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn check(&self, op: StoreOp) -> Result<(), StoreError> {
        let failing = self
            .failing
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        if failing.contains(&op) {
            Err(StoreError::Unavailable(format!("simulated failure: {:?}", op)))
        } else {
            Ok(())
        }
    }

    fn with_tables<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, Vec<Map<String, Value>>>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        f(&mut tables)
    }

    fn row_id(row: &Map<String, Value>) -> Option<&str> {
        row.get("id").and_then(Value::as_str)
    }

    fn row_sort_order(row: &Map<String, Value>) -> i64 {
        effective_sort_order(row.get(SORT_COLUMN).and_then(Value::as_i64))
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select_ordered(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        self.check(StoreOp::Select)?;
        self.with_tables(|tables| {
            let mut rows: Vec<Map<String, Value>> =
                tables.get(table).cloned().unwrap_or_default();
            // Stable: equal keys keep insertion (= created_at) order. Null
            // sort orders must land after every explicit value, 999 included.
            rows.sort_by_key(|row| {
                let explicit = row.get(SORT_COLUMN).and_then(Value::as_i64);
                (explicit.is_none(), Self::row_sort_order(row))
            });
            Ok(rows.into_iter().map(Value::Object).collect())
        })
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, StoreError> {
        self.check(StoreOp::Insert)?;

        let mut prepared = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut row) = row else {
                return Err(StoreError::Rejected(format!(
                    "{}: insert payload must be an object",
                    table
                )));
            };
            let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            row.insert("id".to_string(), Value::String(format!("{}-{}", table, id)));
            row.insert(
                CREATED_COLUMN.to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
            row.entry(SORT_COLUMN.to_string()).or_insert(Value::Null);
            prepared.push(row);
        }

        self.with_tables(|tables| {
            let stored = tables.entry(table.to_string()).or_default();
            stored.extend(prepared.iter().cloned());
            debug!(table, inserted = prepared.len(), "Rows inserted");
            Ok(prepared.into_iter().map(Value::Object).collect())
        })
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<(), StoreError> {
        self.check(StoreOp::Delete)?;
        self.with_tables(|tables| {
            if let Some(rows) = tables.get_mut(table) {
                rows.retain(|row| Self::row_id(row) != Some(id));
            }
            Ok(())
        })
    }

    async fn delete_all(&self, table: &str) -> Result<(), StoreError> {
        self.check(StoreOp::DeleteAll)?;
        self.with_tables(|tables| {
            tables.remove(table);
            Ok(())
        })
    }

    async fn update_sort_order(
        &self,
        table: &str,
        id: &str,
        sort_order: i64,
    ) -> Result<Value, StoreError> {
        self.check(StoreOp::UpdateSortOrder)?;
        self.with_tables(|tables| {
            let row = tables
                .get_mut(table)
                .and_then(|rows| rows.iter_mut().find(|row| Self::row_id(row) == Some(id)))
                .ok_or_else(|| StoreError::NotFound(format!("{} id {}", table, id)))?;
            row.insert(SORT_COLUMN.to_string(), Value::from(sort_order));
            Ok(Value::Object(row.clone()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_assigns_ids_and_timestamps() {
        let store = MemoryStore::new();
        let rows = store
            .insert("hotels", vec![json!({"name": "A"}), json!({"name": "B"})])
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_ne!(rows[0]["id"], rows[1]["id"]);
        assert!(rows[0]["created_at"].is_string());
        assert!(rows[0]["sort_order"].is_null());
    }

    #[tokio::test]
    async fn test_select_orders_nulls_last_and_keeps_insertion_ties() {
        let store = MemoryStore::new();
        store
            .insert(
                "destinations",
                vec![
                    json!({"name": "no order"}),
                    json!({"name": "second", "sort_order": 2}),
                    json!({"name": "999 a", "sort_order": 999}),
                    json!({"name": "first", "sort_order": 1}),
                    json!({"name": "999 b", "sort_order": 999}),
                ],
            )
            .await
            .unwrap();

        let names: Vec<String> = store
            .select_ordered("destinations")
            .await
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["first", "second", "999 a", "999 b", "no order"]);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_ok() {
        let store = MemoryStore::new();
        store.delete_by_id("packages", "nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store.update_sort_order("packages", "nope", 3).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_injected_failure_and_recovery() {
        let store = MemoryStore::new();
        store.fail(StoreOp::Select);
        assert!(matches!(
            store.select_ordered("packages").await,
            Err(StoreError::Unavailable(_))
        ));
        store.recover(StoreOp::Select);
        assert!(store.select_ordered("packages").await.unwrap().is_empty());
    }
}
