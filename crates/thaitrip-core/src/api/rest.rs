//! PostgREST client for the hosted catalog database.
//!
//! Talks to the `/rest/v1/{table}` endpoints of a Supabase project using the
//! project's anon key. One HTTP request per store operation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder};
use serde_json::{json, Value};
use tracing::debug;

use super::store::{RemoteStore, CREATED_COLUMN, SORT_COLUMN};
use super::StoreError;

// ============================================================================
// Constants
// ============================================================================

/// Path prefix of the PostgREST API inside a Supabase project
const REST_PATH: &str = "rest/v1";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Ask PostgREST to echo inserted/updated rows back
const PREFER_REPRESENTATION: &str = "return=representation";

/// Single-object media type; PostgREST answers 406 when zero rows match
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Query value for "order by sort_order asc nulls last, created_at asc"
pub fn order_clause() -> String {
    format!("{}.asc.nullslast,{}.asc", SORT_COLUMN, CREATED_COLUMN)
}

/// Filter value matching a single id
pub fn id_filter(id: &str) -> String {
    format!("eq.{}", id)
}

/// Filter value matching every row (id not equal to the empty string)
pub const ALL_ROWS_FILTER: &str = "neq.";

/// Store client for a Supabase/PostgREST project.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::from_status(status, &body))
        }
    }

    async fn json_body<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        table: &str,
    ) -> Result<T, StoreError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            StoreError::InvalidResponse(format!("Failed to parse {} response: {}", table, e))
        })
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn select_ordered(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        let response = self
            .request(Method::GET, table)
            .query(&[("select", "*".to_string()), ("order", order_clause())])
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let rows: Vec<Value> = Self::json_body(response, table).await?;
        debug!(table, count = rows.len(), "Rows fetched");
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, StoreError> {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", PREFER_REPRESENTATION)
            .query(&[("select", "*")])
            .json(&rows)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::json_body(response, table).await
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, table)
            .query(&[("id", id_filter(id))])
            .send()
            .await?;

        Self::check_response(response).await?;
        Ok(())
    }

    async fn delete_all(&self, table: &str) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, table)
            .query(&[("id", ALL_ROWS_FILTER)])
            .send()
            .await?;

        Self::check_response(response).await?;
        Ok(())
    }

    async fn update_sort_order(
        &self,
        table: &str,
        id: &str,
        sort_order: i64,
    ) -> Result<Value, StoreError> {
        let response = self
            .request(Method::PATCH, table)
            .header("Prefer", PREFER_REPRESENTATION)
            .header(header::ACCEPT, SINGLE_OBJECT)
            .query(&[("id", id_filter(id)), ("select", "*".to_string())])
            .json(&json!({ "sort_order": sort_order }))
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::json_body(response, table).await
    }
}
