use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - check the store key")]
    Unauthorized,

    #[error("No matching row: {0}")]
    NotFound(String),

    #[error("Rejected by the store: {0}")]
    Rejected(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Reset removed every row but could not put the defaults back.
    #[error("Reset of {table} failed after its rows were deleted: {source}")]
    PartialReset {
        table: &'static str,
        #[source]
        source: Box<StoreError>,
    },

    /// Reset put the defaults back but the stored rows could not be read.
    #[error("Reset of {table} wrote its rows but the response was unreadable: {source}")]
    ResetUnconfirmed {
        table: &'static str,
        #[source]
        source: Box<StoreError>,
    },
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl StoreError {
    /// Truncate a response body to avoid logging excessive data
    pub fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut = (0..=MAX_ERROR_BODY_LENGTH)
                .rev()
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(0);
            format!("{}... (truncated, {} total bytes)", &body[..cut], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => StoreError::Unauthorized,
            403 => StoreError::AccessDenied(truncated),
            // PostgREST answers 406 when a single-object request matched no row
            404 | 406 => StoreError::NotFound(truncated),
            400 | 409 | 422 => StoreError::Rejected(truncated),
            429 => StoreError::RateLimited,
            500..=599 => StoreError::ServerError(truncated),
            _ => StoreError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// True when the table was emptied by a reset that did not finish
    pub fn left_table_empty(&self) -> bool {
        matches!(self, StoreError::PartialReset { .. })
    }

    /// Reset refilled the table even though it returned an error
    pub fn rows_written(&self) -> bool {
        matches!(self, StoreError::ResetUnconfirmed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            StoreError::from_status(StatusCode::UNAUTHORIZED, ""),
            StoreError::Unauthorized
        ));
        assert!(matches!(
            StoreError::from_status(StatusCode::NOT_ACCEPTABLE, "PGRST116"),
            StoreError::NotFound(_)
        ));
        assert!(matches!(
            StoreError::from_status(StatusCode::CONFLICT, "duplicate key"),
            StoreError::Rejected(_)
        ));
        assert!(matches!(
            StoreError::from_status(StatusCode::BAD_GATEWAY, ""),
            StoreError::ServerError(_)
        ));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let body = "א".repeat(400);
        let truncated = StoreError::truncate_body(&body);
        assert!(truncated.contains("truncated, 800 total bytes"));
    }
}
