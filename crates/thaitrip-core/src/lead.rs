//! Contact form delivery.
//!
//! A lead is posted once, as JSON, to the configured webhook. Nothing is
//! queued or retried; the caller keeps the form filled in when a submit
//! fails so the visitor can try again.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{error, info};

use crate::api::StoreError;
use crate::config::ENV_WEBHOOK_URL;
use crate::models::LeadRequest;

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 15;

pub const LEAD_SUCCESS: &str = "תודה! פנייתך התקבלה, נחזור אליך בהקדם.";
const LEAD_FAILURE: &str = "מצטערים, לא הצלחנו לשלוח את הטופס. נסה שוב בעוד רגע.";

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("webhook URL not configured")]
    MissingWebhook,

    #[error("required field missing: {0}")]
    MissingField(&'static str),

    #[error("webhook rejected the lead ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl LeadError {
    /// Text shown to the visitor
    pub fn user_message(&self) -> String {
        match self {
            LeadError::MissingWebhook => {
                format!("שגיאה: חסרה כתובת וובהוק ({})", ENV_WEBHOOK_URL)
            }
            LeadError::MissingField(label) => format!("נא למלא את השדה: {}", label),
            LeadError::Rejected { .. } | LeadError::Network(_) => LEAD_FAILURE.to_string(),
        }
    }
}

/// Name and phone are required; everything else may be blank.
pub fn validate(lead: &LeadRequest) -> Result<(), LeadError> {
    if lead.name.trim().is_empty() {
        return Err(LeadError::MissingField("שם מלא"));
    }
    if lead.phone.trim().is_empty() {
        return Err(LeadError::MissingField("טלפון"));
    }
    Ok(())
}

#[derive(Clone)]
pub struct LeadClient {
    client: Client,
    webhook_url: Option<String>,
}

impl LeadClient {
    pub fn new(webhook_url: Option<String>) -> Result<Self, LeadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            webhook_url: webhook_url.filter(|url| !url.trim().is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    pub async fn submit(&self, lead: &LeadRequest) -> Result<(), LeadError> {
        let url = self.webhook_url.as_deref().ok_or(LeadError::MissingWebhook)?;
        validate(lead)?;

        let response = self.client.post(url).json(lead).send().await.map_err(|e| {
            error!(error = %e, "Lead webhook unreachable");
            LeadError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Lead webhook rejected submission");
            return Err(LeadError::Rejected {
                status: status.as_u16(),
                body: StoreError::truncate_body(&body),
            });
        }

        info!(traveller_type = %lead.traveller_type, "Lead submitted");
        Ok(())
    }
}
