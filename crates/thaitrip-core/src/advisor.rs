//! Conversational trip advisor.
//!
//! Each visitor message becomes one `generateContent` request. The prompt
//! carries only the last few transcript lines, flattened into a
//! "customer / agent" dialogue; the persona lives in the system instruction.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::api::StoreError;
use crate::models::{ChatMessage, ChatRole};

// ============================================================================
// Constants
// ============================================================================

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const MODEL: &str = "gemini-2.5-flash";
const TEMPERATURE: f32 = 0.7;

/// Generation can be slow; allow longer than catalog requests.
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Transcript lines carried into each prompt
const CONTEXT_MESSAGES: usize = 4;

const SYSTEM_INSTRUCTION: &str = "\
אתה סוכן נסיעות מומחה לתאילנד, דובר עברית.
שם הסוכנות הוא \"עפים רחוק\" (Afim Rahok).
קהל היעד שלך הוא ישראלים (זוגות, משפחות, צעירים).
המטרה שלך היא לתת תשובות קצרות, מועילות ומזמינות.
תמיד תמליץ בסוף התשובה ליצור קשר עם הסוכנות שלנו \"עפים רחוק\" לבניית מסלול מותאם אישית.
אל תיתן מחירים מדויקים אלא הערכות בלבד.
ענה בעברית בלבד.";

pub const GREETING: &str = "שלום! אני ה-AI של \"עפים רחוק\". אני כאן כדי לעזור לכם לתכנן את הטיול המושלם בתאילנד. לאן תרצו לנסוע ומה התקציב שלכם?";
pub const MISSING_KEY_REPLY: &str = "נא להגדיר מפתח API כדי להשתמש ביועץ הטיולים.";
pub const EMPTY_REPLY: &str = "מצטערים, לא הצלחתי ליצור תשובה כרגע. נסה שוב מאוחר יותר.";
pub const ERROR_REPLY: &str = "אירעה שגיאה בתקשורת עם יועץ הטיולים. אנא נסו שנית או צרו קשר בטלפון.";

// ============================================================================
// Transcript
// ============================================================================

/// Flatten the recent history plus the new input into a prompt.
pub fn build_prompt(history: &[ChatMessage], input: &str) -> String {
    let start = history.len().saturating_sub(CONTEXT_MESSAGES);
    let context = history[start..]
        .iter()
        .map(ChatMessage::prompt_line)
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{}\n{}: {}\n{}:",
        context,
        ChatRole::User.prompt_label(),
        input,
        ChatRole::Model.prompt_label()
    )
}

#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::model(GREETING)],
            pending: false,
        }
    }
}

impl Transcript {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record the visitor's message and return the prompt to send. Blank
    /// input, or input while a reply is outstanding, is ignored.
    pub fn begin_send(&mut self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() || self.pending {
            return None;
        }
        let prompt = build_prompt(&self.messages, input);
        self.messages.push(ChatMessage::user(input));
        self.pending = true;
        Some(prompt)
    }

    pub fn finish(&mut self, reply: String) {
        self.messages.push(ChatMessage::model(reply));
        self.pending = false;
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("API key not configured")]
    MissingKey,

    #[error("generation request failed ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, all parts concatenated
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct AdvisorClient {
    client: Client,
    api_key: Option<String>,
}

impl AdvisorClient {
    pub fn new(api_key: Option<String>) -> Result<Self, AdvisorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Reply text for a prompt. Never fails: problems become one of the
    /// fixed apology replies.
    pub async fn ask(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Advisor returned an empty reply");
                EMPTY_REPLY.to_string()
            }
            Err(AdvisorError::MissingKey) => MISSING_KEY_REPLY.to_string(),
            Err(e) => {
                error!(error = %e, "Advisor request failed");
                ERROR_REPLY.to_string()
            }
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, AdvisorError> {
        let api_key = self.api_key.as_deref().ok_or(AdvisorError::MissingKey)?;

        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: SYSTEM_INSTRUCTION }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        let url = format!("{}/models/{}:generateContent", API_BASE_URL, MODEL);
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                body: StoreError::truncate_body(&body),
            });
        }

        // An unparseable success body is treated like an empty answer
        let parsed: GenerateResponse = serde_json::from_str(&body).unwrap_or_else(|e| {
            debug!(error = %e, "Unexpected advisor response shape");
            GenerateResponse::default()
        });
        Ok(parsed.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_uses_last_four_messages() {
        let history = vec![
            ChatMessage::model("m0"),
            ChatMessage::user("u1"),
            ChatMessage::model("m1"),
            ChatMessage::user("u2"),
            ChatMessage::model("m2"),
        ];
        let prompt = build_prompt(&history, "כמה עולה?");
        assert_eq!(
            prompt,
            "לקוח: u1\nסוכן: m1\nלקוח: u2\nסוכן: m2\nלקוח: כמה עולה?\nסוכן:"
        );
    }

    #[test]
    fn test_transcript_starts_with_greeting_and_blocks_while_pending() {
        let mut transcript = Transcript::default();
        assert_eq!(transcript.messages(), &[ChatMessage::model(GREETING)]);

        assert_eq!(transcript.begin_send("   "), None);
        let prompt = transcript.begin_send("פוקט או קוסמוי?").unwrap();
        assert!(prompt.starts_with(&format!("סוכן: {}", GREETING)));
        assert!(transcript.is_pending());
        assert_eq!(transcript.begin_send("עוד שאלה"), None);

        transcript.finish("קוסמוי".into());
        assert!(!transcript.is_pending());
        assert_eq!(transcript.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_key_reply_without_network() {
        let client = AdvisorClient::new(None).unwrap();
        assert!(!client.is_configured());
        assert_eq!(client.ask("שלום").await, MISSING_KEY_REPLY);
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"שלום "},{"text":"לכם"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.text(), "שלום לכם");

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: "sys" }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: "hi" }],
            }],
            generation_config: GenerationConfig { temperature: TEMPERATURE },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "sys");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["contents"][0]["role"], "user");
        assert!(value["generationConfig"]["temperature"].as_f64().unwrap() > 0.69);
    }
}
