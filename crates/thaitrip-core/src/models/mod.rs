//! Data models for the travel catalog.
//!
//! - `Package`, `Hotel`, `Destination`: catalog entities, plus the remote
//!   row shapes they are mapped from and the insert payloads they map to
//! - `ChatMessage`: advisor transcript entries
//! - `LeadRequest`: contact form payload
//! - `FaqItem`: home page questions

pub mod chat;
pub mod destination;
pub mod faq;
pub mod hotel;
pub mod lead;
pub mod package;

pub use chat::{ChatMessage, ChatRole};
pub use destination::{Destination, DestinationDraft, DestinationRow, NewDestinationRow};
pub use faq::FaqItem;
pub use hotel::{Hotel, HotelDraft, HotelRow, NewHotelRow};
pub use lead::{LeadRequest, TRAVELLER_TYPES};
pub use package::{NewPackageRow, Package, PackageDraft, PackageRow, TripFilter, TripType};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Row ids arrive as uuid strings or bigint numbers depending on the table
/// definition; entities always carry them as strings.
pub(crate) fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "unexpected id value: {}",
            other
        ))),
    }
}

/// Postgres `numeric` columns may be serialized as numbers or strings.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "id_as_string")]
        id: String,
        #[serde(default, deserialize_with = "lenient_number")]
        price: Option<f64>,
    }

    #[test]
    fn test_id_accepts_string_and_number() {
        let a: Probe = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        let b: Probe = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(a.id, "abc");
        assert_eq!(b.id, "42");
    }

    #[test]
    fn test_lenient_number() {
        let a: Probe = serde_json::from_str(r#"{"id":"1","price":"1800.50"}"#).unwrap();
        let b: Probe = serde_json::from_str(r#"{"id":"1","price":null}"#).unwrap();
        let c: Probe = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert_eq!(a.price, Some(1800.5));
        assert_eq!(b.price, None);
        assert_eq!(c.price, None);
    }
}
