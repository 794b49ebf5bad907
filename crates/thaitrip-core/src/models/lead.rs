use serde::{Deserialize, Serialize};

/// Traveller categories offered by the contact form. The first is the default.
pub const TRAVELLER_TYPES: [&str; 5] = [
    "זוגות / ירח דבש",
    "משפחות",
    "צעירים / מסיבות",
    "קבוצות",
    "גיל הזהב",
];

/// Contact form payload, posted as-is to the lead webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(rename = "type")]
    pub traveller_type: String,
    pub dates: String,
    pub budget: String,
    pub notes: String,
}

impl Default for LeadRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            traveller_type: TRAVELLER_TYPES[0].to_string(),
            dates: String::new(),
            budget: String::new(),
            notes: String::new(),
        }
    }
}

impl LeadRequest {
    /// Advance the traveller type to the next offered option
    pub fn cycle_traveller_type(&mut self) {
        let current = TRAVELLER_TYPES
            .iter()
            .position(|t| *t == self.traveller_type)
            .unwrap_or(TRAVELLER_TYPES.len() - 1);
        self.traveller_type = TRAVELLER_TYPES[(current + 1) % TRAVELLER_TYPES.len()].to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let lead = LeadRequest {
            name: "ישראל".into(),
            phone: "050-0000000".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&lead).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(keys, ["budget", "dates", "email", "name", "notes", "phone", "type"]);
        assert_eq!(value["type"], TRAVELLER_TYPES[0]);
    }

    #[test]
    fn test_cycle_traveller_type_wraps() {
        let mut lead = LeadRequest::default();
        for _ in 0..TRAVELLER_TYPES.len() {
            lead.cycle_traveller_type();
        }
        assert_eq!(lead.traveller_type, TRAVELLER_TYPES[0]);

        lead.traveller_type = "something else".into();
        lead.cycle_traveller_type();
        assert_eq!(lead.traveller_type, TRAVELLER_TYPES[0]);
    }
}
