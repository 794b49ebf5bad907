use serde::{Deserialize, Serialize};

/// Lowest and highest star rating accepted on create
pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub stars: u8,
    pub area: String,
    /// Free-text price tier, e.g. "יוקרה"
    pub price_level: String,
    pub image: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelDraft {
    pub name: String,
    pub stars: u8,
    pub area: String,
    pub price_level: String,
    pub image: String,
    pub tags: Vec<String>,
    pub sort_order: Option<i64>,
}

/// Row shape of the `hotels` table.
#[derive(Debug, Clone, Deserialize)]
pub struct HotelRow {
    #[serde(deserialize_with = "super::id_as_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stars: Option<i64>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub price_level: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewHotelRow {
    pub name: String,
    pub stars: u8,
    pub area: String,
    pub price_level: String,
    pub image: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

/// Clamp a submitted star rating into 1..=5. Unparseable input counts as 0.
pub fn clamp_stars(raw: i64) -> u8 {
    raw.clamp(MIN_STARS as i64, MAX_STARS as i64) as u8
}

impl HotelRow {
    pub fn to_hotel(self) -> Hotel {
        Hotel {
            id: self.id,
            name: self.name.unwrap_or_default(),
            // Stored ratings are shown as-is; only the create path clamps
            stars: self.stars.unwrap_or(0).clamp(0, u8::MAX as i64) as u8,
            area: self.area.unwrap_or_default(),
            price_level: self.price_level.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            sort_order: self.sort_order,
        }
    }
}

impl From<&HotelDraft> for NewHotelRow {
    fn from(draft: &HotelDraft) -> Self {
        Self {
            name: draft.name.clone(),
            stars: draft.stars,
            area: draft.area.clone(),
            price_level: draft.price_level.clone(),
            image: draft.image.clone(),
            tags: draft.tags.clone(),
            sort_order: draft.sort_order,
        }
    }
}

impl Hotel {
    pub fn to_draft(&self) -> HotelDraft {
        HotelDraft {
            name: self.name.clone(),
            stars: self.stars,
            area: self.area.clone(),
            price_level: self.price_level.clone(),
            image: self.image.clone(),
            tags: self.tags.clone(),
            sort_order: self.sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_stars() {
        assert_eq!(clamp_stars(0), 1);
        assert_eq!(clamp_stars(7), 5);
        assert_eq!(clamp_stars(-3), 1);
        assert_eq!(clamp_stars(4), 4);
    }

    #[test]
    fn test_row_defaults() {
        let row: HotelRow = serde_json::from_str(r#"{"id":7,"name":"Sala"}"#).unwrap();
        let hotel = row.to_hotel();
        assert_eq!(hotel.id, "7");
        assert_eq!(hotel.stars, 0);
        assert_eq!(hotel.price_level, "");
        assert!(hotel.tags.is_empty());
    }

    #[test]
    fn test_entity_json_uses_camel_case() {
        let hotel = Hotel {
            id: "h1".into(),
            name: "Sri Panwa".into(),
            stars: 5,
            area: "פוקט".into(),
            price_level: "יוקרה".into(),
            image: String::new(),
            tags: vec![],
            sort_order: Some(1),
        };
        let value = serde_json::to_value(&hotel).unwrap();
        assert_eq!(value["priceLevel"], "יוקרה");
        assert_eq!(value["sortOrder"], 1);
    }
}
