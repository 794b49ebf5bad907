use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Recommended travel window, free text
    pub season: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestinationDraft {
    pub name: String,
    pub description: String,
    pub image: String,
    pub season: String,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationRow {
    #[serde(deserialize_with = "super::id_as_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDestinationRow {
    pub name: String,
    pub description: String,
    pub image: String,
    pub season: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

impl DestinationRow {
    pub fn to_destination(self) -> Destination {
        Destination {
            id: self.id,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            season: self.season.unwrap_or_default(),
            sort_order: self.sort_order,
        }
    }
}

impl From<&DestinationDraft> for NewDestinationRow {
    fn from(draft: &DestinationDraft) -> Self {
        Self {
            name: draft.name.clone(),
            description: draft.description.clone(),
            image: draft.image.clone(),
            season: draft.season.clone(),
            sort_order: draft.sort_order,
        }
    }
}

impl Destination {
    pub fn to_draft(&self) -> DestinationDraft {
        DestinationDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            season: self.season.clone(),
            sort_order: self.sort_order,
        }
    }
}
