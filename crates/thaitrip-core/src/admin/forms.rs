//! Admin create forms.
//!
//! Forms hold raw text the way it was typed. Conversion to a draft applies
//! the submission rules: required fields, comma lists, numeric fallbacks and
//! defaults for optional fields left empty.

use chrono::Utc;
use thiserror::Error;

use crate::catalog::DEFAULT_SORT_ORDER;
use crate::models::hotel::clamp_stars;
use crate::models::{DestinationDraft, HotelDraft, PackageDraft, TripType};

pub const DEFAULT_PACKAGE_PRICE: f64 = 1800.0;
pub const DEFAULT_DURATION: &str = "7 ימים";
pub const DEFAULT_STARS: u8 = 4;
pub const DEFAULT_HOTEL_AREA: &str = "תאילנד";
pub const DEFAULT_PRICE_LEVEL: &str = "בינוני";
pub const DEFAULT_SEASON: &str = "כל השנה";

pub const HIGHLIGHTS_PLACEHOLDER: &str = "פירוט המאפיינים יתווסף בהמשך";
pub const TAGS_PLACEHOLDER: &str = "מאפיינים יתווספו בהמשך";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("נא למלא את השדה: {0}")]
    MissingField(&'static str),
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn list_or_placeholder(raw: &str, placeholder: &str) -> Vec<String> {
    let items = split_list(raw);
    if items.is_empty() {
        vec![placeholder.to_string()]
    } else {
        items
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Submitted sort order: blank, zero or unparseable input means 999.
pub fn parse_sort_order(raw: &str) -> i64 {
    match parse_number(raw).map(|n| n.trunc() as i64) {
        Some(0) | None => DEFAULT_SORT_ORDER,
        Some(n) => n,
    }
}

/// Pending reorder input, or None when it is not a number
pub fn parse_sort_edit(raw: &str) -> Option<i64> {
    parse_number(raw).map(|n| n.trunc() as i64)
}

fn required(value: &str, label: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(label))
    } else {
        Ok(trimmed.to_string())
    }
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn seeded_image(value: &str, prefix: &str, seed: i64) -> String {
    or_default(value, &format!("https://picsum.photos/seed/{}{}/800/600", prefix, seed))
}

/// A create form the admin screen can edit field by field.
///
/// Fields are addressed by index into `LABELS`. Text fields are edited
/// through `text_mut`; selector fields (no text) are changed with `cycle`.
pub trait EntityForm: Default + Clone + std::fmt::Debug + Send + 'static {
    type Draft;

    const LABELS: &'static [&'static str];

    fn text(&self, index: usize) -> Option<&str>;
    fn text_mut(&mut self, index: usize) -> Option<&mut String>;

    /// Advance a selector field. No-op for text fields.
    fn cycle(&mut self, _index: usize) {}

    /// Display value of any field
    fn display(&self, index: usize) -> String {
        self.text(index).unwrap_or_default().to_string()
    }

    /// Build a draft, using `seed` for generated image URLs
    fn to_draft_at(&self, seed: i64) -> Result<Self::Draft, ValidationError>;

    fn to_draft(&self) -> Result<Self::Draft, ValidationError> {
        self.to_draft_at(Utc::now().timestamp_millis())
    }

    fn push_char(&mut self, index: usize, c: char) {
        if let Some(field) = self.text_mut(index) {
            field.push(c);
        }
    }

    fn backspace(&mut self, index: usize) {
        if let Some(field) = self.text_mut(index) {
            field.pop();
        }
    }
}

// ============================================================================
// Package
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PackageForm {
    pub title: String,
    pub description: String,
    pub price_start: String,
    pub duration: String,
    pub trip_type: TripType,
    pub image: String,
    pub highlights: String,
    pub sort_order: String,
}

impl Default for PackageForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price_start: DEFAULT_PACKAGE_PRICE.to_string(),
            duration: DEFAULT_DURATION.to_string(),
            trip_type: TripType::default(),
            image: String::new(),
            highlights: String::new(),
            sort_order: DEFAULT_SORT_ORDER.to_string(),
        }
    }
}

impl EntityForm for PackageForm {
    type Draft = PackageDraft;

    const LABELS: &'static [&'static str] = &[
        "כותרת",
        "תיאור",
        "מחיר התחלתי ($)",
        "משך",
        "סוג",
        "תמונה (URL)",
        "מאפיינים (מופרדים בפסיק)",
        "סדר",
    ];

    fn text(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.title),
            1 => Some(&self.description),
            2 => Some(&self.price_start),
            3 => Some(&self.duration),
            5 => Some(&self.image),
            6 => Some(&self.highlights),
            7 => Some(&self.sort_order),
            _ => None,
        }
    }

    fn text_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.title),
            1 => Some(&mut self.description),
            2 => Some(&mut self.price_start),
            3 => Some(&mut self.duration),
            5 => Some(&mut self.image),
            6 => Some(&mut self.highlights),
            7 => Some(&mut self.sort_order),
            _ => None,
        }
    }

    fn cycle(&mut self, index: usize) {
        if index == 4 {
            self.trip_type = self.trip_type.next();
        }
    }

    fn display(&self, index: usize) -> String {
        match index {
            4 => self.trip_type.label().to_string(),
            _ => self.text(index).unwrap_or_default().to_string(),
        }
    }

    fn to_draft_at(&self, seed: i64) -> Result<PackageDraft, ValidationError> {
        let title = required(&self.title, "כותרת")?;
        let description = required(&self.description, "תיאור")?;

        Ok(PackageDraft {
            title,
            description,
            price_start: parse_number(&self.price_start).unwrap_or(0.0).max(0.0),
            duration: or_default(&self.duration, DEFAULT_DURATION),
            trip_type: self.trip_type,
            image: seeded_image(&self.image, "", seed),
            highlights: list_or_placeholder(&self.highlights, HIGHLIGHTS_PLACEHOLDER),
            sort_order: Some(parse_sort_order(&self.sort_order)),
        })
    }
}

// ============================================================================
// Hotel
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HotelForm {
    pub name: String,
    pub stars: String,
    pub area: String,
    pub price_level: String,
    pub image: String,
    pub tags: String,
    pub sort_order: String,
}

impl Default for HotelForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            stars: DEFAULT_STARS.to_string(),
            area: String::new(),
            price_level: String::new(),
            image: String::new(),
            tags: String::new(),
            sort_order: DEFAULT_SORT_ORDER.to_string(),
        }
    }
}

impl EntityForm for HotelForm {
    type Draft = HotelDraft;

    const LABELS: &'static [&'static str] = &[
        "שם המלון",
        "כוכבים (1-5)",
        "אזור",
        "רמת מחיר",
        "תמונה (URL)",
        "תגיות (מופרדות בפסיק)",
        "סדר",
    ];

    fn text(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.stars),
            2 => Some(&self.area),
            3 => Some(&self.price_level),
            4 => Some(&self.image),
            5 => Some(&self.tags),
            6 => Some(&self.sort_order),
            _ => None,
        }
    }

    fn text_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.stars),
            2 => Some(&mut self.area),
            3 => Some(&mut self.price_level),
            4 => Some(&mut self.image),
            5 => Some(&mut self.tags),
            6 => Some(&mut self.sort_order),
            _ => None,
        }
    }

    fn to_draft_at(&self, seed: i64) -> Result<HotelDraft, ValidationError> {
        let name = required(&self.name, "שם המלון")?;
        let stars = parse_number(&self.stars).map(|n| n.trunc() as i64).unwrap_or(0);

        Ok(HotelDraft {
            name,
            stars: clamp_stars(stars),
            area: or_default(&self.area, DEFAULT_HOTEL_AREA),
            price_level: or_default(&self.price_level, DEFAULT_PRICE_LEVEL),
            image: seeded_image(&self.image, "h", seed),
            tags: list_or_placeholder(&self.tags, TAGS_PLACEHOLDER),
            sort_order: Some(parse_sort_order(&self.sort_order)),
        })
    }
}

// ============================================================================
// Destination
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DestinationForm {
    pub name: String,
    pub description: String,
    pub image: String,
    pub season: String,
    pub sort_order: String,
}

impl Default for DestinationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            image: String::new(),
            season: String::new(),
            sort_order: DEFAULT_SORT_ORDER.to_string(),
        }
    }
}

impl EntityForm for DestinationForm {
    type Draft = DestinationDraft;

    const LABELS: &'static [&'static str] = &["שם היעד", "תיאור", "תמונה (URL)", "עונה מומלצת", "סדר"];

    fn text(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.description),
            2 => Some(&self.image),
            3 => Some(&self.season),
            4 => Some(&self.sort_order),
            _ => None,
        }
    }

    fn text_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.description),
            2 => Some(&mut self.image),
            3 => Some(&mut self.season),
            4 => Some(&mut self.sort_order),
            _ => None,
        }
    }

    fn to_draft_at(&self, seed: i64) -> Result<DestinationDraft, ValidationError> {
        let name = required(&self.name, "שם היעד")?;
        let description = required(&self.description, "תיאור")?;

        Ok(DestinationDraft {
            name,
            description,
            image: seeded_image(&self.image, "d", seed),
            season: or_default(&self.season, DEFAULT_SEASON),
            sort_order: Some(parse_sort_order(&self.sort_order)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" a, b ,,c ,"), vec!["a", "b", "c"]);
        assert!(split_list(" , ,").is_empty());
    }

    #[test]
    fn test_parse_sort_order() {
        assert_eq!(parse_sort_order(""), 999);
        assert_eq!(parse_sort_order("0"), 999);
        assert_eq!(parse_sort_order("abc"), 999);
        assert_eq!(parse_sort_order(" 3 "), 3);
        assert_eq!(parse_sort_order("-2"), -2);
        assert_eq!(parse_sort_edit("x"), None);
        assert_eq!(parse_sort_edit("0"), Some(0));
    }

    #[test]
    fn test_package_draft_defaults() {
        let form = PackageForm {
            title: "Test Package".into(),
            description: "d".into(),
            price_start: "0".into(),
            sort_order: String::new(),
            duration: String::new(),
            ..Default::default()
        };
        let draft = form.to_draft_at(42).unwrap();

        assert_eq!(draft.sort_order, Some(999));
        assert_eq!(draft.highlights, vec![HIGHLIGHTS_PLACEHOLDER]);
        assert_eq!(draft.price_start, 0.0);
        assert_eq!(draft.duration, DEFAULT_DURATION);
        assert_eq!(draft.image, "https://picsum.photos/seed/42/800/600");
        assert_eq!(draft.trip_type, TripType::Couples);
    }

    #[test]
    fn test_package_requires_title_and_description() {
        let form = PackageForm {
            title: "   ".into(),
            description: "d".into(),
            ..Default::default()
        };
        assert_eq!(form.to_draft_at(0), Err(ValidationError::MissingField("כותרת")));

        let form = PackageForm {
            title: "t".into(),
            ..Default::default()
        };
        assert_eq!(form.to_draft_at(0), Err(ValidationError::MissingField("תיאור")));
    }

    #[test]
    fn test_negative_price_clamped() {
        let form = PackageForm {
            title: "t".into(),
            description: "d".into(),
            price_start: "-50".into(),
            ..Default::default()
        };
        assert_eq!(form.to_draft_at(0).unwrap().price_start, 0.0);
    }

    #[test]
    fn test_hotel_stars_clamped() {
        let mut form = HotelForm {
            name: "Sala".into(),
            stars: "0".into(),
            ..Default::default()
        };
        assert_eq!(form.to_draft_at(0).unwrap().stars, 1);

        form.stars = "7".into();
        assert_eq!(form.to_draft_at(0).unwrap().stars, 5);

        form.stars = "abc".into();
        assert_eq!(form.to_draft_at(0).unwrap().stars, 1);
    }

    #[test]
    fn test_hotel_optional_defaults() {
        let form = HotelForm {
            name: "Sala".into(),
            tags: "ספא, חוף".into(),
            ..Default::default()
        };
        let draft = form.to_draft_at(7).unwrap();
        assert_eq!(draft.stars, 4);
        assert_eq!(draft.area, DEFAULT_HOTEL_AREA);
        assert_eq!(draft.price_level, DEFAULT_PRICE_LEVEL);
        assert_eq!(draft.image, "https://picsum.photos/seed/h7/800/600");
        assert_eq!(draft.tags, vec!["ספא", "חוף"]);

        let empty_tags = HotelForm {
            name: "Sala".into(),
            ..Default::default()
        };
        assert_eq!(empty_tags.to_draft_at(7).unwrap().tags, vec![TAGS_PLACEHOLDER]);
    }

    #[test]
    fn test_destination_defaults() {
        let form = DestinationForm {
            name: "קרבי".into(),
            description: "צוקים".into(),
            ..Default::default()
        };
        let draft = form.to_draft_at(1).unwrap();
        assert_eq!(draft.season, DEFAULT_SEASON);
        assert_eq!(draft.image, "https://picsum.photos/seed/d1/800/600");

        let missing = DestinationForm::default();
        assert!(missing.to_draft_at(1).is_err());
    }

    #[test]
    fn test_field_editing() {
        let mut form = PackageForm::default();
        form.push_char(0, 'א');
        form.push_char(4, 'x');
        form.cycle(4);
        form.backspace(2);

        assert_eq!(form.title, "א");
        assert_eq!(form.display(4), "משפחות");
        assert_eq!(form.price_start, "180");
        assert_eq!(PackageForm::LABELS.len(), 8);
    }
}
