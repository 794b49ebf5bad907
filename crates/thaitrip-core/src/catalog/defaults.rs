//! Bundled catalog content.
//!
//! Used as the offline fallback of the read views, as the first snapshot of
//! the local cache, and as the target of an admin reset. Sort orders follow
//! list position, starting at 1.

use crate::models::{Destination, FaqItem, Hotel, Package, TripType};

pub const CONTACT_PHONE: &str = "050-1234567";
/// WhatsApp number in international form, no dashes
pub const CONTACT_WHATSAPP: &str = "972501234567";
pub const CONTACT_EMAIL: &str = "info@thaitrip.co.il";

struct PackageSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    price_start: f64,
    duration: &'static str,
    trip_type: TripType,
    image: &'static str,
    highlights: &'static [&'static str],
    sort_order: i64,
}

struct HotelSeed {
    id: &'static str,
    name: &'static str,
    stars: u8,
    area: &'static str,
    price_level: &'static str,
    image: &'static str,
    tags: &'static [&'static str],
    sort_order: i64,
}

struct DestinationSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    image: &'static str,
    season: &'static str,
    sort_order: i64,
}

const PACKAGES: &[PackageSeed] = &[
    PackageSeed {
        id: "1",
        title: "ירח דבש רומנטי",
        description: "חופשה מפנקת לזוגות אוהבים באיים האקזוטיים של תאילנד.",
        price_start: 2500.0,
        duration: "12 ימים",
        trip_type: TripType::Couples,
        image: "https://picsum.photos/id/10/800/600",
        highlights: &["מלונות יוקרה 5 כוכבים", "שייט פרטי בשקיעה", "ספא זוגי"],
        sort_order: 1,
    },
    PackageSeed {
        id: "2",
        title: "תאילנד למשפחות",
        description: "טיול חוויתי המותאם לילדים והורים כאחד, משלב אטרקציות ומנוחה.",
        price_start: 1800.0,
        duration: "14 ימים",
        trip_type: TripType::Families,
        image: "https://picsum.photos/id/11/800/600",
        highlights: &["פארקי מים", "שמורות פילים", "ריזורטים ידידותיים לילדים"],
        sort_order: 2,
    },
    PackageSeed {
        id: "3",
        title: "פול מון ואדרנלין",
        description: "לחבר’ה צעירים שמחפשים מסיבות, חופים והרפתקאות.",
        price_start: 1200.0,
        duration: "10 ימים",
        trip_type: TripType::Young,
        image: "https://picsum.photos/id/15/800/600",
        highlights: &["מסיבות פול מון בקופנגן", "צלילה בקוטאו", "טיולי ג’יפים בצפון"],
        sort_order: 3,
    },
];

const HOTELS: &[HotelSeed] = &[
    HotelSeed {
        id: "h1",
        name: "Sri Panwa Phuket",
        stars: 5,
        area: "פוקט",
        price_level: "יוקרה",
        image: "https://picsum.photos/id/164/800/600",
        tags: &["ירח דבש", "נוף לים", "בריכה פרטית"],
        sort_order: 1,
    },
    HotelSeed {
        id: "h2",
        name: "Sala Samui",
        stars: 5,
        area: "קוסמוי",
        price_level: "גבוה",
        image: "https://picsum.photos/id/204/800/600",
        tags: &["עיצוב מודרני", "חוף פרטי", "ספא"],
        sort_order: 2,
    },
    HotelSeed {
        id: "h3",
        name: "Amari Watergate",
        stars: 4,
        area: "בנגקוק",
        price_level: "בינוני",
        image: "https://picsum.photos/id/435/800/600",
        tags: &["מרכז העיר", "קניות", "משפחות"],
        sort_order: 3,
    },
];

const DESTINATIONS: &[DestinationSeed] = &[
    DestinationSeed {
        id: "bkk",
        name: "בנגקוק",
        description: "עיר הבירה התוססת. שווקים, מקדשים וחיי לילה סוערים.",
        image: "https://picsum.photos/id/48/800/600",
        season: "כל השנה (חם ולח)",
        sort_order: 1,
    },
    DestinationSeed {
        id: "north",
        name: "צפון תאילנד (צ’יאנג מאי)",
        description: "הרים ירוקים, שבטים מקומיים, מקדשים עתיקים ואווירה רגועה.",
        image: "https://picsum.photos/id/28/800/600",
        season: "נובמבר - פברואר",
        sort_order: 2,
    },
    DestinationSeed {
        id: "phuket",
        name: "פוקט",
        description: "האי הגדול ביותר. חופים מדהימים, חיי לילה וחיי פאר.",
        image: "https://picsum.photos/id/54/800/600",
        season: "נובמבר - אפריל",
        sort_order: 3,
    },
    DestinationSeed {
        id: "samui",
        name: "קוסמוי",
        description: "אי טרופי עם ריזורטים מפנקים, חופים לבנים ועצי קוקוס.",
        image: "https://picsum.photos/id/57/800/600",
        season: "ינואר - אוגוסט",
        sort_order: 4,
    },
];

pub const FAQS: &[FaqItem] = &[
    FaqItem {
        question: "מתי הזמן הכי טוב לטוס לתאילנד?",
        answer: "באופן כללי, העונה היבשה והנעימה היא בין נובמבר לפברואר. עם זאת, לאיים במפרץ תאילנד (כמו קוסמוי) מומלץ להגיע גם בקיץ (יולי-אוגוסט).",
    },
    FaqItem {
        question: "האם צריך ויזה לישראלים?",
        answer: "ישראלים מקבלים פטור מויזה לשהייה של עד 30 יום בכניסה אווירית (החוקים משתנים מדי פעם, מומלץ להתעדכן מול השגרירות).",
    },
    FaqItem {
        question: "האם נדרשים חיסונים?",
        answer: "מומלץ להתייעץ עם מרפאת מטיילים כחודש לפני הנסיעה. בדרך כלל מומלצים חיסונים כמו צהבת A ו-B וטיפוס הבטן.",
    },
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn packages() -> Vec<Package> {
    PACKAGES
        .iter()
        .map(|s| Package {
            id: s.id.to_string(),
            title: s.title.to_string(),
            description: s.description.to_string(),
            price_start: s.price_start,
            duration: s.duration.to_string(),
            trip_type: s.trip_type,
            image: s.image.to_string(),
            highlights: owned(s.highlights),
            sort_order: Some(s.sort_order),
        })
        .collect()
}

pub fn hotels() -> Vec<Hotel> {
    HOTELS
        .iter()
        .map(|s| Hotel {
            id: s.id.to_string(),
            name: s.name.to_string(),
            stars: s.stars,
            area: s.area.to_string(),
            price_level: s.price_level.to_string(),
            image: s.image.to_string(),
            tags: owned(s.tags),
            sort_order: Some(s.sort_order),
        })
        .collect()
}

pub fn destinations() -> Vec<Destination> {
    DESTINATIONS
        .iter()
        .map(|s| Destination {
            id: s.id.to_string(),
            name: s.name.to_string(),
            description: s.description.to_string(),
            image: s.image.to_string(),
            season: s.season.to_string(),
            sort_order: Some(s.sort_order),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_ids_unique_and_orders_ascending() {
        let ids: HashSet<String> = packages().into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PACKAGES.len());

        let orders: Vec<i64> = destinations().iter().filter_map(|d| d.sort_order).collect();
        assert_eq!(orders, [1, 2, 3, 4]);
    }

    #[test]
    fn test_defaults_have_non_empty_lists() {
        assert!(packages().iter().all(|p| !p.highlights.is_empty()));
        assert!(hotels().iter().all(|h| !h.tags.is_empty() && (1..=5).contains(&h.stars)));
    }
}
