use crate::catalog::EntityKind;

/// Admin operations that end in a banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Create,
    Delete,
    Reset,
    SaveOrder,
}

pub const LOAD_ERROR: &str = "שגיאה בטעינת הנתונים מהשרת.";
pub const RESET_PARTIAL_SUFFIX: &str = "ייתכן שהטבלה נותרה ריקה, נסו לאפס שוב.";
pub const RESET_RELOAD_SUFFIX: &str = "רעננו כדי לראות את הרשימה המעודכנת.";

pub fn success_message(kind: EntityKind, action: AdminAction) -> &'static str {
    use AdminAction::*;
    use EntityKind::*;
    match (kind, action) {
        (Package, Create) => "חבילה נוספה בהצלחה",
        (Package, Delete) => "חבילה נמחקה",
        (Package, Reset) => "חבילות אופסו לברירת מחדל",
        (Hotel, Create) => "מלון נוסף בהצלחה",
        (Hotel, Delete) => "מלון נמחק",
        (Hotel, Reset) => "מלונות אופסו לברירת מחדל",
        (Destination, Create) => "יעד נוסף בהצלחה",
        (Destination, Delete) => "יעד נמחק",
        (Destination, Reset) => "יעדים אופסו לברירת מחדל",
        (_, SaveOrder) => "סדר עודכן",
    }
}

pub fn error_message(kind: EntityKind, action: AdminAction) -> &'static str {
    use AdminAction::*;
    use EntityKind::*;
    match (kind, action) {
        (Package, Create) => "שגיאה בהוספת חבילה.",
        (Package, Delete) => "שגיאה במחיקת חבילה.",
        (Package, Reset) => "שגיאה באיפוס חבילות.",
        (Hotel, Create) => "שגיאה בהוספת מלון.",
        (Hotel, Delete) => "שגיאה במחיקת מלון.",
        (Hotel, Reset) => "שגיאה באיפוס מלונות.",
        (Destination, Create) => "שגיאה בהוספת יעד.",
        (Destination, Delete) => "שגיאה במחיקת יעד.",
        (Destination, Reset) => "שגיאה באיפוס יעדים.",
        (_, SaveOrder) => "שגיאה בשמירת הסדר.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_distinct_messages() {
        for kind in EntityKind::ALL {
            for action in [AdminAction::Create, AdminAction::Delete, AdminAction::Reset] {
                assert_ne!(success_message(kind, action), error_message(kind, action));
            }
        }
        assert_eq!(error_message(EntityKind::Hotel, AdminAction::SaveOrder), "שגיאה בשמירת הסדר.");
    }
}
