use super::CatalogEntity;

/// Sort order assumed for entries without one: after any explicitly
/// prioritized entry.
pub const DEFAULT_SORT_ORDER: i64 = 999;

pub fn effective_sort_order(sort_order: Option<i64>) -> i64 {
    sort_order.unwrap_or(DEFAULT_SORT_ORDER)
}

/// Sort ascending by sort order, missing treated as 999. Stable, so ties
/// keep their current relative order.
pub fn sort_by_order<E: CatalogEntity>(items: &mut [E]) {
    items.sort_by_key(|item| effective_sort_order(item.sort_order()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Destination;

    fn dest(id: &str, sort_order: Option<i64>) -> Destination {
        Destination {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            image: String::new(),
            season: String::new(),
            sort_order,
        }
    }

    #[test]
    fn test_missing_sorts_as_999_and_ties_are_stable() {
        let mut items = vec![
            dest("none-a", None),
            dest("five", Some(5)),
            dest("explicit-999", Some(999)),
            dest("none-b", None),
            dest("one", Some(1)),
            dest("big", Some(1000)),
        ];
        sort_by_order(&mut items);

        let ids: Vec<&str> = items.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["one", "five", "none-a", "explicit-999", "none-b", "big"]);
    }

    #[test]
    fn test_effective_sort_order() {
        assert_eq!(effective_sort_order(None), 999);
        assert_eq!(effective_sort_order(Some(-2)), -2);
    }
}
