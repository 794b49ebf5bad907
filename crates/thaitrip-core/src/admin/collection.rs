use std::collections::HashMap;

use crate::catalog::{sort_by_order, CatalogEntity};

/// A confirmed change to apply to the committed list.
///
/// Patches are only built from successful store responses, so the list
/// never shows a change the store has not accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<E> {
    Insert(E),
    Remove(String),
    SetSortOrder { id: String, sort_order: i64 },
    Replace(Vec<E>),
}

/// Committed entities of one kind plus the reorder inputs typed but not
/// yet saved, keyed by id.
#[derive(Debug, Clone)]
pub struct Collection<E> {
    items: Vec<E>,
    sort_edits: HashMap<String, String>,
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            sort_edits: HashMap::new(),
        }
    }
}

impl<E: CatalogEntity> Collection<E> {
    pub fn new(items: Vec<E>) -> Self {
        let mut collection = Self::default();
        collection.apply(Patch::Replace(items));
        collection
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Apply a patch and restore display order
    pub fn apply(&mut self, patch: Patch<E>) {
        match patch {
            Patch::Insert(item) => self.items.push(item),
            Patch::Remove(id) => {
                self.items.retain(|item| item.id() != id);
                self.sort_edits.remove(&id);
            }
            Patch::SetSortOrder { id, sort_order } => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
                    item.set_sort_order(sort_order);
                }
                self.sort_edits.remove(&id);
            }
            Patch::Replace(items) => {
                self.items = items;
                self.sort_edits.clear();
            }
        }
        sort_by_order(&mut self.items);
    }

    // ===== Pending reorder input =====

    pub fn edit_sort_order(&mut self, id: &str, value: String) {
        self.sort_edits.insert(id.to_string(), value);
    }

    pub fn pending_edit(&self, id: &str) -> Option<&str> {
        self.sort_edits.get(id).map(String::as_str)
    }

    pub fn discard_edit(&mut self, id: &str) {
        self.sort_edits.remove(id);
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.sort_edits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Hotel;

    fn hotel(id: &str, sort_order: Option<i64>) -> Hotel {
        Hotel {
            id: id.to_string(),
            name: id.to_string(),
            stars: 4,
            area: String::new(),
            price_level: String::new(),
            image: String::new(),
            tags: Vec::new(),
            sort_order,
        }
    }

    fn ids(collection: &Collection<Hotel>) -> Vec<&str> {
        collection.items().iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn test_new_sorts() {
        let collection = Collection::new(vec![hotel("b", Some(2)), hotel("a", Some(1))]);
        assert_eq!(ids(&collection), ["a", "b"]);
    }

    #[test]
    fn test_order_holds_after_mutation_sequence() {
        let mut collection = Collection::new(vec![hotel("a", Some(1)), hotel("b", Some(5))]);

        collection.apply(Patch::Insert(hotel("new", None)));
        collection.apply(Patch::Insert(hotel("mid", Some(3))));
        assert_eq!(ids(&collection), ["a", "mid", "b", "new"]);

        collection.apply(Patch::SetSortOrder { id: "new".into(), sort_order: 0 });
        collection.apply(Patch::Remove("mid".into()));
        assert_eq!(ids(&collection), ["new", "a", "b"]);
    }

    #[test]
    fn test_remove_and_replace_drop_edits() {
        let mut collection = Collection::new(vec![hotel("a", Some(1)), hotel("b", Some(2))]);
        collection.edit_sort_order("a", "4".into());
        collection.edit_sort_order("b", "7".into());

        collection.apply(Patch::Remove("a".into()));
        assert_eq!(collection.pending_edit("a"), None);
        assert_eq!(collection.pending_edit("b"), Some("7"));

        collection.apply(Patch::Replace(vec![hotel("c", None)]));
        assert!(!collection.has_pending_edits());
        assert_eq!(ids(&collection), ["c"]);
    }

    #[test]
    fn test_set_sort_order_unknown_id_leaves_items() {
        let mut collection = Collection::new(vec![hotel("a", Some(1))]);
        collection.apply(Patch::SetSortOrder { id: "zzz".into(), sort_order: 0 });
        assert_eq!(collection.items(), &[hotel("a", Some(1))]);
    }
}
