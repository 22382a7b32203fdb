//! Selection set.

use notekit_core::ItemId;

/// Ordered set of selected items, in the order they were selected.
///
/// Mutators return `true` when the set actually changed so callers can
/// decide whether to publish a selection event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<ItemId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }

    pub fn add(&mut self, id: ItemId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.items.push(id);
        true
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| *i != id);
        self.items.len() != before
    }

    /// Adds `id` if absent, removes it otherwise.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if !self.remove(id) {
            self.items.push(id);
        }
        true
    }

    /// Replaces the whole selection. Duplicates in `ids` are dropped.
    pub fn set(&mut self, ids: impl IntoIterator<Item = ItemId>) -> bool {
        let mut next: Vec<ItemId> = Vec::new();
        for id in ids {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        if next == self.items {
            return false;
        }
        self.items = next;
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        true
    }

    /// Keeps only the ids for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(ItemId) -> bool) -> bool {
        let before = self.items.len();
        self.items.retain(|id| keep(*id));
        self.items.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_order_and_rejects_duplicates() {
        let (a, b) = (ItemId::next(), ItemId::next());
        let mut sel = Selection::new();
        assert!(sel.add(b));
        assert!(sel.add(a));
        assert!(!sel.add(b));
        assert_eq!(sel.ids(), &[b, a]);
    }

    #[test]
    fn test_toggle() {
        let a = ItemId::next();
        let mut sel = Selection::new();
        sel.toggle(a);
        assert!(sel.contains(a));
        sel.toggle(a);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_set_reports_changes() {
        let (a, b) = (ItemId::next(), ItemId::next());
        let mut sel = Selection::new();
        assert!(sel.set([a, b, a]));
        assert_eq!(sel.len(), 2);
        assert!(!sel.set([a, b]));
        assert!(sel.clear());
        assert!(!sel.clear());
    }

    #[test]
    fn test_retain() {
        let (a, b) = (ItemId::next(), ItemId::next());
        let mut sel = Selection::new();
        sel.set([a, b]);
        assert!(sel.retain(|id| id == b));
        assert_eq!(sel.ids(), &[b]);
    }
}
