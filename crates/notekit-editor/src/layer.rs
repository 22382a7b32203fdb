//! Layers: named, ordered item containers.

use notekit_core::{ItemId, LayerId};

use crate::model::Item;

/// A named container of items. Item order is back-to-front paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    items: Vec<Item>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_items(name, Vec::new())
    }

    pub fn with_items(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            id: LayerId::next(),
            name: name.into(),
            visible: true,
            locked: false,
            items,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Visible and unlocked: tools may create or modify content here.
    pub fn is_editable(&self) -> bool {
        self.visible && !self.locked
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    /// Inserts at `index`, clamped to the end of the list.
    pub(crate) fn insert(&mut self, index: usize, item: Item) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    pub(crate) fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub(crate) fn remove(&mut self, id: ItemId) -> Option<(usize, Item)> {
        let index = self.position_of(id)?;
        Some((index, self.items.remove(index)))
    }
}
