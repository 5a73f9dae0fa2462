//! The authoritative item store.
//!
//! The engine reads item geometry at session start and writes it back
//! exactly once, at commit. Everything in between goes to the view layer.

use grip_core::{Dimensions, Item, ItemId, Position};

pub trait ItemStore {
    /// Current record for `id`, `None` if the store does not know it.
    fn item(&self, id: ItemId) -> Option<Item>;

    fn update_position(&mut self, id: ItemId, position: Position);

    fn update_dimensions(&mut self, id: ItemId, dimensions: Dimensions);

    /// Position and dimensions together. Stores that can batch should
    /// override this so a resize lands as one write.
    fn update_geometry(&mut self, id: ItemId, position: Position, dimensions: Dimensions) {
        self.update_position(id, position);
        self.update_dimensions(id, dimensions);
    }

    /// Raise `id` above every other item.
    fn bring_to_front(&mut self, id: ItemId);
}

/// In-memory store. Vector order is z-order, last on top.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Vec<Item>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().collect(),
            writes: 0,
        }
    }

    /// Load a JSON array of items.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Ok(Self::from_items(items))
    }

    pub fn insert(&mut self, item: Item) {
        self.remove(item.id);
        self.items.push(item);
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let idx = self.index_of(id)?;
        Some(self.items.remove(idx))
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Ids bottom to top.
    pub fn z_order(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Geometry writes received so far. A batched geometry write counts once.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}

impl ItemStore for MemoryStore {
    fn item(&self, id: ItemId) -> Option<Item> {
        self.get(id).cloned()
    }

    fn update_position(&mut self, id: ItemId, position: Position) {
        if let Some(item) = self.get_mut(id) {
            item.position = position;
            self.writes += 1;
        }
    }

    fn update_dimensions(&mut self, id: ItemId, dimensions: Dimensions) {
        if let Some(item) = self.get_mut(id) {
            item.dimensions = dimensions;
            self.writes += 1;
        }
    }

    fn update_geometry(&mut self, id: ItemId, position: Position, dimensions: Dimensions) {
        if let Some(item) = self.get_mut(id) {
            item.position = position;
            item.dimensions = dimensions;
            self.writes += 1;
        }
    }

    fn bring_to_front(&mut self, id: ItemId) {
        if let Some(idx) = self.index_of(id) {
            let item = self.items.remove(idx);
            self.items.push(item);
        }
    }
}
