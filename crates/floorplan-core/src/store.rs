//! Authoritative store of placed items.

use crate::catalog::{CatalogId, CatalogItem};
use crate::geometry::clamp_position;
use crate::item::{PlacedId, PlacedItem};
use crate::options::CanvasOptions;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The clamps every store mutation enforces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreLimits {
    pub min_item_size: f64,
    pub placement_bound: f64,
}

impl From<&CanvasOptions> for StoreLimits {
    fn from(options: &CanvasOptions) -> Self {
        Self {
            min_item_size: options.min_item_size,
            placement_bound: options.placement_bound,
        }
    }
}

/// In-memory collection of placed items for one canvas.
///
/// Insertion order doubles as z-order and navigation order. Identifiers come
/// from a monotonic per-store counter, so they are unique for the store's
/// lifetime and deterministic. Every mutator clamps before writing; an item
/// can never be observed outside the limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStore {
    items: Vec<PlacedItem>,
    selected: Option<PlacedId>,
    used: HashSet<CatalogId>,
    next_id: PlacedId,
    limits: StoreLimits,
}

impl ItemStore {
    pub fn new(limits: StoreLimits) -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            used: HashSet::new(),
            next_id: 1,
            limits,
        }
    }

    /// Place a new item from a catalog template. The position is clamped to
    /// the canvas bounds and the catalog id is marked used.
    pub fn add(
        &mut self,
        template: &CatalogItem,
        position: Point,
        width: f64,
        height: f64,
    ) -> PlacedId {
        let placed_id = self.next_id;
        self.next_id += 1;
        let position = clamp_position(position, self.limits.placement_bound);
        let width = width.max(self.limits.min_item_size);
        let height = height.max(self.limits.min_item_size);
        log::debug!(
            "placing catalog item {} as #{placed_id} at ({:.1}, {:.1})",
            template.id,
            position.x,
            position.y
        );
        self.used.insert(template.id);
        self.items.push(PlacedItem::from_template(
            template, placed_id, position, width, height,
        ));
        placed_id
    }

    /// Move an item, clamping both axes. Unknown ids are a no-op.
    pub fn move_item(&mut self, id: PlacedId, position: Point) -> bool {
        let bound = self.limits.placement_bound;
        match self.get_mut(id) {
            Some(item) => {
                item.position = clamp_position(position, bound);
                true
            }
            None => false,
        }
    }

    /// Resize an item, clamping width/height to the floor and the optional
    /// new position to the bounds. Unknown ids are a no-op.
    pub fn resize(
        &mut self,
        id: PlacedId,
        width: f64,
        height: f64,
        position: Option<Point>,
    ) -> bool {
        let limits = self.limits;
        match self.get_mut(id) {
            Some(item) => {
                item.width = width.max(limits.min_item_size);
                item.height = height.max(limits.min_item_size);
                if let Some(position) = position {
                    item.position = clamp_position(position, limits.placement_bound);
                }
                true
            }
            None => false,
        }
    }

    /// Advance an item's rotation by 90 degrees, wrapping at 360.
    pub fn rotate(&mut self, id: PlacedId) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.rotation_degrees = (item.rotation_degrees + 90.0).rem_euclid(360.0);
                true
            }
            None => false,
        }
    }

    /// Remove an item. Clears the selection if the removed item was
    /// selected, and releases its catalog id once no other instance of the
    /// same template remains.
    pub fn remove(&mut self, id: PlacedId) -> Option<PlacedItem> {
        let index = self.index_of(id)?;
        let removed = self.items.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if !self.items.iter().any(|i| i.catalog_id == removed.catalog_id) {
            self.used.remove(&removed.catalog_id);
        }
        log::debug!("removed item #{id}");
        Some(removed)
    }

    /// Empty the store: items, selection, and the used-catalog set together.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
        self.used.clear();
    }

    pub fn get(&self, id: PlacedId) -> Option<&PlacedItem> {
        self.items.iter().find(|item| item.placed_id == id)
    }

    fn get_mut(&mut self, id: PlacedId) -> Option<&mut PlacedItem> {
        self.items.iter_mut().find(|item| item.placed_id == id)
    }

    pub fn index_of(&self, id: PlacedId) -> Option<usize> {
        self.items.iter().position(|item| item.placed_id == id)
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Select an item. Fails (and leaves the selection alone) for unknown
    /// ids.
    pub fn select(&mut self, id: PlacedId) -> bool {
        if self.get(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<PlacedId> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&PlacedItem> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Whether a catalog template currently has at least one placed
    /// instance.
    pub fn is_used(&self, catalog_id: CatalogId) -> bool {
        self.used.contains(&catalog_id)
    }
}
