//! Gesture arbitration.
//!
//! The arbiter is the interaction context for one canvas: it owns the mode
//! flags, decides which recognizer may own a touch sequence, and holds the
//! per-item start snapshots that gesture updates are applied against.
//!
//! Enablement is declarative and evaluated before a gesture begins; two
//! recognizers that could affect the same item are never enabled at the same
//! time, which is the whole concurrency discipline of the engine. The
//! snapshot map is written only on gesture start and cleared only on the
//! owning gesture's end.

use crate::geometry::ResizeCorner;
use crate::item::{PlacedId, PlacedItem};
use kurbo::Point;
use std::collections::HashMap;

/// How a sidebar drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The drag ended inside the drop zone and committed a new item.
    Placed(PlacedId),
    /// The drag ended outside the drop zone (or before the layout was
    /// measured); the tile springs back and nothing changes.
    Reverted,
}

/// Pre-gesture state of an item, captured at gesture start so that every
/// update applies its delta against the same base. Deltas are never
/// accumulated incrementally; this keeps repeated updates from compounding
/// rounding error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSnapshot {
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub rotation_degrees: f64,
}

impl From<&PlacedItem> for ItemSnapshot {
    fn from(item: &PlacedItem) -> Self {
        Self {
            position: item.position,
            width: item.width,
            height: item.height,
            rotation_degrees: item.rotation_degrees,
        }
    }
}

/// Decides which recognizer owns the pointer at any instant.
#[derive(Debug, Clone, Default)]
pub struct GestureArbiter {
    edit_mode: bool,
    picker_open: bool,
    sidebar_drag: Option<usize>,
    moving_item: Option<PlacedId>,
    resizing: Option<(PlacedId, ResizeCorner)>,
    snapshots: HashMap<PlacedId, ItemSnapshot>,
}

impl GestureArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.edit_mode = edit_mode;
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn set_picker_open(&mut self, open: bool) {
        self.picker_open = open;
    }

    /// Canvas pan and pinch share one predicate: enabled only while no
    /// sidebar tile is being dragged, no item is being moved or resized, and
    /// no modal picker is open.
    pub fn canvas_gestures_enabled(&self) -> bool {
        self.sidebar_drag.is_none()
            && self.moving_item.is_none()
            && self.resizing.is_none()
            && !self.picker_open
    }

    /// Sidebar drag-to-place: edit mode only, and only for templates that
    /// are not already placed unless reuse is allowed.
    pub fn sidebar_drag_enabled(&self, already_placed: bool, allow_reuse: bool) -> bool {
        self.edit_mode && (allow_reuse || !already_placed)
    }

    /// Placed-item move: edit mode only, and never while a resize is in
    /// progress.
    pub fn item_move_enabled(&self) -> bool {
        self.edit_mode && self.resizing.is_none()
    }

    /// Placed-item resize: edit mode only, and only for the currently
    /// selected item.
    pub fn item_resize_enabled(
        &self,
        id: PlacedId,
        selected: Option<PlacedId>,
        allow_resize: bool,
    ) -> bool {
        allow_resize && self.edit_mode && selected == Some(id)
    }

    pub fn begin_sidebar_drag(&mut self, index: usize) {
        log::trace!("sidebar drag started for slot {index}");
        self.sidebar_drag = Some(index);
    }

    pub fn active_sidebar_drag(&self) -> Option<usize> {
        self.sidebar_drag
    }

    pub fn end_sidebar_drag(&mut self) -> Option<usize> {
        self.sidebar_drag.take()
    }

    pub fn begin_item_move(&mut self, item: &PlacedItem) {
        self.snapshots.insert(item.placed_id, ItemSnapshot::from(item));
        self.moving_item = Some(item.placed_id);
    }

    pub fn move_target(&self) -> Option<(PlacedId, ItemSnapshot)> {
        let id = self.moving_item?;
        self.snapshots.get(&id).map(|snapshot| (id, *snapshot))
    }

    pub fn end_item_move(&mut self) {
        if let Some(id) = self.moving_item.take() {
            self.snapshots.remove(&id);
        }
    }

    pub fn begin_item_resize(&mut self, item: &PlacedItem, corner: ResizeCorner) {
        self.snapshots.insert(item.placed_id, ItemSnapshot::from(item));
        self.resizing = Some((item.placed_id, corner));
    }

    pub fn resize_target(&self) -> Option<(PlacedId, ResizeCorner, ItemSnapshot)> {
        let (id, corner) = self.resizing?;
        self.snapshots
            .get(&id)
            .map(|snapshot| (id, corner, *snapshot))
    }

    pub fn end_item_resize(&mut self) {
        if let Some((id, _)) = self.resizing.take() {
            self.snapshots.remove(&id);
        }
    }

    /// Drop every in-flight gesture and its snapshots. Used when leaving
    /// edit mode or clearing the canvas.
    pub fn reset_transients(&mut self) {
        self.sidebar_drag = None;
        self.moving_item = None;
        self.resizing = None;
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;
    use crate::item::PlacedItem;

    fn item(id: PlacedId) -> PlacedItem {
        let template = CatalogItem {
            id: 1,
            color: "#FF6B6B".to_string(),
            label: "X4".to_string(),
            icon: None,
        };
        PlacedItem::from_template(&template, id, Point::new(100.0, 100.0), 70.0, 70.0)
    }

    #[test]
    fn test_canvas_gestures_blocked_by_any_item_interaction() {
        let mut arbiter = GestureArbiter::new();
        assert!(arbiter.canvas_gestures_enabled());

        arbiter.begin_sidebar_drag(0);
        assert!(!arbiter.canvas_gestures_enabled());
        arbiter.end_sidebar_drag();
        assert!(arbiter.canvas_gestures_enabled());

        let moved = item(1);
        arbiter.begin_item_move(&moved);
        assert!(!arbiter.canvas_gestures_enabled());
        arbiter.end_item_move();

        let resized = item(2);
        arbiter.begin_item_resize(&resized, ResizeCorner::TopLeft);
        assert!(!arbiter.canvas_gestures_enabled());
        arbiter.end_item_resize();

        arbiter.set_picker_open(true);
        assert!(!arbiter.canvas_gestures_enabled());
    }

    #[test]
    fn test_sidebar_drag_requires_edit_mode_and_unused_template() {
        let mut arbiter = GestureArbiter::new();
        assert!(!arbiter.sidebar_drag_enabled(false, false));

        arbiter.set_edit_mode(true);
        assert!(arbiter.sidebar_drag_enabled(false, false));
        assert!(!arbiter.sidebar_drag_enabled(true, false));
        assert!(arbiter.sidebar_drag_enabled(true, true));
    }

    #[test]
    fn test_item_move_excluded_by_resize() {
        let mut arbiter = GestureArbiter::new();
        arbiter.set_edit_mode(true);
        assert!(arbiter.item_move_enabled());

        let resized = item(1);
        arbiter.begin_item_resize(&resized, ResizeCorner::BottomRight);
        assert!(!arbiter.item_move_enabled());
        arbiter.end_item_resize();
        assert!(arbiter.item_move_enabled());
    }

    #[test]
    fn test_resize_requires_selection() {
        let mut arbiter = GestureArbiter::new();
        arbiter.set_edit_mode(true);
        assert!(!arbiter.item_resize_enabled(1, None, true));
        assert!(!arbiter.item_resize_enabled(1, Some(2), true));
        assert!(arbiter.item_resize_enabled(1, Some(1), true));
        assert!(!arbiter.item_resize_enabled(1, Some(1), false));

        arbiter.set_edit_mode(false);
        assert!(!arbiter.item_resize_enabled(1, Some(1), true));
    }

    #[test]
    fn test_snapshot_lifecycle() {
        let mut arbiter = GestureArbiter::new();
        let moved = item(7);
        arbiter.begin_item_move(&moved);

        let (id, snapshot) = arbiter.move_target().unwrap();
        assert_eq!(id, 7);
        assert!((snapshot.position.x - 100.0).abs() < f64::EPSILON);
        assert!((snapshot.width - 70.0).abs() < f64::EPSILON);

        arbiter.end_item_move();
        assert!(arbiter.move_target().is_none());
    }

    #[test]
    fn test_reset_transients_clears_everything() {
        let mut arbiter = GestureArbiter::new();
        arbiter.begin_sidebar_drag(2);
        let resized = item(3);
        arbiter.begin_item_resize(&resized, ResizeCorner::TopRight);

        arbiter.reset_transients();
        assert!(arbiter.active_sidebar_drag().is_none());
        assert!(arbiter.resize_target().is_none());
        assert!(arbiter.canvas_gestures_enabled());
    }
}
