//! The editor aggregate: the host-facing surface of the engine.
//!
//! Hosts feed layout measurements and gesture callbacks in, tick the
//! animations once per frame, and read item geometry and the view transform
//! back out for rendering. All coordinate reconciliation between sidebar
//! space, screen space, and canvas space happens behind these methods.

use crate::animation::Animator;
use crate::camera::{CameraController, ViewTransform};
use crate::catalog::{Catalog, CatalogId};
use crate::geometry::{self, ItemFrame, ResizeCorner, SidebarGrid};
use crate::gestures::{DropOutcome, GestureArbiter};
use crate::item::{PlacedId, PlacedItem};
use crate::options::CanvasOptions;
use crate::store::{ItemStore, StoreLimits};
use kurbo::{Point, Rect, Size, Vec2};

/// Scale a sidebar tile springs to while it is being dragged.
const PICKUP_SCALE: f64 = 1.1;

/// External screen/router collaborator. The editor hands over the selected
/// item's data and does not know what the host screen does with it.
pub trait ScreenRouter {
    fn open_item_detail(&mut self, item: &PlacedItem);
}

/// One canvas editor: options, catalog, placed items, camera, gesture
/// arbitration, and animation state.
#[derive(Debug, Clone)]
pub struct Editor {
    options: CanvasOptions,
    catalog: Catalog,
    store: ItemStore,
    camera: CameraController,
    arbiter: GestureArbiter,
    animator: Animator,
    drop_zone: Option<Rect>,
    sidebar: Option<Rect>,
}

impl Editor {
    pub fn new(catalog: Catalog, options: CanvasOptions) -> Self {
        let store = ItemStore::new(StoreLimits::from(&options));
        let camera = CameraController::new(&options);
        let animator = Animator::new(options.spring);
        Self {
            options,
            catalog,
            store,
            camera,
            arbiter: GestureArbiter::new(),
            animator,
            drop_zone: None,
            sidebar: None,
        }
    }

    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn sidebar_grid(&self) -> SidebarGrid {
        SidebarGrid {
            origin: self.options.sidebar_origin,
            cell_pitch: self.options.sidebar_cell_pitch,
            items_per_row: self.options.sidebar_items_per_row,
        }
    }

    // ---- layout measurement ----

    /// Record the drop zone's screen rectangle, re-supplied after every host
    /// layout pass.
    pub fn set_drop_zone_layout(&mut self, layout: Rect) {
        self.drop_zone = Some(layout);
    }

    /// Record the sidebar's screen rectangle.
    pub fn set_sidebar_layout(&mut self, layout: Rect) {
        self.sidebar = Some(layout);
    }

    /// Whether both layout rectangles have been measured. Until then every
    /// drop is rejected.
    pub fn layouts_ready(&self) -> bool {
        self.drop_zone.is_some() && self.sidebar.is_some()
    }

    // ---- modes ----

    pub fn is_edit_mode(&self) -> bool {
        self.arbiter.edit_mode()
    }

    /// Flip edit mode. Selection, navigation focus, and any in-flight
    /// gesture state are cleared on every toggle.
    pub fn toggle_edit_mode(&mut self) -> bool {
        let edit = !self.arbiter.edit_mode();
        self.arbiter.set_edit_mode(edit);
        self.store.clear_selection();
        self.camera.clear_focus();
        self.arbiter.reset_transients();
        log::debug!("edit mode: {edit}");
        edit
    }

    pub fn set_picker_open(&mut self, open: bool) {
        self.arbiter.set_picker_open(open);
    }

    // ---- sidebar drag-to-place ----

    /// Whether the sidebar tile at `index` may start a drag right now.
    pub fn sidebar_drag_enabled(&self, index: usize) -> bool {
        self.catalog.get(index).is_some_and(|template| {
            self.arbiter
                .sidebar_drag_enabled(self.store.is_used(template.id), self.options.allow_catalog_reuse)
        })
    }

    pub fn begin_sidebar_drag(&mut self, index: usize) -> bool {
        if !self.sidebar_drag_enabled(index) {
            log::trace!("sidebar drag denied for slot {index}");
            return false;
        }
        let id = self.catalog.get(index).map(|t| t.id);
        let Some(id) = id else { return false };
        self.arbiter.begin_sidebar_drag(index);
        self.animator.drag_mut(id).scale.animate_to(PICKUP_SCALE);
        true
    }

    /// Track the live drag translation of the active sidebar tile.
    pub fn update_sidebar_drag(&mut self, delta: Vec2) {
        let Some(index) = self.arbiter.active_sidebar_drag() else {
            return;
        };
        let Some(id) = self.catalog.get(index).map(|t| t.id) else {
            return;
        };
        let springs = self.animator.drag_mut(id);
        springs.offset_x.snap_to(delta.x);
        springs.offset_y.snap_to(delta.y);
    }

    /// Finish a sidebar drag with the gesture's final translation.
    ///
    /// Inside the drop zone this commits a new item at the computed
    /// canvas-space position; outside it (or before both layouts are
    /// measured) nothing changes. Either way the tile springs back to its
    /// slot.
    pub fn end_sidebar_drag(&mut self, delta: Vec2) -> DropOutcome {
        let Some(index) = self.arbiter.end_sidebar_drag() else {
            return DropOutcome::Reverted;
        };
        let Some(template) = self.catalog.get(index).cloned() else {
            return DropOutcome::Reverted;
        };

        let springs = self.animator.drag_mut(template.id);
        springs.scale.animate_to(1.0);
        springs.offset_x.animate_to(0.0);
        springs.offset_y.animate_to(0.0);

        let (Some(zone), Some(sidebar)) = (self.drop_zone, self.sidebar) else {
            log::debug!("drop rejected: layout not measured yet");
            return DropOutcome::Reverted;
        };

        let handle = geometry::drag_handle_position(sidebar, &self.sidebar_grid(), index, delta);
        let tile = Size::new(self.options.tile_size, self.options.tile_size);
        if !geometry::is_within_drop_zone(handle, tile, zone) {
            log::debug!("drop reverted: released outside the drop zone");
            return DropOutcome::Reverted;
        }

        let canvas = geometry::screen_to_canvas(
            handle,
            zone,
            self.options.header_height,
            &self.camera.transform(),
        );
        let footprint = Size::new(self.options.default_item_size, self.options.default_item_size);
        let centered = canvas + geometry::center_offset(footprint);
        let id = self
            .store
            .add(&template, centered, footprint.width, footprint.height);
        DropOutcome::Placed(id)
    }

    // ---- placed-item move ----

    pub fn begin_item_move(&mut self, id: PlacedId) -> bool {
        if !self.arbiter.item_move_enabled() {
            return false;
        }
        let Some(item) = self.store.get(id) else {
            return false;
        };
        self.arbiter.begin_item_move(item);
        self.store.select(id);
        true
    }

    /// Apply a move gesture's screen-space translation against the start
    /// snapshot. The delta is divided by the current zoom so the item tracks
    /// the finger regardless of scale.
    pub fn update_item_move(&mut self, delta: Vec2) {
        let Some((id, snapshot)) = self.arbiter.move_target() else {
            return;
        };
        let scale = self.camera.transform().scale;
        self.store.move_item(id, snapshot.position + delta / scale);
    }

    pub fn end_item_move(&mut self) {
        self.arbiter.end_item_move();
    }

    // ---- placed-item resize ----

    pub fn begin_item_resize(&mut self, id: PlacedId, corner: ResizeCorner) -> bool {
        if !self
            .arbiter
            .item_resize_enabled(id, self.store.selected_id(), self.options.allow_resize)
        {
            return false;
        }
        let Some(item) = self.store.get(id) else {
            return false;
        };
        self.arbiter.begin_item_resize(item, corner);
        true
    }

    /// Apply a resize gesture's screen-space translation against the start
    /// snapshot, holding the grabbed corner's opposite fixed.
    pub fn update_item_resize(&mut self, delta: Vec2) {
        let Some((id, corner, snapshot)) = self.arbiter.resize_target() else {
            return;
        };
        let scale = self.camera.transform().scale;
        let frame = geometry::resize_from_corner(
            ItemFrame {
                position: snapshot.position,
                width: snapshot.width,
                height: snapshot.height,
            },
            corner,
            delta / scale,
            self.options.min_item_size,
        );
        self.store
            .resize(id, frame.width, frame.height, Some(frame.position));
    }

    pub fn end_item_resize(&mut self) {
        self.arbiter.end_item_resize();
    }

    // ---- canvas pan/pinch ----

    /// Whether canvas-level pan/pinch recognizers should be enabled.
    pub fn canvas_gestures_enabled(&self) -> bool {
        self.arbiter.canvas_gestures_enabled()
    }

    pub fn canvas_pan_update(&mut self, delta: Vec2) -> bool {
        if !self.arbiter.canvas_gestures_enabled() {
            return false;
        }
        self.camera.pan_update(delta);
        true
    }

    pub fn canvas_pan_end(&mut self) {
        self.camera.pan_end();
    }

    pub fn canvas_pinch_update(&mut self, factor: f64) -> bool {
        if !self.arbiter.canvas_gestures_enabled() {
            return false;
        }
        self.camera.pinch_update(factor);
        true
    }

    pub fn canvas_pinch_end(&mut self) {
        self.camera.pinch_end();
    }

    // ---- selection, rotation, removal ----

    pub fn select_item(&mut self, id: PlacedId) -> bool {
        self.store.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    pub fn selected_item(&self) -> Option<&PlacedItem> {
        self.store.selected_item()
    }

    /// Hand the selected item to the host's router. Returns false when
    /// nothing is selected.
    pub fn open_detail(&self, router: &mut dyn ScreenRouter) -> bool {
        match self.store.selected_item() {
            Some(item) => {
                router.open_item_detail(item);
                true
            }
            None => false,
        }
    }

    /// Advance an item's rotation by 90 degrees, when rotation is enabled.
    pub fn rotate_item(&mut self, id: PlacedId) -> bool {
        self.options.allow_rotate && self.store.rotate(id)
    }

    pub fn remove_item(&mut self, id: PlacedId) -> bool {
        self.store.remove(id).is_some()
    }

    pub fn remove_selected(&mut self) -> bool {
        match self.store.selected_id() {
            Some(id) => self.remove_item(id),
            None => false,
        }
    }

    /// Empty the canvas: items, selection, used-catalog marks, and the
    /// navigation index, all in one step.
    pub fn clear_all(&mut self) {
        self.store.clear();
        self.camera.clear_focus();
        self.arbiter.reset_transients();
        log::debug!("canvas cleared");
    }

    // ---- navigation & camera ----

    /// Focus the next placed item cyclically.
    pub fn focus_next_item(&mut self) -> Option<PlacedId> {
        self.camera
            .advance_to_next(self.store.items(), self.drop_zone, self.options.header_height)
    }

    /// Drop the navigation focus without moving the camera.
    pub fn clear_focus(&mut self) {
        self.camera.clear_focus();
    }

    pub fn nav_index(&self) -> Option<usize> {
        self.camera.nav_index()
    }

    /// Animate the camera back to the identity transform.
    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    // ---- frame tick & render state ----

    /// Advance all springs by `dt` seconds; call once per animation frame.
    pub fn tick(&mut self, dt: f64) {
        self.camera.tick(dt);
        self.animator.tick(dt);
    }

    /// Whether every spring has settled; hosts can pause their frame loop
    /// until the next interaction.
    pub fn is_settled(&self) -> bool {
        self.camera.is_settled() && self.animator.is_idle()
    }

    pub fn view_transform(&self) -> ViewTransform {
        self.camera.transform()
    }

    pub fn items(&self) -> &[PlacedItem] {
        self.store.items()
    }

    pub fn item(&self, id: PlacedId) -> Option<&PlacedItem> {
        self.store.get(id)
    }

    /// Corner handle positions for an item, in canvas space. Empty unless
    /// the resize recognizers would be enabled for it: selected, edit mode
    /// on, and resizing allowed.
    pub fn resize_handles(&self, id: PlacedId) -> Vec<(ResizeCorner, Point)> {
        if !self
            .arbiter
            .item_resize_enabled(id, self.store.selected_id(), self.options.allow_resize)
        {
            return Vec::new();
        }
        let Some(item) = self.store.get(id) else {
            return Vec::new();
        };
        let bounds = item.bounds();
        ResizeCorner::ALL
            .iter()
            .map(|corner| (*corner, corner.position_on(bounds)))
            .collect()
    }

    /// Live drag translation of a sidebar tile.
    pub fn drag_offset(&self, catalog_id: CatalogId) -> Vec2 {
        self.animator.offset(catalog_id)
    }

    /// Live pickup scale of a sidebar tile.
    pub fn drag_scale(&self, catalog_id: CatalogId) -> f64 {
        self.animator.scale(catalog_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;

    const DT: f64 = 1.0 / 60.0;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem {
                id: 1,
                color: "#FF6B6B".to_string(),
                label: "X4".to_string(),
                icon: None,
            },
            CatalogItem {
                id: 2,
                color: "#4ECDC4".to_string(),
                label: "X5".to_string(),
                icon: None,
            },
        ])
        .unwrap()
    }

    fn measured(options: CanvasOptions) -> Editor {
        let mut editor = Editor::new(catalog(), options);
        editor.set_sidebar_layout(Rect::new(0.0, 0.0, 400.0, 180.0));
        editor.set_drop_zone_layout(Rect::new(0.0, 0.0, 400.0, 600.0));
        editor
    }

    fn settle(editor: &mut Editor) {
        for _ in 0..600 {
            editor.tick(DT);
        }
    }

    /// Drag slot 0 so its tile's top-left lands on `screen`, then release.
    fn drop_at(editor: &mut Editor, screen: Point) -> DropOutcome {
        // Slot 0 rests at sidebar origin + (20, 80).
        let delta = screen - Point::new(20.0, 80.0);
        assert!(editor.begin_sidebar_drag(0));
        editor.update_sidebar_drag(delta);
        editor.end_sidebar_drag(delta)
    }

    #[test]
    fn test_drop_scenario_stores_centered_canvas_position() {
        // Drop zone {0,0,400,600}, header 60, raw screen point (150,200),
        // identity transform, 70x70 footprint -> stored (115, 105).
        let mut editor = measured(CanvasOptions::circle());
        editor.toggle_edit_mode();

        let outcome = drop_at(&mut editor, Point::new(150.0, 200.0));
        let DropOutcome::Placed(id) = outcome else {
            panic!("expected drop to commit");
        };
        let item = editor.item(id).unwrap();
        assert!((item.position.x - 115.0).abs() < f64::EPSILON);
        assert!((item.position.y - 105.0).abs() < f64::EPSILON);
        assert!((item.width - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drop_inverts_pan_and_zoom() {
        let mut editor = measured(CanvasOptions::circle());
        // Pan then zoom in view mode, then place in edit mode.
        assert!(editor.canvas_pan_update(Vec2::new(50.0, 40.0)));
        editor.canvas_pan_end();
        assert!(editor.canvas_pinch_update(2.0));
        editor.canvas_pinch_end();
        editor.toggle_edit_mode();

        let outcome = drop_at(&mut editor, Point::new(150.0, 200.0));
        let DropOutcome::Placed(id) = outcome else {
            panic!("expected drop to commit");
        };
        // local (150, 140) -> ((150-50)/2, (140-40)/2) = (50, 50), centered -35.
        let item = editor.item(id).unwrap();
        assert!((item.position.x - 15.0).abs() < f64::EPSILON);
        assert!((item.position.y - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drop_outside_zone_reverts_and_springs_back() {
        let mut editor = measured(CanvasOptions::circle());
        editor.toggle_edit_mode();

        assert!(editor.begin_sidebar_drag(0));
        editor.update_sidebar_drag(Vec2::new(2.0, 3.0));
        assert!((editor.drag_offset(1).x - 2.0).abs() < f64::EPSILON);

        // Release with the tile still over the sidebar, above the zone's
        // usable interior: footprint not fully contained.
        let outcome = editor.end_sidebar_drag(Vec2::new(500.0, 0.0));
        assert_eq!(outcome, DropOutcome::Reverted);
        assert!(editor.items().is_empty());

        settle(&mut editor);
        assert!(editor.drag_offset(1).hypot() < 0.1);
        assert!((editor.drag_scale(1) - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_drop_without_layout_is_rejected() {
        let mut editor = Editor::new(catalog(), CanvasOptions::circle());
        editor.toggle_edit_mode();
        assert!(!editor.layouts_ready());

        assert!(editor.begin_sidebar_drag(0));
        let outcome = editor.end_sidebar_drag(Vec2::new(130.0, 120.0));
        assert_eq!(outcome, DropOutcome::Reverted);
        assert!(editor.items().is_empty());
    }

    #[test]
    fn test_sidebar_drag_requires_edit_mode() {
        let mut editor = measured(CanvasOptions::circle());
        assert!(!editor.begin_sidebar_drag(0));
    }

    #[test]
    fn test_single_use_templates_block_second_drag() {
        let mut editor = measured(CanvasOptions::rounded_rect());
        editor.toggle_edit_mode();

        let outcome = drop_at(&mut editor, Point::new(150.0, 200.0));
        assert!(matches!(outcome, DropOutcome::Placed(_)));
        assert!(!editor.sidebar_drag_enabled(0));
        assert!(!editor.begin_sidebar_drag(0));
        // A different template still works.
        assert!(editor.sidebar_drag_enabled(1));

        // Removing the instance frees the template again.
        let id = editor.items()[0].placed_id;
        assert!(editor.remove_item(id));
        assert!(editor.sidebar_drag_enabled(0));
    }

    #[test]
    fn test_reusable_templates_allow_repeat_drops() {
        let mut editor = measured(CanvasOptions::circle());
        editor.toggle_edit_mode();
        assert!(matches!(
            drop_at(&mut editor, Point::new(150.0, 200.0)),
            DropOutcome::Placed(_)
        ));
        assert!(matches!(
            drop_at(&mut editor, Point::new(200.0, 300.0)),
            DropOutcome::Placed(_)
        ));
        assert_eq!(editor.items().len(), 2);
    }

    #[test]
    fn test_item_move_scales_delta_and_selects() {
        let mut editor = measured(CanvasOptions::circle());
        assert!(editor.canvas_pinch_update(2.0));
        editor.canvas_pinch_end();
        editor.toggle_edit_mode();

        let DropOutcome::Placed(id) = drop_at(&mut editor, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };
        let start = editor.item(id).unwrap().position;

        assert!(editor.begin_item_move(id));
        assert_eq!(editor.selected_item().map(|i| i.placed_id), Some(id));
        editor.update_item_move(Vec2::new(30.0, 20.0));
        editor.update_item_move(Vec2::new(40.0, 20.0));
        editor.end_item_move();

        // Deltas apply against the start snapshot, divided by the zoom.
        let item = editor.item(id).unwrap();
        assert!((item.position.x - (start.x + 20.0)).abs() < f64::EPSILON);
        assert!((item.position.y - (start.y + 10.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_item_move_requires_edit_mode() {
        let mut editor = measured(CanvasOptions::circle());
        editor.toggle_edit_mode();
        let DropOutcome::Placed(id) = drop_at(&mut editor, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };
        editor.toggle_edit_mode();
        assert!(!editor.begin_item_move(id));
    }

    #[test]
    fn test_resize_flow_from_gesture_to_store() {
        let mut editor = measured(CanvasOptions::rounded_rect());
        editor.toggle_edit_mode();
        let DropOutcome::Placed(id) = drop_at(&mut editor, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };
        // Resize needs selection first.
        assert!(!editor.begin_item_resize(id, ResizeCorner::TopRight));
        assert!(editor.select_item(id));
        assert!(editor.begin_item_resize(id, ResizeCorner::TopRight));

        let start = editor.item(id).unwrap().clone();
        editor.update_item_resize(Vec2::new(20.0, -10.0));
        editor.end_item_resize();

        let item = editor.item(id).unwrap();
        assert!((item.width - (start.width + 20.0)).abs() < f64::EPSILON);
        assert!((item.height - (start.height + 10.0)).abs() < f64::EPSILON);
        assert!((item.position.x - start.position.x).abs() < f64::EPSILON);
        assert!((item.position.y - (start.position.y - 10.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_disabled_by_preset() {
        let mut editor = measured(CanvasOptions::circle());
        editor.toggle_edit_mode();
        let DropOutcome::Placed(id) = drop_at(&mut editor, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };
        editor.select_item(id);
        assert!(!editor.begin_item_resize(id, ResizeCorner::BottomRight));
        assert!(editor.resize_handles(id).is_empty());
    }

    #[test]
    fn test_resize_handles_follow_selection_and_bounds() {
        let mut editor = measured(CanvasOptions::rounded_rect());
        editor.toggle_edit_mode();
        let DropOutcome::Placed(id) = drop_at(&mut editor, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };
        assert!(editor.resize_handles(id).is_empty());

        editor.select_item(id);
        let handles = editor.resize_handles(id);
        assert_eq!(handles.len(), 4);
        let bounds = editor.item(id).unwrap().bounds();
        let (corner, pos) = handles[3];
        assert_eq!(corner, ResizeCorner::BottomRight);
        assert!((pos.x - bounds.x1).abs() < f64::EPSILON);
        assert!((pos.y - bounds.y1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_canvas_gestures_blocked_while_item_gesture_runs() {
        let mut editor = measured(CanvasOptions::circle());
        editor.toggle_edit_mode();
        let DropOutcome::Placed(id) = drop_at(&mut editor, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };

        assert!(editor.canvas_gestures_enabled());
        assert!(editor.begin_item_move(id));
        assert!(!editor.canvas_gestures_enabled());
        assert!(!editor.canvas_pan_update(Vec2::new(5.0, 5.0)));
        editor.end_item_move();
        assert!(editor.canvas_gestures_enabled());

        editor.set_picker_open(true);
        assert!(!editor.canvas_pinch_update(1.5));
        editor.set_picker_open(false);
        assert!(editor.canvas_pinch_update(1.5));
    }

    #[test]
    fn test_rotate_gated_by_options() {
        let mut editor = measured(CanvasOptions::rounded_rect());
        editor.toggle_edit_mode();
        let DropOutcome::Placed(id) = drop_at(&mut editor, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };
        assert!(editor.rotate_item(id));
        assert!((editor.item(id).unwrap().rotation_degrees - 90.0).abs() < f64::EPSILON);

        let mut fixed = measured(CanvasOptions::circle());
        fixed.toggle_edit_mode();
        let DropOutcome::Placed(id) = drop_at(&mut fixed, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };
        assert!(!fixed.rotate_item(id));
    }

    #[test]
    fn test_clear_all_is_atomic() {
        let mut editor = measured(CanvasOptions::circle());
        editor.toggle_edit_mode();
        let DropOutcome::Placed(id) = drop_at(&mut editor, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };
        drop_at(&mut editor, Point::new(200.0, 300.0));
        editor.select_item(id);
        editor.toggle_edit_mode();
        editor.focus_next_item();

        editor.clear_all();
        assert!(editor.items().is_empty());
        assert!(editor.selected_item().is_none());
        assert_eq!(editor.nav_index(), None);
        // And a subsequent focus starts from nothing.
        assert_eq!(editor.focus_next_item(), None);
    }

    #[test]
    fn test_toggle_edit_mode_clears_selection_and_focus() {
        let mut editor = measured(CanvasOptions::circle());
        editor.toggle_edit_mode();
        let DropOutcome::Placed(id) = drop_at(&mut editor, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };
        editor.select_item(id);
        editor.focus_next_item();
        assert_eq!(editor.nav_index(), Some(0));

        editor.toggle_edit_mode();
        assert!(editor.selected_item().is_none());
        assert_eq!(editor.nav_index(), None);
    }

    #[test]
    fn test_focus_next_cycles_placed_items() {
        let mut editor = measured(CanvasOptions::circle());
        editor.toggle_edit_mode();
        let DropOutcome::Placed(first) = drop_at(&mut editor, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };
        let DropOutcome::Placed(second) = drop_at(&mut editor, Point::new(200.0, 300.0)) else {
            panic!("expected drop to commit");
        };
        editor.toggle_edit_mode();

        assert_eq!(editor.focus_next_item(), Some(first));
        assert_eq!(editor.focus_next_item(), Some(second));
        assert_eq!(editor.focus_next_item(), Some(first));
        editor.clear_focus();
        assert_eq!(editor.focus_next_item(), Some(first));
    }

    #[test]
    fn test_remove_selected_and_open_detail() {
        struct Recorder(Option<PlacedId>);
        impl ScreenRouter for Recorder {
            fn open_item_detail(&mut self, item: &PlacedItem) {
                self.0 = Some(item.placed_id);
            }
        }

        let mut editor = measured(CanvasOptions::circle());
        editor.toggle_edit_mode();
        let DropOutcome::Placed(id) = drop_at(&mut editor, Point::new(150.0, 200.0)) else {
            panic!("expected drop to commit");
        };

        let mut router = Recorder(None);
        assert!(!editor.open_detail(&mut router));

        editor.select_item(id);
        assert!(editor.open_detail(&mut router));
        assert_eq!(router.0, Some(id));

        assert!(editor.remove_selected());
        assert!(editor.items().is_empty());
        assert!(!editor.remove_selected());
    }

    #[test]
    fn test_reset_view_returns_camera_home() {
        let mut editor = measured(CanvasOptions::circle());
        assert!(editor.canvas_pan_update(Vec2::new(80.0, -30.0)));
        editor.canvas_pan_end();
        assert!(editor.canvas_pinch_update(2.0));
        editor.canvas_pinch_end();

        editor.reset_view();
        settle(&mut editor);

        let t = editor.view_transform();
        assert!(t.translate.hypot() < 0.5);
        assert!((t.scale - 1.0).abs() < 0.05);
    }
}
