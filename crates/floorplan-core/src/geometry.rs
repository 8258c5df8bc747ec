//! Pure coordinate math for drag, drop, and resize.
//!
//! Three coordinate frames meet here:
//!
//! - **sidebar space**: drag deltas relative to a tile's resting slot in the
//!   sidebar grid;
//! - **screen space**: positions as reported by pointer events and layout
//!   measurement;
//! - **canvas space**: the fixed, unscaled frame item positions are stored
//!   in, independent of the current pan/zoom.
//!
//! Every function is pure; callers own all state.

use crate::camera::ViewTransform;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Placement of the sidebar's tile grid within its measured rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SidebarGrid {
    /// Offset of the first slot from the sidebar's top-left corner.
    pub origin: Vec2,
    /// Distance between adjacent slots, both axes.
    pub cell_pitch: f64,
    /// Slots per row before wrapping.
    pub items_per_row: usize,
}

/// Resting screen position of the sidebar slot at `index`.
pub fn sidebar_slot_position(sidebar: Rect, grid: &SidebarGrid, index: usize) -> Point {
    let per_row = grid.items_per_row.max(1);
    let col = (index % per_row) as f64;
    let row = (index / per_row) as f64;
    Point::new(
        sidebar.x0 + grid.origin.x + col * grid.cell_pitch,
        sidebar.y0 + grid.origin.y + row * grid.cell_pitch,
    )
}

/// Live screen position of a sidebar tile being dragged: its resting slot
/// plus the gesture's translation.
pub fn drag_handle_position(
    sidebar: Rect,
    grid: &SidebarGrid,
    index: usize,
    drag_delta: Vec2,
) -> Point {
    sidebar_slot_position(sidebar, grid, index) + drag_delta
}

/// Whether the full `footprint` anchored at `screen_pos` (top-left) lies
/// inside the drop zone. A partially overlapping footprint does not count.
pub fn is_within_drop_zone(screen_pos: Point, footprint: Size, drop_zone: Rect) -> bool {
    screen_pos.x >= drop_zone.x0
        && screen_pos.x + footprint.width <= drop_zone.x1
        && screen_pos.y >= drop_zone.y0
        && screen_pos.y + footprint.height <= drop_zone.y1
}

/// Convert a screen-space point to canvas space.
///
/// Subtracts the drop zone's origin and the header strip, then inverts the
/// view transform: `canvas = (local - translate) / scale`. Stored item
/// coordinates are always unscaled canvas space while gestures report screen
/// space, so every placement and resize computation funnels through this
/// inversion.
pub fn screen_to_canvas(
    screen_pos: Point,
    drop_zone: Rect,
    header_height: f64,
    transform: &ViewTransform,
) -> Point {
    let local = Point::new(
        screen_pos.x - drop_zone.x0,
        screen_pos.y - drop_zone.y0 - header_height,
    );
    Point::new(
        (local.x - transform.translate.x) / transform.scale,
        (local.y - transform.translate.y) / transform.scale,
    )
}

/// Offset that re-anchors a drop point from an item's top-left corner to its
/// center, so the item lands centered on the release point.
pub fn center_offset(footprint: Size) -> Vec2 {
    Vec2::new(-footprint.width / 2.0, -footprint.height / 2.0)
}

/// Clamp a canvas-space position to `[0, bound]` on both axes.
pub fn clamp_position(pos: Point, bound: f64) -> Point {
    Point::new(pos.x.clamp(0.0, bound), pos.y.clamp(0.0, bound))
}

/// Corner handles of a placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeCorner {
    pub const ALL: [ResizeCorner; 4] = [
        ResizeCorner::TopLeft,
        ResizeCorner::TopRight,
        ResizeCorner::BottomLeft,
        ResizeCorner::BottomRight,
    ];

    /// Position of this corner on a bounding rectangle.
    pub fn position_on(&self, bounds: Rect) -> Point {
        match self {
            ResizeCorner::TopLeft => Point::new(bounds.x0, bounds.y0),
            ResizeCorner::TopRight => Point::new(bounds.x1, bounds.y0),
            ResizeCorner::BottomLeft => Point::new(bounds.x0, bounds.y1),
            ResizeCorner::BottomRight => Point::new(bounds.x1, bounds.y1),
        }
    }
}

/// A position-plus-size rectangle, the unit of resize computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemFrame {
    /// Top-left corner, canvas space.
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

/// Resize `start` by a canvas-space `delta` dragged from `corner`, holding
/// the opposite corner fixed.
///
/// The minimum-size floor is applied to width/height first and the moving
/// edge is recomputed from the clamped size, so the anchored corner stays
/// exactly in place even when the floor binds.
pub fn resize_from_corner(
    start: ItemFrame,
    corner: ResizeCorner,
    delta: Vec2,
    min_size: f64,
) -> ItemFrame {
    let right = start.position.x + start.width;
    let bottom = start.position.y + start.height;

    let (width, height, x, y) = match corner {
        ResizeCorner::TopLeft => {
            let width = (start.width - delta.x).max(min_size);
            let height = (start.height - delta.y).max(min_size);
            (width, height, right - width, bottom - height)
        }
        ResizeCorner::TopRight => {
            let width = (start.width + delta.x).max(min_size);
            let height = (start.height - delta.y).max(min_size);
            (width, height, start.position.x, bottom - height)
        }
        ResizeCorner::BottomLeft => {
            let width = (start.width - delta.x).max(min_size);
            let height = (start.height + delta.y).max(min_size);
            (width, height, right - width, start.position.y)
        }
        ResizeCorner::BottomRight => {
            let width = (start.width + delta.x).max(min_size);
            let height = (start.height + delta.y).max(min_size);
            (width, height, start.position.x, start.position.y)
        }
    };

    ItemFrame {
        position: Point::new(x, y),
        width,
        height,
    }
}
