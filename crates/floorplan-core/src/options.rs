//! Engine configuration.

use crate::animation::SpringParams;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Visual footprint of placed items. The core only carries this through to
/// the host renderer; it does not change any geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemShape {
    #[default]
    RoundedRect,
    Circle,
}

/// Configuration for one canvas editor instance.
///
/// One parameterized engine covers every canvas variant; the presets below
/// are the two shipped configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasOptions {
    /// Footprint shape hint for the host renderer.
    pub item_shape: ItemShape,
    /// Whether corner-handle resizing is available.
    pub allow_resize: bool,
    /// Whether 90-degree rotation stepping is available.
    pub allow_rotate: bool,
    /// Whether a catalog item may be placed more than once.
    pub allow_catalog_reuse: bool,
    /// Side length of the square canvas plane, in canvas units.
    pub canvas_extent: f64,
    /// Upper clamp for item x/y positions. Items can never be placed or
    /// dragged outside `[0, placement_bound]` on either axis.
    pub placement_bound: f64,
    /// Minimum width/height a resize may shrink an item to.
    pub min_item_size: f64,
    /// Width/height assigned to a freshly dropped item.
    pub default_item_size: f64,
    /// Side length of a sidebar tile, used for the drop-zone containment
    /// test while dragging out of the sidebar.
    pub tile_size: f64,
    /// Offset of the first sidebar grid slot from the sidebar origin.
    pub sidebar_origin: Vec2,
    /// Distance between adjacent sidebar grid slots, both axes.
    pub sidebar_cell_pitch: f64,
    /// Number of sidebar slots per grid row.
    pub sidebar_items_per_row: usize,
    /// Height of the canvas header strip inside the drop zone.
    pub header_height: f64,
    /// Padding subtracted from the drop zone when computing the visible
    /// center for focus navigation.
    pub focus_padding: f64,
    /// Zoom level the camera animates to when focusing an item.
    pub focus_scale: f64,
    /// Minimum zoom scale.
    pub min_zoom: f64,
    /// Maximum zoom scale.
    pub max_zoom: f64,
    /// Spring parameters for camera and drag-tile animations.
    pub spring: SpringParams,
}

impl CanvasOptions {
    /// Rounded-rectangle preset: 100x100 items with a 50-unit floor,
    /// resize and rotate enabled, catalog items single-use.
    pub fn rounded_rect() -> Self {
        Self {
            item_shape: ItemShape::RoundedRect,
            allow_resize: true,
            allow_rotate: true,
            allow_catalog_reuse: false,
            canvas_extent: 2000.0,
            placement_bound: 1900.0,
            min_item_size: 50.0,
            default_item_size: 100.0,
            tile_size: 70.0,
            sidebar_origin: Vec2::new(20.0, 80.0),
            sidebar_cell_pitch: 80.0,
            sidebar_items_per_row: 4,
            header_height: 60.0,
            focus_padding: 16.0,
            focus_scale: 1.0,
            min_zoom: 0.5,
            max_zoom: 3.0,
            spring: SpringParams::default(),
        }
    }

    /// Circle preset: fixed 70x70 items, no resize or rotate, catalog
    /// items reusable.
    pub fn circle() -> Self {
        Self {
            item_shape: ItemShape::Circle,
            allow_resize: false,
            allow_rotate: false,
            allow_catalog_reuse: true,
            min_item_size: 30.0,
            default_item_size: 70.0,
            placement_bound: 1930.0,
            ..Self::rounded_rect()
        }
    }
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self::rounded_rect()
    }
}
