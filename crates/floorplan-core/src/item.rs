//! Placed item data type.

use crate::catalog::{CatalogId, CatalogItem};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Identifier of a placed item, unique for the life of its store.
pub type PlacedId = u64;

/// A catalog template instance that has been given a canvas-space position.
///
/// Positions are stored in unscaled canvas space, independent of the current
/// pan/zoom; `position` is the top-left corner of the item's footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub placed_id: PlacedId,
    pub catalog_id: CatalogId,
    pub color: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Top-left corner, canvas space.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, stepped by 90 and kept in `[0, 360)`.
    pub rotation_degrees: f64,
}

impl PlacedItem {
    pub(crate) fn from_template(
        template: &CatalogItem,
        placed_id: PlacedId,
        position: Point,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            placed_id,
            catalog_id: template.id,
            color: template.color.clone(),
            label: template.label.clone(),
            icon: template.icon.clone(),
            position,
            width,
            height,
            rotation_degrees: 0.0,
        }
    }

    /// Bounding rectangle in canvas space.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Center point in canvas space.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
