//! Camera: pan/zoom transform and focus-on-item navigation.

use crate::animation::Spring;
use crate::item::{PlacedId, PlacedItem};
use crate::options::CanvasOptions;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// The pan offset and zoom scale applied when rendering canvas content.
///
/// Canvas-space point `p` renders at screen-local `p * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub translate: Vec2,
    pub scale: f64,
}

impl ViewTransform {
    /// No pan, no zoom.
    pub fn identity() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
        }
    }

    /// Convert a canvas-space point to drop-zone-local screen coordinates.
    pub fn apply(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.scale + self.translate.x,
            canvas.y * self.scale + self.translate.y,
        )
    }

    /// Convert a drop-zone-local screen point to canvas space.
    pub fn invert(&self, local: Point) -> Point {
        Point::new(
            (local.x - self.translate.x) / self.scale,
            (local.y - self.translate.y) / self.scale,
        )
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Owns the live view transform, its settled baselines, and the navigation
/// index for the "next item" camera animation.
///
/// Pan and pinch write the live springs directly (the pointer dictates the
/// value); focus and reset animate them. Baselines (`pan_offset`,
/// `scale_offset`) are the values gestures compose against: a pan adds its
/// translation to the baseline, a pinch multiplies it, and the baseline is
/// folded forward at gesture end. Focus and reset update the baselines
/// immediately when the animation target is set, not when it settles.
#[derive(Debug, Clone)]
pub struct CameraController {
    translate_x: Spring,
    translate_y: Spring,
    scale: Spring,
    pan_offset: Vec2,
    scale_offset: f64,
    nav_index: Option<usize>,
    min_zoom: f64,
    max_zoom: f64,
    focus_padding: f64,
    focus_scale: f64,
}

impl CameraController {
    pub fn new(options: &CanvasOptions) -> Self {
        Self {
            translate_x: Spring::new(0.0, options.spring),
            translate_y: Spring::new(0.0, options.spring),
            scale: Spring::new(1.0, options.spring),
            pan_offset: Vec2::ZERO,
            scale_offset: 1.0,
            nav_index: None,
            min_zoom: options.min_zoom,
            max_zoom: options.max_zoom,
            focus_padding: options.focus_padding,
            focus_scale: options.focus_scale,
        }
    }

    /// The live transform, sampled from the springs.
    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            translate: Vec2::new(self.translate_x.value(), self.translate_y.value()),
            scale: self.scale.value(),
        }
    }

    /// Track a pan gesture: live translate = baseline + gesture delta.
    pub fn pan_update(&mut self, delta: Vec2) {
        self.translate_x.snap_to(self.pan_offset.x + delta.x);
        self.translate_y.snap_to(self.pan_offset.y + delta.y);
    }

    /// Fold the live translation into the baseline at pan end.
    pub fn pan_end(&mut self) {
        self.pan_offset = Vec2::new(self.translate_x.value(), self.translate_y.value());
    }

    /// Track a pinch gesture. The factor multiplies the pre-gesture
    /// baseline, not the live value, so repeated pinches compose correctly;
    /// the result is clamped to the zoom range.
    pub fn pinch_update(&mut self, factor: f64) {
        self.scale
            .snap_to((self.scale_offset * factor).clamp(self.min_zoom, self.max_zoom));
    }

    /// Fold the live scale into the baseline at pinch end.
    pub fn pinch_end(&mut self) {
        self.scale_offset = self.scale.value();
    }

    /// Animate the transform so `item`'s center lands on the center of the
    /// visible canvas area (the drop zone minus header and padding), at the
    /// focus zoom level.
    pub fn focus_on(&mut self, item: &PlacedItem, drop_zone: Rect, header_height: f64) {
        let visible_width = drop_zone.width() - 2.0 * self.focus_padding;
        let visible_height = drop_zone.height() - header_height - 2.0 * self.focus_padding;
        let visible_center = Point::new(visible_width / 2.0, visible_height / 2.0);

        let item_center = item.center();
        let target = Vec2::new(
            visible_center.x - item_center.x * self.focus_scale,
            visible_center.y - item_center.y * self.focus_scale,
        );

        log::debug!(
            "focusing item #{} -> translate ({:.1}, {:.1})",
            item.placed_id,
            target.x,
            target.y
        );
        self.translate_x.animate_to(target.x);
        self.translate_y.animate_to(target.y);
        self.scale.animate_to(self.focus_scale);

        // Baselines take the target immediately so a pan that begins before
        // the animation settles composes against the destination.
        self.pan_offset = target;
        self.scale_offset = self.focus_scale;
    }

    /// Advance the navigation index cyclically and focus the resulting item.
    /// No-op when `items` is empty. The index advances even when the drop
    /// zone has not been measured yet; only the camera move is skipped.
    pub fn advance_to_next(
        &mut self,
        items: &[PlacedItem],
        drop_zone: Option<Rect>,
        header_height: f64,
    ) -> Option<PlacedId> {
        if items.is_empty() {
            return None;
        }
        let next = match self.nav_index {
            Some(index) => (index + 1) % items.len(),
            None => 0,
        };
        self.nav_index = Some(next);
        let item = &items[next];
        if let Some(zone) = drop_zone {
            self.focus_on(item, zone, header_height);
        }
        Some(item.placed_id)
    }

    /// Index of the item currently focused by navigation, if any.
    pub fn nav_index(&self) -> Option<usize> {
        self.nav_index
    }

    /// Drop the navigation index without moving the camera.
    pub fn clear_focus(&mut self) {
        self.nav_index = None;
    }

    /// Animate back to the identity transform and clear navigation.
    pub fn reset(&mut self) {
        self.translate_x.animate_to(0.0);
        self.translate_y.animate_to(0.0);
        self.scale.animate_to(1.0);
        self.pan_offset = Vec2::ZERO;
        self.scale_offset = 1.0;
        self.nav_index = None;
    }

    /// Advance the transform springs by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.translate_x.step(dt);
        self.translate_y.step(dt);
        self.scale.step(dt);
    }

    /// Whether all transform springs are at rest.
    pub fn is_settled(&self) -> bool {
        self.translate_x.is_settled() && self.translate_y.is_settled() && self.scale.is_settled()
    }
}
