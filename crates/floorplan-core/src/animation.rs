//! Spring animation for camera moves and drag-tile feedback.
//!
//! Values are animated with a mass-spring-damper integration driven by the
//! host's frame ticks; nothing here blocks or schedules.

use crate::catalog::CatalogId;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Below these thresholds a spring snaps to its target and stops.
const POSITION_EPSILON: f64 = 0.05;
const VELOCITY_EPSILON: f64 = 0.05;

/// Mass-spring-damper coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 20.0,
            mass: 1.0,
        }
    }
}

/// A single spring-animated scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    params: SpringParams,
}

impl Spring {
    pub fn new(value: f64, params: SpringParams) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            params,
        }
    }

    /// Current animated value.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Start animating toward `target` from the current value.
    pub fn animate_to(&mut self, target: f64) {
        self.target = target;
    }

    /// Set the value immediately, without animation. Used by live gesture
    /// tracking where the pointer dictates the value directly.
    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Whether the spring has come to rest at its target.
    pub fn is_settled(&self) -> bool {
        (self.target - self.value).abs() < POSITION_EPSILON
            && self.velocity.abs() < VELOCITY_EPSILON
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }
        let displacement = self.target - self.value;
        let acceleration = (self.params.stiffness * displacement
            - self.params.damping * self.velocity)
            / self.params.mass;
        self.velocity += acceleration * dt;
        self.value += self.velocity * dt;
    }
}

/// Animated state of one sidebar tile: drag translation plus pickup scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSprings {
    pub offset_x: Spring,
    pub offset_y: Spring,
    pub scale: Spring,
}

impl DragSprings {
    fn new(params: SpringParams) -> Self {
        Self {
            offset_x: Spring::new(0.0, params),
            offset_y: Spring::new(0.0, params),
            scale: Spring::new(1.0, params),
        }
    }

    fn at_rest(&self) -> bool {
        self.offset_x.is_settled()
            && self.offset_y.is_settled()
            && self.scale.is_settled()
            && self.offset_x.target().abs() < POSITION_EPSILON
            && self.offset_y.target().abs() < POSITION_EPSILON
            && (self.scale.target() - 1.0).abs() < POSITION_EPSILON
    }
}

/// Owns one `DragSprings` per catalog item, created on demand and dropped
/// again once the tile has settled back into its slot.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    springs: HashMap<CatalogId, DragSprings>,
    params: SpringParams,
}

impl Animator {
    pub fn new(params: SpringParams) -> Self {
        Self {
            springs: HashMap::new(),
            params,
        }
    }

    /// Springs for a tile, creating them at the rest pose if absent.
    pub fn drag_mut(&mut self, id: CatalogId) -> &mut DragSprings {
        let params = self.params;
        self.springs.entry(id).or_insert_with(|| {
            log::trace!("creating drag springs for catalog item {id}");
            DragSprings::new(params)
        })
    }

    /// Drop the springs for a tile.
    pub fn remove(&mut self, id: CatalogId) {
        self.springs.remove(&id);
    }

    /// Current drag translation of a tile (zero when untouched).
    pub fn offset(&self, id: CatalogId) -> Vec2 {
        self.springs
            .get(&id)
            .map(|s| Vec2::new(s.offset_x.value(), s.offset_y.value()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Current pickup scale of a tile (1.0 when untouched).
    pub fn scale(&self, id: CatalogId) -> f64 {
        self.springs.get(&id).map(|s| s.scale.value()).unwrap_or(1.0)
    }

    /// Advance all springs and dispose of those back at rest.
    pub fn tick(&mut self, dt: f64) {
        for springs in self.springs.values_mut() {
            springs.offset_x.step(dt);
            springs.offset_y.step(dt);
            springs.scale.step(dt);
        }
        self.springs.retain(|_, s| !s.at_rest());
    }

    /// Whether every tile has settled back into its slot.
    pub fn is_idle(&self) -> bool {
        self.springs.is_empty()
    }
}
