//! Collision detection
//!
//! Hooks use axis-aligned box overlap. Food uses a center-distance check
//! whose radius scales with the fish, so a bigger fish eats from further away.

use glam::Vec2;

use super::state::{Fish, Food, Hook};
use crate::consts::FOOD_EAT_RADIUS;

/// Axis-aligned bounding box (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// True if the two centers are closer than `radius`
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Index of the first uneaten food the fish can reach, in list order
pub fn fish_eats_food(fish: &Fish, food: &[Food]) -> Option<usize> {
    let center = fish.center();
    let radius = FOOD_EAT_RADIUS * fish.size;
    food.iter().position(|f| !f.eaten && within_radius(center, f.center(), radius))
}

/// Index of the first hook whose box overlaps the fish
pub fn fish_hits_hook(fish: &Fish, hooks: &[Hook]) -> Option<usize> {
    let bounds = fish.bounds();
    hooks.iter().position(|h| bounds.overlaps(&h.bounds()))
}
