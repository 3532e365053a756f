//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM,
//! the clock or the renderer:
//! - Wall-clock time is passed in by the caller
//! - Seeded RNG only
//! - Entities are kept in spawn order

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, fish_eats_food, fish_hits_hook};
pub use spawn::{food_interval_ms, hook_interval_ms, hook_speed};
pub use state::{Facing, Fish, Food, GameEvent, GamePhase, GameState, Hook, PlayArea};
pub use tick::{TickInput, tick};
