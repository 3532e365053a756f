//! Piranha Dodge - A side-scrolling fish arcade game
//!
//! Core modules:
//! - `sim`: Simulation loop (spawning, movement, collisions, scoring)
//! - `renderer`: Platform-neutral draw list built from game state
//! - `platform`: Browser/native abstraction (input latching, frame scheduling)
//! - `settings`: Presentation preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Preference, Settings, TouchControls};

/// Game configuration constants
pub mod consts {
    /// Hook challenge labels, drawn uniformly at spawn
    pub const HOOK_CHALLENGES: [&str; 10] = [
        "YT-neuvottelut",
        "Burnout",
        "Korona",
        "Palkkataso",
        "Henkilöstöpula",
        "Ylityöt",
        "Työvuorolistat",
        "Sijaisuudet",
        "Resurssipula",
        "Leikkaukset",
    ];

    /// Food colors (CSS hex), drawn uniformly at spawn
    pub const FOOD_COLORS: [&str; 8] = [
        "#FF5A79", // Pink
        "#7A2E8E", // Purple
        "#051C44", // Navy
        "#FF9800", // Orange
        "#8B5CF6", // Vivid purple
        "#D946EF", // Magenta
        "#F97316", // Bright orange
        "#0EA5E9", // Ocean blue
    ];

    /// Movement and collision only run on every Nth frame
    pub const PROCESS_EVERY_N_FRAMES: u64 = 2;

    /// Fish defaults (box at size 1.0)
    pub const FISH_WIDTH: f32 = 60.0;
    pub const FISH_HEIGHT: f32 = 40.0;
    /// Pixels per processed tick per held direction
    pub const FISH_MOVE_STEP: f32 = 5.0;
    pub const FISH_MIN_SIZE: f32 = 1.0;
    pub const FISH_MAX_SIZE: f32 = 1.5;
    pub const FISH_GROWTH_STEP: f32 = 0.1;
    /// Fish grows once every this many food items
    pub const FOOD_PER_GROWTH: u32 = 5;

    /// Hook box
    pub const HOOK_WIDTH: f32 = 60.0;
    pub const HOOK_HEIGHT: f32 = 80.0;
    /// Vertical spawn band is `height - HOOK_SPAWN_MARGIN`
    pub const HOOK_SPAWN_MARGIN: f32 = 100.0;
    /// Hooks are dropped once x <= -HOOK_CULL_DISTANCE (label tag hangs left of the hook)
    pub const HOOK_CULL_DISTANCE: f32 = 100.0;
    pub const HOOK_BASE_SPEED: f32 = 2.0;
    pub const HOOK_SPEED_PER_LEVEL: f32 = 0.5;

    /// Food box
    pub const FOOD_SIZE: f32 = 30.0;
    pub const FOOD_SPEED: f32 = 3.0;
    /// Fish-center to food-center distance that counts as eating (scaled by fish size)
    pub const FOOD_EAT_RADIUS: f32 = 25.0;

    /// Spawn intervals (ms): max(base - per_level * difficulty, floor)
    pub const HOOK_SPAWN_BASE_MS: f64 = 2000.0;
    pub const HOOK_SPAWN_PER_LEVEL_MS: f64 = 100.0;
    pub const HOOK_SPAWN_FLOOR_MS: f64 = 1000.0;
    pub const FOOD_SPAWN_BASE_MS: f64 = 1500.0;
    pub const FOOD_SPAWN_PER_LEVEL_MS: f64 = 50.0;
    pub const FOOD_SPAWN_FLOOR_MS: f64 = 800.0;

    /// Scoring
    pub const FOOD_REWARD: u64 = 10;
    pub const SURVIVAL_REWARD: u64 = 1;
    /// Difficulty goes up each time the score crosses a multiple of this
    pub const DIFFICULTY_SCORE_STEP: u64 = 500;
    pub const MIN_DIFFICULTY: u32 = 1;
    pub const MAX_DIFFICULTY: u32 = 10;

    /// Animation flag durations (ms)
    pub const EATING_DURATION_MS: f64 = 200.0;
    pub const GROWING_DURATION_MS: f64 = 800.0;
}
