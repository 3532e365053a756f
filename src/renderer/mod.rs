//! Rendering module
//!
//! Builds a flat list of 2D primitives from the game state each frame. The
//! browser host replays it onto a canvas 2d context; tests inspect it directly.

pub mod shapes;

use glam::Vec2;

use crate::sim::{GamePhase, GameState};

/// Water background
pub const BACKGROUND: &str = "#0B3B5C";

/// One drawing primitive. Colors are CSS color strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'a> {
    Rect {
        pos: Vec2,
        size: Vec2,
        fill: &'a str,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: &'a str,
        stroke: Option<&'a str>,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        fill: &'a str,
    },
    Triangle {
        points: [Vec2; 3],
        fill: &'a str,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: &'a str,
    },
    /// Centered text
    Text {
        pos: Vec2,
        text: &'a str,
        size: f32,
        color: &'a str,
    },
}

/// Draw list for one frame, back to front
#[derive(Debug, Default)]
pub struct Scene<'a> {
    pub shapes: Vec<Shape<'a>>,
}

impl<'a> Scene<'a> {
    /// Build the frame. `time_ms` drives idle animations (skipped with reduced motion).
    pub fn build(state: &'a GameState, time_ms: f64, reduced_motion: bool) -> Self {
        let mut list = Vec::with_capacity(8 + state.hooks.len() * 6 + state.food.len() * 2);
        list.push(Shape::Rect {
            pos: Vec2::ZERO,
            size: Vec2::new(state.area.width, state.area.height),
            fill: BACKGROUND,
        });

        // The title screen shows only water
        if state.phase == GamePhase::Idle {
            return Self { shapes: list };
        }

        let wiggle_time = if reduced_motion { None } else { Some(time_ms) };
        for food in &state.food {
            list.extend(shapes::food(food, wiggle_time));
        }
        for hook in &state.hooks {
            list.extend(shapes::hook(hook));
        }
        list.extend(shapes::fish(&state.fish, reduced_motion));

        Self { shapes: list }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
