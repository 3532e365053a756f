//! Shape generation for game entities

use glam::Vec2;

use super::Shape;
use crate::consts::*;
use crate::sim::{Facing, Fish, Food, Hook};

const FISH_BODY: &str = "#FF5A79";
const FISH_FIN: &str = "#C81E4B";
const FISH_GLOW: &str = "rgba(255, 255, 255, 0.35)";
const EYE_WHITE: &str = "#FFFFFF";
const EYE_PUPIL: &str = "#051C44";
const HOOK_LINE: &str = "#9CA3AF";
const HOOK_METAL: &str = "#666666";
const TAG_BORDER: &str = "#EF4444";
const TAG_FILL: &str = "#FFFFFF";
const TAG_TEXT: &str = "#DC2626";
const FOOD_HIGHLIGHT: &str = "rgba(255, 255, 255, 0.8)";

/// Food wiggle amplitude (px) and period (ms)
const WIGGLE_AMPLITUDE: f32 = 3.0;
const WIGGLE_PERIOD_MS: f64 = 900.0;

/// Fish: tail, body, eye. Growing fish get a glow behind them.
pub fn fish<'a>(fish: &Fish, reduced_motion: bool) -> Vec<Shape<'a>> {
    let center = fish.center();
    let half = Vec2::new(fish.width(), fish.height()) / 2.0;
    // +1 toward the head
    let dir = match fish.facing {
        Facing::Right => 1.0,
        Facing::Left => -1.0,
    };

    let mut shapes = Vec::with_capacity(6);
    if fish.growing && !reduced_motion {
        shapes.push(Shape::Ellipse {
            center,
            radii: half * 1.3,
            fill: FISH_GLOW,
        });
    }

    let tail_root = center - Vec2::new(dir * half.x * 0.6, 0.0);
    let tail_tip = center - Vec2::new(dir * half.x, 0.0);
    shapes.push(Shape::Triangle {
        points: [
            tail_root,
            tail_tip - Vec2::new(0.0, half.y * 0.8),
            tail_tip + Vec2::new(0.0, half.y * 0.8),
        ],
        fill: FISH_FIN,
    });
    // Eating squashes the body a little
    let squash = if fish.eating { 0.85 } else { 1.0 };
    shapes.push(Shape::Ellipse {
        center: center + Vec2::new(dir * half.x * 0.1, 0.0),
        radii: Vec2::new(half.x * 0.75, half.y * 0.8 * squash),
        fill: FISH_BODY,
    });

    let eye = center + Vec2::new(dir * half.x * 0.45, -half.y * 0.25);
    let eye_r = 4.0 * fish.size;
    shapes.push(Shape::Circle {
        center: eye,
        radius: eye_r,
        fill: EYE_WHITE,
        stroke: None,
    });
    shapes.push(Shape::Circle {
        center: eye + Vec2::new(dir * eye_r * 0.3, 0.0),
        radius: eye_r * 0.5,
        fill: EYE_PUPIL,
        stroke: None,
    });
    shapes
}

/// Hook: line from the surface, the hook itself, and the label tag below
pub fn hook(hook: &Hook) -> Vec<Shape<'_>> {
    let mid_x = hook.pos.x + HOOK_WIDTH / 2.0;
    let eye = Vec2::new(mid_x, hook.pos.y + HOOK_HEIGHT * 0.3);
    let bend = Vec2::new(mid_x, hook.pos.y + HOOK_HEIGHT * 0.55);
    let barb = Vec2::new(hook.pos.x + HOOK_WIDTH * 0.15, hook.pos.y + HOOK_HEIGHT * 0.45);
    let tag_top = hook.pos.y + HOOK_HEIGHT * 0.65;
    let tag_size = Vec2::new(128.0, 22.0);
    let tag_pos = Vec2::new(mid_x - tag_size.x / 2.0, tag_top);

    vec![
        Shape::Line {
            from: Vec2::new(mid_x, 0.0),
            to: eye,
            width: 2.0,
            color: HOOK_LINE,
        },
        Shape::Line {
            from: eye,
            to: bend,
            width: 3.0,
            color: HOOK_METAL,
        },
        Shape::Line {
            from: bend,
            to: barb,
            width: 3.0,
            color: HOOK_METAL,
        },
        Shape::Rect {
            pos: tag_pos - Vec2::splat(2.0),
            size: tag_size + Vec2::splat(4.0),
            fill: TAG_BORDER,
        },
        Shape::Rect {
            pos: tag_pos,
            size: tag_size,
            fill: TAG_FILL,
        },
        Shape::Text {
            pos: tag_pos + tag_size / 2.0,
            text: &hook.challenge,
            size: 12.0,
            color: TAG_TEXT,
        },
    ]
}

/// Food pellet with a highlight. `wiggle_time` bobs it up and down.
pub fn food(food: &Food, wiggle_time: Option<f64>) -> Vec<Shape<'_>> {
    let offset = wiggle_time
        .map(|t| {
            let phase = (t / WIGGLE_PERIOD_MS + food.id as f64 * 0.37) * std::f64::consts::TAU;
            phase.sin() as f32 * WIGGLE_AMPLITUDE
        })
        .unwrap_or(0.0);
    let center = food.center() + Vec2::new(0.0, offset);
    let radius = FOOD_SIZE / 2.0;

    vec![
        Shape::Circle {
            center,
            radius,
            fill: &food.color,
            stroke: Some(EYE_WHITE),
        },
        Shape::Circle {
            center: center - Vec2::new(radius * 0.3, radius * 0.3),
            radius: radius * 0.25,
            fill: FOOD_HIGHLIGHT,
            stroke: None,
        },
    ]
}
