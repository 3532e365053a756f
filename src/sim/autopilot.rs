//! Demo-mode steering
//!
//! Dodges the nearest hook coming at the fish, otherwise chases the closest
//! food. Good enough to keep a demo run alive for a while, not to win.

use glam::Vec2;

use super::state::{Fish, GameState, Hook};
use super::tick::TickInput;
use crate::consts::*;

/// How far ahead of the fish a hook counts as a threat
const LOOKAHEAD: f32 = 180.0;
/// Extra vertical clearance kept around the fish
const CLEARANCE: f32 = 20.0;

/// Pick directions for this tick
pub fn steer(state: &GameState) -> TickInput {
    let fish = &state.fish;
    let mut input = TickInput::default();

    if let Some(hook) = nearest_threat(fish, &state.hooks) {
        let hook_mid = hook.pos.y + HOOK_HEIGHT / 2.0;
        let fish_mid = fish.center().y;
        let room_above = fish.pos.y;
        let room_below = state.area.height - (fish.pos.y + fish.height());
        // Dodge away from the hook's middle unless pinned against an edge
        let go_up = if fish_mid < hook_mid {
            room_above > FISH_MOVE_STEP || room_below <= FISH_MOVE_STEP
        } else {
            room_below <= FISH_MOVE_STEP
        };
        input.up = go_up;
        input.down = !go_up;
        input.left = true;
        return input;
    }

    let center = fish.center();
    let target = state
        .food
        .iter()
        .filter(|f| f.center().x + FOOD_SIZE > fish.pos.x)
        .map(|f| f.center())
        .min_by(|a, b| {
            a.distance_squared(center)
                .partial_cmp(&b.distance_squared(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or_else(|| {
            // Nothing to chase, drift home
            Fish::start_position(state.area) + Vec2::new(fish.width(), fish.height()) / 2.0
        });

    let delta = target - center;
    input.left = delta.x < -FISH_MOVE_STEP;
    input.right = delta.x > FISH_MOVE_STEP;
    input.up = delta.y < -FISH_MOVE_STEP;
    input.down = delta.y > FISH_MOVE_STEP;
    input
}

/// Closest hook that is ahead of the fish and overlaps its lane
fn nearest_threat<'a>(fish: &Fish, hooks: &'a [Hook]) -> Option<&'a Hook> {
    let top = fish.pos.y - CLEARANCE;
    let bottom = fish.pos.y + fish.height() + CLEARANCE;
    let front = fish.pos.x + fish.width();

    hooks
        .iter()
        .filter(|h| h.pos.x + HOOK_WIDTH > fish.pos.x && h.pos.x < front + LOOKAHEAD)
        .filter(|h| h.pos.y < bottom && h.pos.y + HOOK_HEIGHT > top)
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Food, Hook};

    fn state() -> GameState {
        let mut state = GameState::with_area(1, 800.0, 500.0);
        state.start(0.0);
        state
    }

    #[test]
    fn test_dodges_hook_ahead() {
        let mut state = state();
        // Fish at (200, 250); hook slightly below the fish's middle
        state.hooks.push(Hook {
            id: 1,
            pos: Vec2::new(300.0, 240.0),
            challenge: "Korona".to_string(),
            speed: 2.5,
        });
        let input = steer(&state);
        assert!(input.up);
        assert!(!input.down);
        assert!(input.left);
    }

    #[test]
    fn test_dodges_down_when_pinned_at_top() {
        let mut state = state();
        state.fish.pos = Vec2::new(200.0, 0.0);
        state.hooks.push(Hook {
            id: 1,
            pos: Vec2::new(280.0, 10.0),
            challenge: "Burnout".to_string(),
            speed: 2.5,
        });
        let input = steer(&state);
        assert!(input.down);
        assert!(!input.up);
    }

    #[test]
    fn test_ignores_hooks_behind_or_far() {
        let mut state = state();
        state.hooks.push(Hook {
            id: 1,
            pos: Vec2::new(50.0, 250.0),
            challenge: "Ylityöt".to_string(),
            speed: 2.5,
        });
        state.hooks.push(Hook {
            id: 2,
            pos: Vec2::new(700.0, 250.0),
            challenge: "Palkkataso".to_string(),
            speed: 2.5,
        });
        let input = steer(&state);
        // At home with nothing to chase
        assert!(!input.any());
    }

    #[test]
    fn test_chases_food() {
        let mut state = state();
        state.food.push(Food {
            id: 1,
            pos: Vec2::new(500.0, 100.0),
            color: FOOD_COLORS[0].to_string(),
            eaten: false,
        });
        let input = steer(&state);
        assert!(input.right);
        assert!(input.up);
        assert!(!input.left);
        assert!(!input.down);
    }
}
