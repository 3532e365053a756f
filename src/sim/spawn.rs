//! Hook and food spawning
//!
//! Spawn timing runs on wall-clock milliseconds so it is unaffected by how
//! many frames get processed.

use glam::Vec2;
use rand::Rng;

use super::state::{Food, GameState, Hook};
use crate::consts::*;

/// Milliseconds between hook spawns at the given difficulty
pub fn hook_interval_ms(difficulty: u32) -> f64 {
    (HOOK_SPAWN_BASE_MS - HOOK_SPAWN_PER_LEVEL_MS * difficulty as f64).max(HOOK_SPAWN_FLOOR_MS)
}

/// Milliseconds between food spawns at the given difficulty
pub fn food_interval_ms(difficulty: u32) -> f64 {
    (FOOD_SPAWN_BASE_MS - FOOD_SPAWN_PER_LEVEL_MS * difficulty as f64).max(FOOD_SPAWN_FLOOR_MS)
}

/// Hook speed (pixels per processed tick) for hooks spawned at this difficulty
pub fn hook_speed(difficulty: u32) -> f32 {
    HOOK_BASE_SPEED + HOOK_SPEED_PER_LEVEL * difficulty as f32
}

/// Random y in [0, band), or 0 when the area is too short for a band
fn random_y(state: &mut GameState, margin: f32) -> f32 {
    let band = state.area.height - margin;
    if band > 0.0 {
        state.rng_mut().random_range(0.0..band)
    } else {
        0.0
    }
}

/// Spawn a hook if its interval has elapsed. Returns true if one spawned.
pub fn maybe_spawn_hook(state: &mut GameState, now_ms: f64) -> bool {
    if now_ms - state.last_hook_spawn_ms <= hook_interval_ms(state.difficulty) {
        return false;
    }

    let y = random_y(state, HOOK_SPAWN_MARGIN);
    let pick = state.rng_mut().random_range(0..HOOK_CHALLENGES.len());
    let hook = Hook {
        id: state.next_entity_id(),
        pos: Vec2::new(state.area.width, y),
        challenge: HOOK_CHALLENGES[pick].to_string(),
        speed: hook_speed(state.difficulty),
    };
    log::debug!("Hook {} '{}' at y={:.0}", hook.id, hook.challenge, y);
    state.hooks.push(hook);
    state.last_hook_spawn_ms = now_ms;
    true
}

/// Spawn a food pellet if its interval has elapsed. Returns true if one spawned.
pub fn maybe_spawn_food(state: &mut GameState, now_ms: f64) -> bool {
    if now_ms - state.last_food_spawn_ms <= food_interval_ms(state.difficulty) {
        return false;
    }

    let y = random_y(state, FOOD_SIZE);
    let pick = state.rng_mut().random_range(0..FOOD_COLORS.len());
    let food = Food {
        id: state.next_entity_id(),
        pos: Vec2::new(state.area.width, y),
        color: FOOD_COLORS[pick].to_string(),
        eaten: false,
    };
    log::debug!("Food {} {} at y={:.0}", food.id, food.color, y);
    state.food.push(food);
    state.last_food_spawn_ms = now_ms;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervals_shrink_to_floor() {
        assert_eq!(hook_interval_ms(1), 1900.0);
        assert_eq!(hook_interval_ms(5), 1500.0);
        assert_eq!(hook_interval_ms(10), 1000.0);
        assert_eq!(food_interval_ms(1), 1450.0);
        assert_eq!(food_interval_ms(10), 1000.0);
        // Floors hold even past the difficulty cap
        assert_eq!(hook_interval_ms(50), HOOK_SPAWN_FLOOR_MS);
        assert_eq!(food_interval_ms(50), FOOD_SPAWN_FLOOR_MS);
        for level in 1..MAX_DIFFICULTY {
            assert!(hook_interval_ms(level + 1) <= hook_interval_ms(level));
            assert!(food_interval_ms(level + 1) <= food_interval_ms(level));
        }
    }

    #[test]
    fn test_hook_spawns_after_interval() {
        let mut state = GameState::with_area(42, 800.0, 500.0);
        state.start(0.0);

        // Exactly at the interval is not "exceeded"
        assert!(!maybe_spawn_hook(&mut state, 1900.0));
        assert!(state.hooks.is_empty());

        assert!(maybe_spawn_hook(&mut state, 1901.0));
        assert_eq!(state.hooks.len(), 1);
        let hook = &state.hooks[0];
        assert_eq!(hook.pos.x, 800.0);
        assert!(hook.pos.y >= 0.0 && hook.pos.y < 400.0);
        assert!(HOOK_CHALLENGES.contains(&hook.challenge.as_str()));
        assert_eq!(hook.speed, 2.5);
        assert_eq!(state.last_hook_spawn_ms, 1901.0);

        // Timer restarted
        assert!(!maybe_spawn_hook(&mut state, 2500.0));
    }

    #[test]
    fn test_food_spawns_after_interval() {
        let mut state = GameState::with_area(42, 800.0, 500.0);
        state.start(0.0);
        assert!(!maybe_spawn_food(&mut state, 1000.0));
        assert!(maybe_spawn_food(&mut state, 1451.0));
        let food = &state.food[0];
        assert_eq!(food.pos.x, 800.0);
        assert!(food.pos.y >= 0.0 && food.pos.y < 470.0);
        assert!(FOOD_COLORS.contains(&food.color.as_str()));
        assert!(!food.eaten);
    }

    #[test]
    fn test_spawn_ids_are_unique() {
        let mut state = GameState::with_area(9, 800.0, 500.0);
        state.start(0.0);
        let mut now = 0.0;
        for _ in 0..20 {
            now += 2000.0;
            maybe_spawn_hook(&mut state, now);
            maybe_spawn_food(&mut state, now);
        }
        let mut ids: Vec<u32> = state
            .hooks
            .iter()
            .map(|h| h.id)
            .chain(state.food.iter().map(|f| f.id))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 40);
    }

    #[test]
    fn test_short_area_spawns_at_top() {
        let mut state = GameState::with_area(1, 800.0, 50.0);
        state.start(0.0);
        assert!(maybe_spawn_hook(&mut state, 5000.0));
        assert_eq!(state.hooks[0].pos.y, 0.0);
    }
}
