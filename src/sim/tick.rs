//! Per-frame simulation tick
//!
//! Order within a tick: animations, fish movement, spawning, scrolling and
//! culling, food check, hook check, survival score and difficulty. Each step
//! reads what the previous step wrote.

use glam::Vec2;

use super::autopilot;
use super::collision::{fish_eats_food, fish_hits_hook};
use super::spawn::{maybe_spawn_food, maybe_spawn_hook};
use super::state::{Facing, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick: which directions are held right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Demo mode - the autopilot steers instead of the player
    pub autopilot: bool,
}

impl TickInput {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Advance the game by one frame at wall-clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }
    // Nothing can be placed until the host has measured the play area
    if !state.area.is_known() {
        return;
    }

    state.frame_count += 1;
    state.fish.expire_animations(now_ms);

    let processed = state.frame_count.is_multiple_of(PROCESS_EVERY_N_FRAMES);

    let input = if input.autopilot {
        autopilot::steer(state)
    } else {
        *input
    };

    if processed {
        move_fish(state, &input);
    }

    // Spawn on every frame, timed by the clock
    maybe_spawn_hook(state, now_ms);
    maybe_spawn_food(state, now_ms);

    if !processed {
        return;
    }

    scroll_entities(state);

    let score_before = state.score;
    eat_food(state, now_ms);

    if let Some(idx) = fish_hits_hook(&state.fish, &state.hooks) {
        let cause = state.hooks[idx].challenge.clone();
        state.end_session(cause);
        return;
    }

    state.score += SURVIVAL_REWARD;
    update_difficulty(state, score_before);
}

/// Move the fish one step per held direction and keep it in bounds
fn move_fish(state: &mut GameState, input: &TickInput) {
    let fish = &mut state.fish;
    let mut delta = Vec2::ZERO;
    if input.up {
        delta.y -= FISH_MOVE_STEP;
    }
    if input.down {
        delta.y += FISH_MOVE_STEP;
    }
    if input.left {
        delta.x -= FISH_MOVE_STEP;
        fish.facing = Facing::Left;
    }
    if input.right {
        delta.x += FISH_MOVE_STEP;
        fish.facing = Facing::Right;
    }
    fish.pos += delta;
    fish.clamp_to(state.area);
}

/// Slide everything left and drop what has left the screen
fn scroll_entities(state: &mut GameState) {
    for hook in &mut state.hooks {
        hook.pos.x -= hook.speed;
    }
    state.hooks.retain(|h| !h.is_offscreen());

    for food in &mut state.food {
        food.pos.x -= FOOD_SPEED;
    }
    state.food.retain(|f| !f.is_offscreen());
}

/// Eat at most one food item this tick
fn eat_food(state: &mut GameState, now_ms: f64) {
    let Some(idx) = fish_eats_food(&state.fish, &state.food) else {
        return;
    };

    let eaten = state.food.remove(idx);

    state.score += FOOD_REWARD;
    state.food_collected += 1;
    state.fish.start_eating(now_ms);
    log::debug!("Ate food {} ({} total)", eaten.id, state.food_collected);
    state.push_event(GameEvent::FoodCollected {
        score: state.score,
        collected: state.food_collected,
    });

    if state.food_collected.is_multiple_of(FOOD_PER_GROWTH) && state.fish.grow() {
        state.fish.start_growing(now_ms);
        // A bigger box may now poke past the bottom/right edge
        state.fish.clamp_to(state.area);
        log::info!("Fish grew to {:.1}x", state.fish.size);
        state.push_event(GameEvent::Grew {
            size: state.fish.size,
        });
    }
}

/// Bump difficulty when this tick's score gain crossed a step boundary
fn update_difficulty(state: &mut GameState, score_before: u64) {
    let crossed = state.score / DIFFICULTY_SCORE_STEP > score_before / DIFFICULTY_SCORE_STEP;
    if crossed && state.difficulty < MAX_DIFFICULTY {
        state.difficulty += 1;
        log::info!("Difficulty up to {}", state.difficulty);
        state.push_event(GameEvent::DifficultyIncreased {
            level: state.difficulty,
        });
    }
}
