//! Game state and core simulation types
//!
//! Everything the presentation layer reads each frame lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Start screen, nothing moves
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Caught on a hook, waiting for restart
    GameOver,
}

/// Which way the fish is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Size of the play area in pixels. Zero until the host has measured it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// True once both dimensions are known
    pub fn is_known(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// The player's fish
#[derive(Debug, Clone)]
pub struct Fish {
    /// Top-left corner of the fish box
    pub pos: Vec2,
    pub facing: Facing,
    /// Size multiplier in [FISH_MIN_SIZE, FISH_MAX_SIZE]
    pub size: f32,
    /// Growth animation is running
    pub growing: bool,
    /// Eating animation is running
    pub eating: bool,
    growing_until_ms: f64,
    eating_until_ms: f64,
}

impl Default for Fish {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            facing: Facing::Right,
            size: FISH_MIN_SIZE,
            growing: false,
            eating: false,
            growing_until_ms: 0.0,
            eating_until_ms: 0.0,
        }
    }
}

impl Fish {
    /// Fresh fish at the start position for the given area
    pub fn spawn(area: PlayArea) -> Self {
        Self::at(Self::start_position(area))
    }

    /// Fresh fish with its top-left corner at `pos`
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            ..Default::default()
        }
    }

    /// A quarter of the way in, vertically centered
    pub fn start_position(area: PlayArea) -> Vec2 {
        Vec2::new(area.width / 4.0, area.height / 2.0)
    }

    pub fn width(&self) -> f32 {
        FISH_WIDTH * self.size
    }

    pub fn height(&self) -> f32 {
        FISH_HEIGHT * self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width() / 2.0, self.height() / 2.0)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width(), self.height()))
    }

    /// Keep the whole fish box inside the area
    pub fn clamp_to(&mut self, area: PlayArea) {
        let max = Vec2::new(
            (area.width - self.width()).max(0.0),
            (area.height - self.height()).max(0.0),
        );
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }

    /// Grow one step. Returns false if already at the cap.
    pub fn grow(&mut self) -> bool {
        if self.size >= FISH_MAX_SIZE {
            return false;
        }
        self.size = (self.size + FISH_GROWTH_STEP).min(FISH_MAX_SIZE);
        true
    }

    pub fn start_eating(&mut self, now_ms: f64) {
        self.eating = true;
        self.eating_until_ms = now_ms + EATING_DURATION_MS;
    }

    pub fn start_growing(&mut self, now_ms: f64) {
        self.growing = true;
        self.growing_until_ms = now_ms + GROWING_DURATION_MS;
    }

    /// Clear animation flags whose time is up
    pub fn expire_animations(&mut self, now_ms: f64) {
        if self.eating && now_ms >= self.eating_until_ms {
            self.eating = false;
        }
        if self.growing && now_ms >= self.growing_until_ms {
            self.growing = false;
        }
    }
}

/// A hook carrying a challenge label. Touching it ends the run.
#[derive(Debug, Clone)]
pub struct Hook {
    pub id: u32,
    /// Top-left corner of the hook box
    pub pos: Vec2,
    pub challenge: String,
    /// Leftward pixels per processed tick
    pub speed: f32,
}

impl Hook {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(HOOK_WIDTH, HOOK_HEIGHT))
    }

    /// Past the left edge (including the hanging label)
    pub fn is_offscreen(&self) -> bool {
        self.pos.x <= -HOOK_CULL_DISTANCE
    }
}

/// A food pellet
#[derive(Debug, Clone)]
pub struct Food {
    pub id: u32,
    /// Top-left corner of the food box
    pub pos: Vec2,
    pub color: String,
    /// Skipped by the eat check; the tick removes eaten food outright
    pub eaten: bool,
}

impl Food {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(FOOD_SIZE / 2.0)
    }

    pub fn is_offscreen(&self) -> bool {
        self.pos.x <= -FOOD_SIZE
    }
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    FoodCollected { score: u64, collected: u32 },
    Grew { size: f32 },
    DifficultyIncreased { level: u32 },
    GameOver { cause: String, score: u64, collected: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub area: PlayArea,
    pub fish: Fish,
    /// Active hooks (spawn order)
    pub hooks: Vec<Hook>,
    /// Active food (spawn order)
    pub food: Vec<Food>,
    pub score: u64,
    pub food_collected: u32,
    /// 1..=MAX_DIFFICULTY
    pub difficulty: u32,
    /// Frames ticked this session
    pub frame_count: u64,
    pub last_hook_spawn_ms: f64,
    pub last_food_spawn_ms: f64,
    /// Label of the hook that ended the last run
    pub caught_by: Option<String>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Idle session with an unmeasured play area
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            area: PlayArea::default(),
            fish: Fish::default(),
            hooks: Vec::new(),
            food: Vec::new(),
            score: 0,
            food_collected: 0,
            difficulty: MIN_DIFFICULTY,
            frame_count: 0,
            last_hook_spawn_ms: 0.0,
            last_food_spawn_ms: 0.0,
            caught_by: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Idle session with a known play area
    pub fn with_area(seed: u64, width: f32, height: f32) -> Self {
        let mut state = Self::new(seed);
        state.resize(width, height);
        state
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Record the measured play area. Outside of play the fish goes back to
    /// its start spot; mid-run it is only pulled back inside.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.area = PlayArea::new(width, height);
        if self.is_playing() {
            self.fish.clamp_to(self.area);
        } else {
            self.fish.pos = Fish::start_position(self.area);
        }
    }

    /// Idle -> Playing. Returns true if a session began.
    pub fn start(&mut self, now_ms: f64) -> bool {
        match self.phase {
            GamePhase::Idle => {
                self.begin_session(now_ms);
                true
            }
            GamePhase::Playing | GamePhase::GameOver => false,
        }
    }

    /// GameOver -> Playing with everything reset. From Idle this is a plain start.
    pub fn restart(&mut self, now_ms: f64) -> bool {
        match self.phase {
            GamePhase::GameOver | GamePhase::Idle => {
                self.begin_session(now_ms);
                true
            }
            GamePhase::Playing => false,
        }
    }

    fn begin_session(&mut self, now_ms: f64) {
        self.phase = GamePhase::Playing;
        self.fish = Fish::spawn(self.area);
        self.hooks.clear();
        self.food.clear();
        self.score = 0;
        self.food_collected = 0;
        self.difficulty = MIN_DIFFICULTY;
        self.frame_count = 0;
        self.last_hook_spawn_ms = now_ms;
        self.last_food_spawn_ms = now_ms;
        self.caught_by = None;
        self.events.push(GameEvent::Started);
        log::info!(
            "Session started (area {}x{})",
            self.area.width,
            self.area.height
        );
    }

    /// End the run on the given hook label
    pub(crate) fn end_session(&mut self, cause: String) {
        self.phase = GamePhase::GameOver;
        log::info!(
            "Caught by '{}' with score {} ({} food)",
            cause,
            self.score,
            self.food_collected
        );
        self.events.push(GameEvent::GameOver {
            cause: cause.clone(),
            score: self.score,
            collected: self.food_collected,
        });
        self.caught_by = Some(cause);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending notifications since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(!state.area.is_known());
        assert_eq!(state.difficulty, MIN_DIFFICULTY);
        assert_eq!(state.fish.size, FISH_MIN_SIZE);
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut state = GameState::with_area(1, 800.0, 500.0);
        assert!(state.start(0.0));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.take_events(), vec![GameEvent::Started]);

        // Already playing: ignored
        assert!(!state.start(10.0));
        assert!(!state.restart(10.0));
        assert!(state.take_events().is_empty());

        state.end_session("Burnout".to_string());
        assert!(!state.start(20.0));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.restart(20.0));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::with_area(7, 800.0, 500.0);
        state.start(0.0);
        state.score = 1234;
        state.food_collected = 12;
        state.difficulty = 4;
        state.fish.size = 1.2;
        state.fish.pos = Vec2::new(500.0, 10.0);
        let id = state.next_entity_id();
        state.hooks.push(Hook {
            id,
            pos: Vec2::new(100.0, 100.0),
            challenge: "Korona".to_string(),
            speed: 3.0,
        });
        let id = state.next_entity_id();
        state.food.push(Food {
            id,
            pos: Vec2::new(300.0, 100.0),
            color: "#FF9800".to_string(),
            eaten: false,
        });
        state.end_session("Korona".to_string());
        assert_eq!(state.caught_by.as_deref(), Some("Korona"));

        assert!(state.restart(5000.0));
        assert_eq!(state.score, 0);
        assert_eq!(state.food_collected, 0);
        assert_eq!(state.difficulty, MIN_DIFFICULTY);
        assert_eq!(state.fish.size, FISH_MIN_SIZE);
        assert!(state.hooks.is_empty());
        assert!(state.food.is_empty());
        assert_eq!(state.fish.pos, Vec2::new(200.0, 250.0));
        assert_eq!(state.last_hook_spawn_ms, 5000.0);
        assert!(state.caught_by.is_none());
    }

    #[test]
    fn test_resize_outside_and_during_play() {
        let mut state = GameState::new(3);
        state.resize(400.0, 200.0);
        assert_eq!(state.fish.pos, Vec2::new(100.0, 100.0));

        state.start(0.0);
        state.fish.pos = Vec2::new(380.0, 190.0);
        state.resize(300.0, 150.0);
        // Clamped, not reset
        assert_eq!(state.fish.pos, Vec2::new(240.0, 110.0));
    }

    #[test]
    fn test_fish_growth_caps() {
        let mut fish = Fish::default();
        let mut steps = 0;
        while fish.grow() {
            steps += 1;
            assert!(steps < 10, "growth never capped");
        }
        assert_eq!(steps, 5);
        assert_eq!(fish.size, FISH_MAX_SIZE);
    }

    #[test]
    fn test_animation_flags_expire() {
        let mut fish = Fish::default();
        fish.start_eating(1000.0);
        fish.start_growing(1000.0);
        fish.expire_animations(1100.0);
        assert!(fish.eating);
        assert!(fish.growing);
        fish.expire_animations(1200.0);
        assert!(!fish.eating);
        assert!(fish.growing);
        fish.expire_animations(1800.0);
        assert!(!fish.growing);
    }
}
