//! Latched directional input
//!
//! Key and touch events only flip flags; the tick reads the flags once.

use crate::settings::Preference;
use crate::sim::TickInput;

/// One of the four movement intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }

    /// DOM id of the on-screen touch button
    pub fn button_id(&self) -> &'static str {
        match self {
            Direction::Up => "touch-up",
            Direction::Down => "touch-down",
            Direction::Left => "touch-left",
            Direction::Right => "touch-right",
        }
    }
}

/// Non-movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start from the title screen or restart after game over
    StartOrRestart,
    /// Demo mode on/off
    ToggleAutopilot,
    /// Flip a stored preference
    Toggle(Preference),
}

impl Command {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Enter" => Some(Command::StartOrRestart),
            "p" | "P" => Some(Command::ToggleAutopilot),
            "n" | "N" => Some(Command::Toggle(Preference::Notifications)),
            "f" | "F" => Some(Command::Toggle(Preference::ShowFps)),
            "m" | "M" => Some(Command::Toggle(Preference::ReducedMotion)),
            _ => None,
        }
    }
}

/// Which directions are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn press(&mut self, dir: Direction) {
        self.set(dir, true);
    }

    pub fn release(&mut self, dir: Direction) {
        self.set(dir, false);
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Drop everything (window blur, restart)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for one tick
    pub fn tick_input(&self, autopilot: bool) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            autopilot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("d"), Some(Direction::Right));
        assert_eq!(Direction::from_key("x"), None);
        assert_eq!(Command::from_key(" "), Some(Command::StartOrRestart));
        assert_eq!(Command::from_key("P"), Some(Command::ToggleAutopilot));
        assert_eq!(
            Command::from_key("m"),
            Some(Command::Toggle(Preference::ReducedMotion))
        );
        assert_eq!(
            Command::from_key("F"),
            Some(Command::Toggle(Preference::ShowFps))
        );
        assert_eq!(Command::from_key("ArrowUp"), None);
    }

    #[test]
    fn test_directions_latch_independently() {
        let mut keys = DirectionKeys::default();
        keys.press(Direction::Up);
        keys.press(Direction::Right);
        assert!(keys.is_held(Direction::Up));
        assert!(keys.is_held(Direction::Right));
        assert!(!keys.is_held(Direction::Left));

        keys.release(Direction::Up);
        let input = keys.tick_input(false);
        assert!(!input.up);
        assert!(input.right);
        assert!(!input.autopilot);

        // Repeated presses (key repeat) are harmless
        keys.press(Direction::Right);
        keys.press(Direction::Right);
        keys.release(Direction::Right);
        assert!(!keys.tick_input(true).any());
    }

    #[test]
    fn test_release_all() {
        let mut keys = DirectionKeys::default();
        for dir in Direction::ALL {
            keys.press(dir);
        }
        assert!(Direction::ALL.iter().all(|d| keys.is_held(*d)));
        keys.release_all();
        assert_eq!(keys, DirectionKeys::default());
    }
}
