//! Presentation preferences
//!
//! Persisted in LocalStorage. Nothing here affects the simulation.

use serde::{Deserialize, Serialize};

/// When to show the on-screen arrow buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TouchControls {
    /// Only on touch-capable devices
    #[default]
    Auto,
    Always,
    Never,
}

impl TouchControls {
    /// Resolve against whether the device has a touch screen
    pub fn visible(&self, has_touch: bool) -> bool {
        match self {
            TouchControls::Auto => has_touch,
            TouchControls::Always => true,
            TouchControls::Never => false,
        }
    }
}

/// On/off preferences the player can flip from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Notifications,
    ShowFps,
    ReducedMotion,
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Toast notifications for food, growth, difficulty
    pub notifications: bool,
    /// How long a toast stays up (ms)
    pub toast_ms: u32,
    pub touch_controls: TouchControls,
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (no food wiggle, no growth glow)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            toast_ms: 2000,
            touch_controls: TouchControls::Auto,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Shortest toast that is still readable
    pub const MIN_TOAST_MS: u32 = 500;

    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "piranha_dodge_settings";

    /// Flip a preference and return its new value
    pub fn toggle(&mut self, pref: Preference) -> bool {
        let flag = match pref {
            Preference::Notifications => &mut self.notifications,
            Preference::ShowFps => &mut self.show_fps,
            Preference::ReducedMotion => &mut self.reduced_motion,
        };
        *flag = !*flag;
        *flag
    }

    /// Toast duration, never below the readable minimum
    pub fn effective_toast_ms(&self) -> u32 {
        self.toast_ms.max(Self::MIN_TOAST_MS)
    }

    /// Parse stored JSON; unknown or missing fields fall back to defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                None
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_controls_resolve() {
        assert!(TouchControls::Auto.visible(true));
        assert!(!TouchControls::Auto.visible(false));
        assert!(TouchControls::Always.visible(false));
        assert!(!TouchControls::Never.visible(true));
    }

    #[test]
    fn test_settings_json_roundtrip_and_defaults() {
        let settings = Settings {
            reduced_motion: true,
            touch_controls: TouchControls::Never,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), Some(settings));

        // Older saves missing fields still load
        let partial = Settings::from_json(r#"{"show_fps":true}"#).unwrap();
        assert!(partial.show_fps);
        assert!(partial.notifications);
        assert_eq!(partial.toast_ms, 2000);

        assert_eq!(Settings::from_json("not json"), None);
    }

    #[test]
    fn test_toggle_flips_one_preference() {
        let mut settings = Settings::default();
        assert!(settings.toggle(Preference::ReducedMotion));
        assert!(settings.reduced_motion);
        assert!(settings.toggle(Preference::ShowFps));
        assert!(!settings.toggle(Preference::Notifications));
        assert!(!settings.notifications);

        // Toggled state is what gets stored
        let json = serde_json::to_string(&settings).unwrap();
        let stored = Settings::from_json(&json).unwrap();
        assert!(stored.reduced_motion && stored.show_fps && !stored.notifications);

        assert!(!settings.toggle(Preference::ReducedMotion));
        assert_eq!(settings.touch_controls, TouchControls::Auto);
    }

    #[test]
    fn test_toast_floor() {
        let settings = Settings {
            toast_ms: 10,
            ..Default::default()
        };
        assert_eq!(settings.effective_toast_ms(), Settings::MIN_TOAST_MS);
    }
}
