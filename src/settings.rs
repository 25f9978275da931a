//! Board size, gameplay tuning and palette
//!
//! Persisted as JSON in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::consts::*;

/// Gameplay numbers that shape how the demo feels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Turn rate while steering (radians/s)
    pub turn_rate: f32,
    /// Velocity added per frame while thrusting (cells/s)
    pub thrust: f32,
    /// Bullet speed (cells/s)
    pub bullet_speed: f32,
    /// Asteroids per field
    pub asteroid_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            turn_rate: PLANE_TURN_RATE,
            thrust: PLANE_THRUST,
            bullet_speed: BULLET_SPEED,
            asteroid_count: ASTEROID_COUNT,
        }
    }
}

/// Cell colors for each kind of entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub asteroid: Color,
    pub plane: Color,
    pub bullet: Color,
    /// Clear color behind the board
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            asteroid: Color::rgb(0xcc, 0xcc, 0xcc),
            plane: Color::rgb(0x33, 0xdd, 0x66),
            bullet: Color::rgb(0xff, 0xcc, 0x33),
            background: Color::rgb(0x05, 0x05, 0x0d),
        }
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board rows
    pub board_height: usize,
    /// Board columns
    pub board_width: usize,
    /// Longest frame delta handed to the simulation (ms)
    pub max_elapsed_ms: f32,
    pub tuning: Tuning,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_height: BOARD_HEIGHT,
            board_width: BOARD_WIDTH,
            max_elapsed_ms: MAX_ELAPSED_MS,
            tuning: Tuning::default(),
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "edge_grid_settings";

    /// Largest board edge accepted from storage
    pub const MAX_BOARD_EDGE: usize = 1024;

    /// Replace values that would break the board or the simulation
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        self.board_height = self.board_height.clamp(1, Self::MAX_BOARD_EDGE);
        self.board_width = self.board_width.clamp(1, Self::MAX_BOARD_EDGE);

        if !self.max_elapsed_ms.is_finite() || self.max_elapsed_ms <= 0.0 {
            self.max_elapsed_ms = defaults.max_elapsed_ms;
        }
        if !self.tuning.turn_rate.is_finite() {
            self.tuning.turn_rate = defaults.tuning.turn_rate;
        }
        if !self.tuning.thrust.is_finite() || self.tuning.thrust < 0.0 {
            self.tuning.thrust = defaults.tuning.thrust;
        }
        if !self.tuning.bullet_speed.is_finite() || self.tuning.bullet_speed <= 0.0 {
            self.tuning.bullet_speed = defaults.tuning.bullet_speed;
        }
        // An empty field would be "cleared" again on every tick
        self.tuning.asteroid_count = self.tuning.asteroid_count.clamp(1, MAX_ASTEROID_COUNT);
        self
    }

    /// Parse settings JSON, falling back to defaults when it doesn't parse
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
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
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
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
