//! Keyboard input sampling
//!
//! Key events arrive whenever the host delivers them; the simulation only
//! sees the folded result once per tick.

use crate::sim::TickInput;

/// What a key does in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    Thrust,
    Fire,
    Pause,
    Restart,
}

impl KeyAction {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(KeyAction::Left),
            "ArrowRight" => Some(KeyAction::Right),
            "ArrowUp" => Some(KeyAction::Thrust),
            " " | "Spacebar" => Some(KeyAction::Fire),
            "Escape" => Some(KeyAction::Pause),
            "Enter" => Some(KeyAction::Restart),
            _ => None,
        }
    }
}

/// Held keys plus one-shot presses waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    thrust: bool,
    fire: bool,
    pause: bool,
    restart: bool,
}

impl InputState {
    /// Record a key press. Returns true if the key means something here, so
    /// the host can suppress the browser default (page scrolling).
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some(action) = KeyAction::from_key(key) else {
            log::trace!("Unmapped key {:?}", key);
            return false;
        };
        self.press(action);
        true
    }

    /// Register an action directly, e.g. a pause requested by the host
    pub fn press(&mut self, action: KeyAction) {
        match action {
            KeyAction::Left => self.left = true,
            KeyAction::Right => self.right = true,
            KeyAction::Thrust => self.thrust = true,
            KeyAction::Fire => self.fire = true,
            KeyAction::Pause => self.pause = true,
            KeyAction::Restart => self.restart = true,
        }
    }

    /// Record a key release; only held keys care
    pub fn key_up(&mut self, key: &str) -> bool {
        match KeyAction::from_key(key) {
            Some(KeyAction::Left) => self.left = false,
            Some(KeyAction::Right) => self.right = false,
            Some(KeyAction::Thrust) => self.thrust = false,
            Some(_) => {}
            None => return false,
        }
        true
    }

    /// Input for the next tick. One-shot presses are consumed.
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            thrust: self.thrust,
            fire: self.fire,
            pause: self.pause,
        };
        self.fire = false;
        self.pause = false;
        input
    }

    /// Whether a restart was requested since the last call
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }

    /// Drop everything, e.g. when the window loses focus and key-ups are lost
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
