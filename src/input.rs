//! Action-based input
//!
//! Games query intents (move, jump, confirm) instead of raw key codes so a
//! binding lives in exactly one place. Arrow keys and WASD are both mapped,
//! matching the keyboard layout of the games this arcade grew out of.

use macroquad::prelude::*;

/// All intents a game or the menu can ask about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement / steering
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    /// Jump in the platformer, flap in flappy
    Jump,

    /// Start a game, restart after game over
    Confirm,
    /// Leave the current game back to the menu
    Back,
    /// Rebuild the current level
    Restart,

    /// Toggle collision wireframes
    DebugToggle,
    /// Cycle the frame-rate limit
    FpsCycle,
}

/// Keyboard polling behind the action layer.
///
/// Held separately from the games so a gamepad backend can slot in later
/// without touching game code.
pub struct InputState;

impl InputState {
    pub fn new() -> Self {
        Self
    }

    /// Is the action currently held down?
    pub fn action_down(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            Action::MoveRight => is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
            Action::MoveUp => is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
            Action::MoveDown => is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
            Action::Jump => is_key_down(KeyCode::Space),
            Action::Confirm => is_key_down(KeyCode::Enter) || is_key_down(KeyCode::Space),
            Action::Back => is_key_down(KeyCode::Escape),
            Action::Restart => is_key_down(KeyCode::R),
            Action::DebugToggle => is_key_down(KeyCode::Key1),
            Action::FpsCycle => is_key_down(KeyCode::F2),
        }
    }

    /// Was the action pressed this frame? (edge triggered)
    pub fn action_pressed(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_pressed(KeyCode::A) || is_key_pressed(KeyCode::Left),
            Action::MoveRight => is_key_pressed(KeyCode::D) || is_key_pressed(KeyCode::Right),
            Action::MoveUp => is_key_pressed(KeyCode::W) || is_key_pressed(KeyCode::Up),
            Action::MoveDown => is_key_pressed(KeyCode::S) || is_key_pressed(KeyCode::Down),
            Action::Jump => is_key_pressed(KeyCode::Space),
            Action::Confirm => is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space),
            Action::Back => is_key_pressed(KeyCode::Escape),
            Action::Restart => is_key_pressed(KeyCode::R),
            Action::DebugToggle => is_key_pressed(KeyCode::Key1),
            Action::FpsCycle => is_key_pressed(KeyCode::F2),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
