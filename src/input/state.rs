//! Input state management
//!
//! Polls both keyboard (macroquad) and gamepad (gilrs) input, combining
//! them into a unified action-based API.

use macroquad::prelude::*;

use super::{button, Action, ActionSet, Gamepad};
use crate::game::{Direction, TickInput};

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self { gamepad: Gamepad::new() }
    }

    /// Call once per frame. Returns every action triggered since the last poll.
    pub fn poll(&mut self) -> ActionSet {
        self.gamepad.poll();
        keyboard_actions().union(self.gamepad_actions())
    }

    /// Check if any gamepad is connected
    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }

    fn gamepad_actions(&mut self) -> ActionSet {
        let pressed = self.gamepad.pressed_mask();
        let gp = &self.gamepad;
        let mut set = ActionSet::default();

        if gp.is_button_down(button::DPAD_LEFT) {
            set.insert(Action::MoveLeft);
        }
        if gp.is_button_down(button::DPAD_RIGHT) {
            set.insert(Action::MoveRight);
        }
        if gp.is_button_down(button::A) || gp.is_button_down(button::DPAD_UP) {
            set.insert(Action::Jump);
        }
        if pressed & (1 << button::START) != 0 {
            set.insert(Action::Restart);
        }

        set
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Held or tapped this frame; a tap shorter than a tick still counts
fn key_active(key: KeyCode) -> bool {
    is_key_down(key) || is_key_pressed(key)
}

fn keyboard_actions() -> ActionSet {
    let mut set = ActionSet::default();

    if key_active(KeyCode::Left) || key_active(KeyCode::A) {
        set.insert(Action::MoveLeft);
    }
    if key_active(KeyCode::Right) || key_active(KeyCode::D) {
        set.insert(Action::MoveRight);
    }
    if key_active(KeyCode::Space) || key_active(KeyCode::Up) || key_active(KeyCode::W) {
        set.insert(Action::Jump);
    }
    if is_key_pressed(KeyCode::R) {
        set.insert(Action::Restart);
    }
    if is_key_pressed(KeyCode::Escape) || is_quit_requested() {
        set.insert(Action::Quit);
    }

    set
}

/// Fold one frame of actions into what the game update needs.
/// Opposite directions held together cancel out.
pub fn tick_input(actions: ActionSet) -> TickInput {
    let steer = match (actions.contains(Action::MoveLeft), actions.contains(Action::MoveRight)) {
        (true, false) => Some(Direction::Left),
        (false, true) => Some(Direction::Right),
        _ => None,
    };
    TickInput {
        steer,
        jump: actions.contains(Action::Jump),
        restart: actions.contains(Action::Restart),
    }
}
