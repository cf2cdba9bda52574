//! Keyboard input handling
//!
//! The page forwards `KeyboardEvent.key` strings. Up/Down are held keys;
//! Left/Right are edge-triggered so auto-repeat cannot skip lanes.

use game_core::DriverInput;

/// Something the page should do in response to a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Start,
    TogglePause,
    Restart,
}

#[derive(Debug, Clone, Default)]
pub struct KeyState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    lane_shift: i8, // accumulated since the last frame
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key down event
    pub fn key_down(&mut self, key: &str) -> KeyAction {
        match key {
            "ArrowUp" | "w" | "W" => {
                self.up = true;
                KeyAction::Start
            }
            "ArrowDown" | "s" | "S" => {
                self.down = true;
                KeyAction::Start
            }
            "ArrowLeft" | "a" | "A" => {
                if !self.left {
                    self.left = true;
                    self.lane_shift = self.lane_shift.saturating_sub(1);
                }
                KeyAction::Start
            }
            "ArrowRight" | "d" | "D" => {
                if !self.right {
                    self.right = true;
                    self.lane_shift = self.lane_shift.saturating_add(1);
                }
                KeyAction::Start
            }
            " " => KeyAction::Start,
            "p" | "P" | "Escape" => KeyAction::TogglePause,
            "Enter" | "r" | "R" => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }

    /// Handle key up event
    pub fn key_up(&mut self, key: &str) {
        match key {
            "ArrowUp" | "w" | "W" => self.up = false,
            "ArrowDown" | "s" | "S" => self.down = false,
            "ArrowLeft" | "a" | "A" => self.left = false,
            "ArrowRight" | "d" | "D" => self.right = false,
            _ => {}
        }
    }

    /// Throttle from held keys plus the lane presses since the last call
    pub fn take_driver_input(&mut self) -> DriverInput {
        let throttle = self.up as i8 - self.down as i8;
        let lane_shift = std::mem::take(&mut self.lane_shift);
        DriverInput::new(throttle, lane_shift)
    }

    /// Forget held keys, e.g. when the page loses focus
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
