//! Keyboard plus state machine
//!
//! Decides what a key press does in the current state. The session itself is
//! left to the caller, which restarts it when [`Controls::key_down`] or
//! [`Controls::restart`] return true.

use game_core::DriverInput;

use crate::fsm::{FsmState, GameAction, GameFsm};
use crate::input::{KeyAction, KeyState};

#[derive(Debug, Default)]
pub struct Controls {
    pub fsm: GameFsm,
    keys: KeyState,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press. Returns true when the run should restart.
    pub fn key_down(&mut self, key: &str) -> bool {
        match self.keys.key_down(key) {
            KeyAction::Start => {
                if self.fsm.state() == FsmState::Ready {
                    self.fsm.transition(GameAction::Start);
                }
                false
            }
            KeyAction::TogglePause => {
                if self.fsm.is_paused() {
                    self.fsm.transition(GameAction::Resume);
                } else {
                    self.pause();
                }
                false
            }
            KeyAction::Restart => self.restart(),
            KeyAction::None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.key_up(key);
    }

    /// Pause a running game. Held keys are dropped so that keys released
    /// while the page was unfocused do not stay down after resuming.
    pub fn pause(&mut self) -> bool {
        let paused = self.fsm.transition(GameAction::Pause).success();
        if paused {
            self.keys.clear();
        }
        paused
    }

    /// Move to `Playing` from `GameOver` or `Paused`. Returns true when the
    /// caller should restart the session.
    pub fn restart(&mut self) -> bool {
        if !self.fsm.transition(GameAction::Restart).success() {
            return false;
        }
        self.keys.clear();
        true
    }

    pub fn crash(&mut self) {
        self.fsm.transition(GameAction::Crash);
    }

    /// Input for this frame, or `None` when the simulation is not running.
    /// Pending lane presses are drained either way.
    pub fn take_driver_input(&mut self) -> Option<DriverInput> {
        let input = self.keys.take_driver_input();
        self.fsm.is_simulating().then_some(input)
    }
}
