//! Game State Machine
//!
//! Tracks what the page is showing. The simulation only advances in `Playing`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Game states
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsmState {
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// Actions that trigger state transitions
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Start,
    Pause,
    Resume,
    Crash,
    Restart,
}

/// Result of a state transition
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct TransitionResult {
    success: bool,
    from_state: FsmState,
    to_state: FsmState,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl TransitionResult {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn success(&self) -> bool {
        self.success
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    #[allow(clippy::wrong_self_convention)]
    pub fn from_state(&self) -> FsmState {
        self.from_state
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn to_state(&self) -> FsmState {
        self.to_state
    }
}

/// Game Finite State Machine
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug)]
pub struct GameFsm {
    state: FsmState,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl GameFsm {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Self {
        Self {
            state: FsmState::Ready,
        }
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn state(&self) -> FsmState {
        self.state
    }

    /// Current state as a string (for JS interop)
    pub fn state_string(&self) -> String {
        format!("{:?}", self.state)
    }

    pub fn can_transition(&self, action: GameAction) -> bool {
        self.next_state(action).is_some()
    }

    /// Attempt a transition; invalid ones leave the state unchanged
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_state = self.state;
        match self.next_state(action) {
            Some(next_state) => {
                self.state = next_state;
                TransitionResult {
                    success: true,
                    from_state,
                    to_state: next_state,
                }
            }
            None => TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
            },
        }
    }

    /// Transition using an action string (for easier JS interop)
    pub fn transition_str(&mut self, action: &str) -> TransitionResult {
        let action = match action {
            "START" => GameAction::Start,
            "PAUSE" => GameAction::Pause,
            "RESUME" => GameAction::Resume,
            "CRASH" => GameAction::Crash,
            "RESTART" => GameAction::Restart,
            _ => {
                return TransitionResult {
                    success: false,
                    from_state: self.state,
                    to_state: self.state,
                };
            }
        };
        self.transition(action)
    }

    fn next_state(&self, action: GameAction) -> Option<FsmState> {
        match (self.state, action) {
            (FsmState::Ready, GameAction::Start) => Some(FsmState::Playing),

            (FsmState::Playing, GameAction::Pause) => Some(FsmState::Paused),
            (FsmState::Playing, GameAction::Crash) => Some(FsmState::GameOver),

            (FsmState::Paused, GameAction::Resume) => Some(FsmState::Playing),
            (FsmState::Paused, GameAction::Restart) => Some(FsmState::Playing),

            (FsmState::GameOver, GameAction::Restart) => Some(FsmState::Playing),

            _ => None,
        }
    }

    /// Only `Playing` advances the simulation
    pub fn is_simulating(&self) -> bool {
        self.state == FsmState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state == FsmState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == FsmState::GameOver
    }
}

impl Default for GameFsm {
    fn default() -> Self {
        Self::new()
    }
}
