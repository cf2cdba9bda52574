use crate::{Config, Params};

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step
    pub now: f32, // Elapsed time of the current run
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: Params::FIXED_DT,
            now: 0.0,
        }
    }
}

/// Survival score and the best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Score {
    pub current: f32, // seconds survived this run
    pub best: f32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: f32) -> Self {
        Self { current: 0.0, best }
    }

    pub fn tick(&mut self, dt: f32) {
        if dt > 0.0 {
            self.current += dt;
        }
    }

    /// Fold the current run into `best`. Returns true on a new record.
    pub fn finalize(&mut self) -> bool {
        if self.current > self.best {
            self.best = self.current;
            true
        } else {
            false
        }
    }

    /// Whole seconds survived, for the HUD
    pub fn display(&self) -> u32 {
        self.current.max(0.0).floor() as u32
    }

    pub fn best_display(&self) -> u32 {
        self.best.max(0.0).floor() as u32
    }

    pub fn reset(&mut self) {
        self.current = 0.0;
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during the last `step` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Events {
    pub crashed: bool,
    pub lane_changed: bool,
    pub spawned: u32,
    pub recycled: u32,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Driver intent sampled from the keyboard once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverInput {
    pub throttle: i8,   // -1 = brake/reverse, 0 = hold, 1 = accelerate
    pub lane_shift: i8, // lanes to move this frame, negative = left
}

impl DriverInput {
    pub fn new(throttle: i8, lane_shift: i8) -> Self {
        Self {
            throttle,
            lane_shift,
        }
    }
}

/// Countdown until the next enemy spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawner {
    pub timer: f32,
}

impl Spawner {
    pub fn new(config: &Config) -> Self {
        Self {
            timer: config.spawn_initial_delay,
        }
    }
}

/// Current values of the difficulty ramp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub spawn_interval: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
}

impl Difficulty {
    pub fn new(config: &Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval_start,
            enemy_speed_min: config.enemy_speed_min,
            enemy_speed_max: config.enemy_speed_max,
        }
    }
}

/// Terminal flag for the frame loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Running,
    Crashed,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}
