use crate::{Config, Difficulty};

/// Spawn interval after `elapsed` seconds of survival
pub fn spawn_interval(config: &Config, elapsed: f32) -> f32 {
    let elapsed = elapsed.max(0.0);
    (config.spawn_interval_start - config.spawn_interval_ramp * elapsed)
        .max(config.spawn_interval_min)
}

/// Enemy own-speed bounds after `elapsed` seconds of survival
pub fn enemy_speed_range(config: &Config, elapsed: f32) -> (f32, f32) {
    let bonus = config.enemy_speed_ramp * elapsed.max(0.0);
    let min = (config.enemy_speed_min + bonus).min(config.enemy_speed_cap);
    let max = (config.enemy_speed_max + bonus).min(config.enemy_speed_cap);
    (min, max)
}

/// Recompute the ramp for the current run time
pub fn update_difficulty(difficulty: &mut Difficulty, config: &Config, elapsed: f32) {
    let (min, max) = enemy_speed_range(config, elapsed);
    difficulty.spawn_interval = spawn_interval(config, elapsed);
    difficulty.enemy_speed_min = min;
    difficulty.enemy_speed_max = max;
}
