use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{ConfigError, Params};

/// Runtime game configuration
///
/// Defaults come from [`Params`]. The host page may override any subset of
/// fields with a JSON object; missing fields keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lane_count: u8,
    pub lane_width: f32,
    pub player_z: f32,
    pub car_width: f32,
    pub car_length: f32,
    pub car_height: f32,
    pub start_speed: f32,
    pub max_forward_speed: f32,
    pub max_reverse_speed: f32,
    pub throttle_rate: f32,
    pub brake_rate: f32,
    pub speed_smoothing: f32,
    pub steer_smoothing: f32,
    pub max_tilt: f32,
    pub spawn_z: f32,
    pub recycle_distance: f32,
    pub far_cull_z: f32,
    pub spawn_clearance: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub spawn_initial_delay: f32,
    pub spawn_interval_start: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_ramp: f32,
    pub enemy_speed_ramp: f32,
    pub enemy_speed_cap: f32,
    pub marker_count: u32,
    pub marker_spacing: f32,
    pub marker_length: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lane_count: Params::LANE_COUNT,
            lane_width: Params::LANE_WIDTH,
            player_z: Params::PLAYER_Z,
            car_width: Params::CAR_WIDTH,
            car_length: Params::CAR_LENGTH,
            car_height: Params::CAR_HEIGHT,
            start_speed: Params::START_SPEED,
            max_forward_speed: Params::MAX_FORWARD_SPEED,
            max_reverse_speed: Params::MAX_REVERSE_SPEED,
            throttle_rate: Params::THROTTLE_RATE,
            brake_rate: Params::BRAKE_RATE,
            speed_smoothing: Params::SPEED_SMOOTHING,
            steer_smoothing: Params::STEER_SMOOTHING,
            max_tilt: Params::MAX_TILT,
            spawn_z: Params::SPAWN_Z,
            recycle_distance: Params::RECYCLE_DISTANCE,
            far_cull_z: Params::FAR_CULL_Z,
            spawn_clearance: Params::SPAWN_CLEARANCE,
            enemy_speed_min: Params::ENEMY_SPEED_MIN,
            enemy_speed_max: Params::ENEMY_SPEED_MAX,
            spawn_initial_delay: Params::SPAWN_INITIAL_DELAY,
            spawn_interval_start: Params::SPAWN_INTERVAL_START,
            spawn_interval_min: Params::SPAWN_INTERVAL_MIN,
            spawn_interval_ramp: Params::SPAWN_INTERVAL_RAMP,
            enemy_speed_ramp: Params::ENEMY_SPEED_RAMP,
            enemy_speed_cap: Params::ENEMY_SPEED_CAP,
            marker_count: Params::MARKER_COUNT,
            marker_spacing: Params::MARKER_SPACING,
            marker_length: Params::MARKER_LENGTH,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)
            .inspect_err(|e| warn!(error = %e, "unparseable config"))?;
        config
            .validate()
            .inspect_err(|e| warn!(error = %e, "rejected config"))?;
        Ok(config)
    }

    /// Clamp a speed into the drivable range
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        speed.clamp(self.max_reverse_speed, self.max_forward_speed)
    }

    /// Total Z span covered by one divider's worth of markers
    pub fn marker_span(&self) -> f32 {
        self.marker_count as f32 * self.marker_spacing
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::invalid("lane_count", "must be at least 1"));
        }
        positive("lane_width", self.lane_width)?;
        positive("car_width", self.car_width)?;
        positive("car_length", self.car_length)?;
        positive("car_height", self.car_height)?;

        if !(self.max_reverse_speed <= 0.0) {
            return Err(ConfigError::invalid(
                "max_reverse_speed",
                format!("must be <= 0, got {}", self.max_reverse_speed),
            ));
        }
        positive("max_forward_speed", self.max_forward_speed)?;
        if !(self.max_reverse_speed..=self.max_forward_speed).contains(&self.start_speed) {
            return Err(ConfigError::invalid(
                "start_speed",
                format!(
                    "{} is outside [{}, {}]",
                    self.start_speed, self.max_reverse_speed, self.max_forward_speed
                ),
            ));
        }

        positive("throttle_rate", self.throttle_rate)?;
        positive("brake_rate", self.brake_rate)?;
        positive("speed_smoothing", self.speed_smoothing)?;
        positive("steer_smoothing", self.steer_smoothing)?;

        if !(self.spawn_z < self.player_z) {
            return Err(ConfigError::invalid(
                "spawn_z",
                "must be ahead of the player (less than player_z)",
            ));
        }
        if !(self.far_cull_z < self.spawn_z) {
            return Err(ConfigError::invalid(
                "far_cull_z",
                "must be further ahead than spawn_z",
            ));
        }
        positive("recycle_distance", self.recycle_distance)?;

        positive("spawn_clearance", self.spawn_clearance)?;
        non_negative("spawn_initial_delay", self.spawn_initial_delay)?;
        positive("spawn_interval_min", self.spawn_interval_min)?;
        if self.spawn_interval_min > self.spawn_interval_start {
            return Err(ConfigError::invalid(
                "spawn_interval_min",
                "must not exceed spawn_interval_start",
            ));
        }
        non_negative("spawn_interval_ramp", self.spawn_interval_ramp)?;
        non_negative("enemy_speed_ramp", self.enemy_speed_ramp)?;
        // Oncoming traffic only; an infinite range would overflow the sampler
        non_negative("enemy_speed_min", self.enemy_speed_min)?;
        non_negative("enemy_speed_cap", self.enemy_speed_cap)?;
        if !(self.enemy_speed_min <= self.enemy_speed_max
            && self.enemy_speed_max <= self.enemy_speed_cap)
        {
            return Err(ConfigError::invalid(
                "enemy_speed_max",
                "expected enemy_speed_min <= enemy_speed_max <= enemy_speed_cap",
            ));
        }

        if self.marker_count == 0 {
            return Err(ConfigError::invalid("marker_count", "must be at least 1"));
        }
        positive("marker_spacing", self.marker_spacing)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // `!(x > 0)` also rejects NaN
    if !(value > 0.0 && value.is_finite()) {
        return Err(ConfigError::invalid(
            field,
            format!("must be positive, got {value}"),
        ));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value >= 0.0 && value.is_finite()) {
        return Err(ConfigError::invalid(
            field,
            format!("must be finite and >= 0, got {value}"),
        ));
    }
    Ok(())
}
