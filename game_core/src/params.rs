/// Game tuning parameters for the lane runner
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Road
    pub const LANE_COUNT: u8 = 3;
    pub const LANE_WIDTH: f32 = 3.0;
    pub const PLAYER_Z: f32 = 0.0;

    // Cars (player and enemies share a body)
    pub const CAR_WIDTH: f32 = 1.6;
    pub const CAR_LENGTH: f32 = 3.4;
    pub const CAR_HEIGHT: f32 = 1.0;

    // Player driving
    pub const START_SPEED: f32 = 15.0;
    pub const MAX_FORWARD_SPEED: f32 = 40.0;
    pub const MAX_REVERSE_SPEED: f32 = -10.0;
    pub const THROTTLE_RATE: f32 = 20.0; // target speed gained per second of Up
    pub const BRAKE_RATE: f32 = 30.0; // target speed lost per second of Down
    pub const SPEED_SMOOTHING: f32 = 2.5;
    pub const STEER_SMOOTHING: f32 = 8.0;
    pub const MAX_TILT: f32 = 0.35; // radians

    // Enemies
    pub const SPAWN_Z: f32 = -150.0;
    pub const RECYCLE_DISTANCE: f32 = 20.0;
    pub const FAR_CULL_Z: f32 = -250.0;
    pub const SPAWN_CLEARANCE: f32 = 12.0;
    pub const ENEMY_SPEED_MIN: f32 = 8.0;
    pub const ENEMY_SPEED_MAX: f32 = 16.0;

    // Difficulty ramp (linear in survival seconds)
    pub const SPAWN_INITIAL_DELAY: f32 = 1.0;
    pub const SPAWN_INTERVAL_START: f32 = 1.6;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.45;
    pub const SPAWN_INTERVAL_RAMP: f32 = 0.02;
    pub const ENEMY_SPEED_RAMP: f32 = 0.15;
    pub const ENEMY_SPEED_CAP: f32 = 35.0;

    // Lane markers
    pub const MARKER_COUNT: u32 = 20;
    pub const MARKER_SPACING: f32 = 10.0;
    pub const MARKER_LENGTH: f32 = 3.0;

    // Physics
    pub const FIXED_DT: f32 = 1.0 / 60.0;
    pub const MAX_DT: f32 = 0.1; // Clamp to prevent large jumps after a stalled tab

    // Persistence
    pub const HIGH_SCORE_KEY: &'static str = "lane_runner.high_score";
}
