pub mod components;
pub mod config;
pub mod error;
pub mod highscore;
pub mod params;
pub mod pool;
pub mod resources;
pub mod road;
pub mod session;
pub mod systems;

pub use components::*;
pub use config::*;
pub use error::*;
pub use highscore::*;
pub use params::*;
pub use pool::*;
pub use resources::*;
pub use road::*;
pub use session::*;

use glam::Vec3;
use hecs::World;
use systems::*;

/// Advance the lane runner by one frame.
///
/// `time.dt` is clamped to [`Params::MAX_DT`] and split into fixed
/// micro-steps. Nothing moves once the run has crashed.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    road: &Road,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    input: &mut DriverInput,
    rng: &mut GameRng,
    pool: &mut EnemyPool,
    spawner: &mut Spawner,
    difficulty: &mut Difficulty,
    run_state: &mut RunState,
) {
    events.clear();
    if !run_state.is_running() {
        return;
    }

    // Clamp dt to prevent large jumps
    let clamped_dt = time.dt.clamp(0.0, Params::MAX_DT);

    // Fixed micro-steps for stable integration
    let mut remaining_dt = clamped_dt;
    while remaining_dt > 0.0 {
        let step_dt = remaining_dt.min(Params::FIXED_DT);
        remaining_dt -= step_dt;

        let step_time = Time {
            dt: step_dt,
            now: time.now,
        };

        // 1. Ramp difficulty by survival time
        update_difficulty(difficulty, config, step_time.now);

        // 2. Throttle and steering intent (lane shift is consumed on first use)
        apply_input(world, input, config, road, step_dt, events);

        // 3. Ease player speed and lateral position
        drive_player(world, &step_time, road, config);
        let speed = player_speed(world);

        // 4. Oncoming traffic and scrolling road
        move_enemies(world, pool, &step_time, speed);
        scroll_markers(world, &step_time, config, speed);

        // 5. Pool maintenance
        recycle_enemies(world, pool, config, events);
        tick_spawner(
            world,
            pool,
            spawner,
            difficulty,
            &step_time,
            road,
            config,
            rng,
            events,
        );

        // 6. Collisions end the run
        check_collisions(world, pool, run_state, events);
        if !run_state.is_running() {
            break;
        }

        // 7. Survival score
        tick_score(score, run_state, step_dt);
        time.now += step_dt;
    }
}

/// Current speed of the player, zero if there is none
pub fn player_speed(world: &World) -> f32 {
    world
        .query::<&Player>()
        .iter()
        .next()
        .map(|(_e, player)| player.speed)
        .unwrap_or(0.0)
}

/// Helper to create the player car in the centre lane
pub fn create_player(world: &mut World, road: &Road, config: &Config) -> hecs::Entity {
    let lane = road.center_lane();
    world.spawn((
        Player::new(lane, config.start_speed),
        Transform::new(Vec3::new(road.lane_x(lane), 0.0, config.player_z), 0.0),
        Body::new(Vec3::new(
            config.car_width,
            config.car_height,
            config.car_length,
        )),
        Visible(true),
    ))
}
