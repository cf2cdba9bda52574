use hecs::World;
use tracing::debug;

use crate::{Config, DriverInput, Events, Player, Road};

/// Apply sampled driver input to the player's speed and lane targets.
///
/// The lane shift is consumed so a single key press moves a single lane.
pub fn apply_input(
    world: &mut World,
    input: &mut DriverInput,
    config: &Config,
    road: &Road,
    dt: f32,
    events: &mut Events,
) {
    for (_entity, player) in world.query_mut::<&mut Player>() {
        let delta = match input.throttle.signum() {
            1 => config.throttle_rate * dt,
            -1 => -config.brake_rate * dt,
            _ => 0.0,
        };
        player.target_speed = config.clamp_speed(player.target_speed + delta);

        if input.lane_shift != 0 {
            let target = road.clamp_lane(player.target_lane as i32 + input.lane_shift as i32);
            if target != player.target_lane {
                debug!(from = player.target_lane, to = target, "lane change");
                player.target_lane = target;
                events.lane_changed = true;
            }
        }
    }

    input.lane_shift = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_player, Params};

    fn setup() -> (World, Config, Road, Events) {
        let config = Config::new();
        let road = Road::new(&config);
        let mut world = World::new();
        create_player(&mut world, &road, &config);
        (world, config, road, Events::new())
    }

    fn player(world: &World) -> Player {
        *world.query::<&Player>().iter().next().unwrap().1
    }

    #[test]
    fn test_throttle_raises_target_speed() {
        let (mut world, config, road, mut events) = setup();
        let mut input = DriverInput::new(1, 0);
        apply_input(&mut world, &mut input, &config, &road, 0.5, &mut events);
        let expected = config.start_speed + config.throttle_rate * 0.5;
        assert!((player(&world).target_speed - expected).abs() < 1e-5);
    }

    #[test]
    fn test_brake_lowers_target_speed() {
        let (mut world, config, road, mut events) = setup();
        let mut input = DriverInput::new(-1, 0);
        apply_input(&mut world, &mut input, &config, &road, 0.1, &mut events);
        assert!(player(&world).target_speed < config.start_speed);
    }

    #[test]
    fn test_target_speed_clamped_both_ways() {
        let (mut world, config, road, mut events) = setup();
        let mut input = DriverInput::new(1, 0);
        for _ in 0..500 {
            apply_input(&mut world, &mut input, &config, &road, Params::FIXED_DT, &mut events);
        }
        assert_eq!(player(&world).target_speed, config.max_forward_speed);

        let mut input = DriverInput::new(-1, 0);
        for _ in 0..500 {
            apply_input(&mut world, &mut input, &config, &road, Params::FIXED_DT, &mut events);
        }
        assert_eq!(player(&world).target_speed, config.max_reverse_speed);
    }

    #[test]
    fn test_lane_shift_is_consumed() {
        let (mut world, config, road, mut events) = setup();
        let mut input = DriverInput::new(0, -1);
        apply_input(&mut world, &mut input, &config, &road, 0.016, &mut events);
        assert_eq!(player(&world).target_lane, 0);
        assert_eq!(input.lane_shift, 0);
        assert!(events.lane_changed);

        // Same input struct again: no further movement
        events.clear();
        apply_input(&mut world, &mut input, &config, &road, 0.016, &mut events);
        assert_eq!(player(&world).target_lane, 0);
        assert!(!events.lane_changed);
    }

    #[test]
    fn test_lane_shift_clamped_at_edges() {
        let (mut world, config, road, mut events) = setup();
        let mut input = DriverInput::new(0, 5);
        apply_input(&mut world, &mut input, &config, &road, 0.016, &mut events);
        assert_eq!(player(&world).target_lane, 2);

        events.clear();
        let mut input = DriverInput::new(0, 1);
        apply_input(&mut world, &mut input, &config, &road, 0.016, &mut events);
        assert_eq!(player(&world).target_lane, 2);
        assert!(!events.lane_changed, "already in the rightmost lane");
    }
}
