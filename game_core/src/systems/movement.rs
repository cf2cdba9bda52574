use hecs::World;

use crate::{Config, Enemy, EnemyPool, Player, Road, Time, Transform};

/// Exponential approach: `value + (target - value) * min(1, dt * rate)`
pub fn smooth(value: f32, target: f32, rate: f32, dt: f32) -> f32 {
    value + (target - value) * (dt * rate).min(1.0)
}

/// Ease the player's speed and lateral position toward their targets
pub fn drive_player(world: &mut World, time: &Time, road: &Road, config: &Config) {
    for (_entity, (player, transform)) in world.query_mut::<(&mut Player, &mut Transform)>() {
        player.target_speed = config.clamp_speed(player.target_speed);
        player.speed = config.clamp_speed(smooth(
            player.speed,
            player.target_speed,
            config.speed_smoothing,
            time.dt,
        ));

        let target_x = road.lane_x(player.target_lane);
        transform.pos.x = smooth(transform.pos.x, target_x, config.steer_smoothing, time.dt);

        if (target_x - transform.pos.x).abs() < road.lane_width / 2.0 {
            player.lane = player.target_lane;
        }

        // Nose toward the target lane; positive yaw turns toward -X
        let offset = ((target_x - transform.pos.x) / road.lane_width).clamp(-1.0, 1.0);
        transform.yaw = -offset * config.max_tilt;
    }
}

/// Oncoming traffic closes at the sum of both speeds
pub fn move_enemies(world: &mut World, pool: &EnemyPool, time: &Time, player_speed: f32) {
    for &entity in pool.active() {
        if let Ok((enemy, transform)) = world.query_one_mut::<(&Enemy, &mut Transform)>(entity) {
            transform.pos.z += (player_speed + enemy.speed) * time.dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_player, Body};
    use glam::Vec3;

    fn setup() -> (World, Config, Road, hecs::Entity) {
        let config = Config::new();
        let road = Road::new(&config);
        let mut world = World::new();
        let player = create_player(&mut world, &road, &config);
        (world, config, road, player)
    }

    #[test]
    fn test_smooth_moves_fraction_of_gap() {
        let v = smooth(0.0, 10.0, 2.0, 0.1);
        assert!((v - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_smooth_never_overshoots() {
        // dt * rate > 1 snaps to target instead of overshooting
        assert_eq!(smooth(0.0, 10.0, 50.0, 0.1), 10.0);
        assert_eq!(smooth(5.0, -5.0, 100.0, 1.0), -5.0);
    }

    #[test]
    fn test_speed_converges_to_target() {
        let (mut world, config, road, entity) = setup();
        world.get::<&mut Player>(entity).unwrap().target_speed = 30.0;
        let time = Time::new(1.0 / 60.0, 0.0);
        for _ in 0..600 {
            drive_player(&mut world, &time, &road, &config);
        }
        let speed = world.get::<&Player>(entity).unwrap().speed;
        assert!((speed - 30.0).abs() < 0.01, "speed was {speed}");
    }

    #[test]
    fn test_speed_stays_clamped() {
        let (mut world, config, road, entity) = setup();
        {
            let mut player = world.get::<&mut Player>(entity).unwrap();
            player.speed = 500.0;
            player.target_speed = 900.0;
        }
        let time = Time::new(0.016, 0.0);
        drive_player(&mut world, &time, &road, &config);
        let player = *world.get::<&Player>(entity).unwrap();
        assert!(player.speed <= config.max_forward_speed);
        assert!(player.target_speed <= config.max_forward_speed);
    }

    #[test]
    fn test_steering_reaches_target_lane() {
        let (mut world, config, road, entity) = setup();
        world.get::<&mut Player>(entity).unwrap().target_lane = 2;
        let time = Time::new(1.0 / 60.0, 0.0);

        drive_player(&mut world, &time, &road, &config);
        let yaw = world.get::<&Transform>(entity).unwrap().yaw;
        assert!(yaw < 0.0, "steering right should yaw negative, got {yaw}");

        for _ in 0..240 {
            drive_player(&mut world, &time, &road, &config);
        }
        let transform = *world.get::<&Transform>(entity).unwrap();
        let player = *world.get::<&Player>(entity).unwrap();
        assert!((transform.pos.x - road.lane_x(2)).abs() < 0.01);
        assert_eq!(player.lane, 2);
        assert!(transform.yaw.abs() < 0.01);
    }

    #[test]
    fn test_lane_switches_at_halfway() {
        let (mut world, config, road, entity) = setup();
        world.get::<&mut Player>(entity).unwrap().target_lane = 0;
        // A tiny step barely moves the car; it still belongs to lane 1
        let time = Time::new(0.001, 0.0);
        drive_player(&mut world, &time, &road, &config);
        assert_eq!(world.get::<&Player>(entity).unwrap().lane, 1);
    }

    #[test]
    fn test_enemies_close_at_combined_speed() {
        let (mut world, _config, _road, _player) = setup();
        let mut pool = EnemyPool::new();
        let enemy = pool.acquire(
            &mut world,
            Enemy::new(1, 10.0),
            Transform::new(Vec3::new(0.0, 0.0, -100.0), 0.0),
            Body::new(Vec3::ONE),
        );
        let time = Time::new(0.5, 0.0);
        move_enemies(&mut world, &pool, &time, 20.0);
        let z = world.get::<&Transform>(enemy).unwrap().pos.z;
        assert!((z - (-85.0)).abs() < 1e-4, "z was {z}");
    }

    #[test]
    fn test_pooled_enemies_do_not_move() {
        let (mut world, _config, _road, _player) = setup();
        let mut pool = EnemyPool::new();
        let enemy = pool.acquire(
            &mut world,
            Enemy::new(1, 10.0),
            Transform::new(Vec3::new(0.0, 0.0, -100.0), 0.0),
            Body::new(Vec3::ONE),
        );
        pool.release(&mut world, enemy);
        move_enemies(&mut world, &pool, &Time::new(1.0, 0.0), 20.0);
        assert_eq!(world.get::<&Transform>(enemy).unwrap().pos.z, -100.0);
    }
}
