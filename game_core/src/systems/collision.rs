use hecs::World;
use tracing::info;

use crate::{Body, EnemyPool, Events, Player, RunState, Transform};

/// End the run on the first player/enemy overlap
pub fn check_collisions(
    world: &mut World,
    pool: &EnemyPool,
    run_state: &mut RunState,
    events: &mut Events,
) {
    let player_box = {
        let mut query = world.query::<(&Player, &Transform, &Body)>();
        query
            .iter()
            .next()
            .map(|(entity, (_p, transform, body))| (entity, body.footprint(transform)))
    };

    let Some((player_entity, player_box)) = player_box else {
        return; // No player in world
    };

    let hit = pool.active().iter().copied().find(|&entity| {
        world
            .query_one::<(&Transform, &Body)>(entity)
            .ok()
            .and_then(|mut q| q.get().map(|(t, b)| b.footprint(t)))
            .is_some_and(|enemy_box| player_box.overlaps(&enemy_box))
    });

    if let Some(enemy) = hit {
        info!(?enemy, "player crashed");
        *run_state = RunState::Crashed;
        events.crashed = true;

        if let Ok(mut player) = world.get::<&mut Player>(player_entity) {
            player.speed = 0.0;
            player.target_speed = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_player, Config, Enemy, Road};
    use glam::Vec3;

    fn setup() -> (World, Config, EnemyPool, RunState, Events) {
        let config = Config::new();
        let road = Road::new(&config);
        let mut world = World::new();
        create_player(&mut world, &road, &config);
        (world, config, EnemyPool::new(), RunState::Running, Events::new())
    }

    fn place_enemy(
        world: &mut World,
        pool: &mut EnemyPool,
        config: &Config,
        x: f32,
        z: f32,
    ) -> hecs::Entity {
        pool.acquire(
            world,
            Enemy::new(1, 10.0),
            Transform::new(Vec3::new(x, 0.0, z), std::f32::consts::PI),
            Body::new(Vec3::new(
                config.car_width,
                config.car_height,
                config.car_length,
            )),
        )
    }

    #[test]
    fn test_head_on_overlap_crashes() {
        let (mut world, config, mut pool, mut run, mut events) = setup();
        place_enemy(&mut world, &mut pool, &config, 0.0, -config.car_length * 0.5);

        check_collisions(&mut world, &pool, &mut run, &mut events);

        assert_eq!(run, RunState::Crashed);
        assert!(events.crashed);
        let player = *world.query::<&Player>().iter().next().unwrap().1;
        assert_eq!(player.speed, 0.0);
    }

    #[test]
    fn test_touching_bumpers_do_not_crash() {
        let (mut world, config, mut pool, mut run, mut events) = setup();
        // Exactly one car length ahead: front and rear bumpers touch
        place_enemy(&mut world, &mut pool, &config, 0.0, -config.car_length);

        check_collisions(&mut world, &pool, &mut run, &mut events);

        assert_eq!(run, RunState::Running);
        assert!(!events.crashed);
    }

    #[test]
    fn test_adjacent_lane_does_not_crash() {
        let (mut world, config, mut pool, mut run, mut events) = setup();
        let road = Road::new(&config);
        place_enemy(&mut world, &mut pool, &config, road.lane_x(2), 0.0);

        check_collisions(&mut world, &pool, &mut run, &mut events);

        assert_eq!(run, RunState::Running);
    }

    #[test]
    fn test_partial_lateral_overlap_crashes() {
        let (mut world, config, mut pool, mut run, mut events) = setup();
        // Half a car width off-centre still overlaps
        place_enemy(&mut world, &mut pool, &config, config.car_width * 0.5, 0.0);

        check_collisions(&mut world, &pool, &mut run, &mut events);

        assert_eq!(run, RunState::Crashed);
    }

    #[test]
    fn test_pooled_enemy_is_ignored() {
        let (mut world, config, mut pool, mut run, mut events) = setup();
        let enemy = place_enemy(&mut world, &mut pool, &config, 0.0, 0.0);
        pool.release(&mut world, enemy);

        check_collisions(&mut world, &pool, &mut run, &mut events);

        assert_eq!(run, RunState::Running, "hidden enemies are not on the road");
    }

    #[test]
    fn test_no_player_is_noop() {
        let config = Config::new();
        let mut world = World::new();
        let mut pool = EnemyPool::new();
        let mut run = RunState::Running;
        let mut events = Events::new();
        place_enemy(&mut world, &mut pool, &config, 0.0, 0.0);

        check_collisions(&mut world, &pool, &mut run, &mut events);

        assert_eq!(run, RunState::Running);
    }
}
