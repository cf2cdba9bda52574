use glam::Vec3;
use hecs::World;
use rand::Rng;
use tracing::debug;

use crate::{
    Body, Config, Difficulty, Enemy, EnemyPool, Events, GameRng, Road, Spawner, Time, Transform,
};

/// Count down the spawn timer and spawn an enemy when it expires
#[allow(clippy::too_many_arguments)]
pub fn tick_spawner(
    world: &mut World,
    pool: &mut EnemyPool,
    spawner: &mut Spawner,
    difficulty: &Difficulty,
    time: &Time,
    road: &Road,
    config: &Config,
    rng: &mut GameRng,
    events: &mut Events,
) {
    spawner.timer -= time.dt;
    if spawner.timer > 0.0 {
        return;
    }
    spawner.timer = difficulty.spawn_interval;

    if spawn_enemy(world, pool, difficulty, road, config, rng).is_some() {
        events.spawned += 1;
    }
}

/// Lanes holding an active enemy within `spawn_clearance` of the spawn line
fn blocked_lanes(world: &World, pool: &EnemyPool, road: &Road, config: &Config) -> Vec<bool> {
    let mut blocked = vec![false; road.lane_count as usize];
    for &entity in pool.active() {
        let Ok(mut query) = world.query_one::<(&Enemy, &Transform)>(entity) else {
            continue;
        };
        if let Some((enemy, transform)) = query.get() {
            if (transform.pos.z - config.spawn_z).abs() < config.spawn_clearance {
                if let Some(slot) = blocked.get_mut(enemy.lane as usize) {
                    *slot = true;
                }
            }
        }
    }
    blocked
}

/// Place one enemy at the spawn line.
///
/// Returns `None` when no lane is clear, or when filling the last clear lane
/// would wall off the road.
pub fn spawn_enemy(
    world: &mut World,
    pool: &mut EnemyPool,
    difficulty: &Difficulty,
    road: &Road,
    config: &Config,
    rng: &mut GameRng,
) -> Option<hecs::Entity> {
    let blocked = blocked_lanes(world, pool, road, config);
    let open = blocked.iter().filter(|b| !**b).count();

    // Always leave the player a gap on multi-lane roads
    if open == 0 || (road.lane_count > 1 && open == 1) {
        debug!(open, "spawn skipped, lanes full");
        return None;
    }

    let lane_count = road.lane_count as usize;
    let start = rng.0.gen_range(0..lane_count);
    let lane = (0..lane_count)
        .map(|i| (start + i) % lane_count)
        .find(|&lane| !blocked[lane])? as u8;

    let speed = if difficulty.enemy_speed_max > difficulty.enemy_speed_min {
        rng.0
            .gen_range(difficulty.enemy_speed_min..=difficulty.enemy_speed_max)
    } else {
        difficulty.enemy_speed_min
    };

    let transform = Transform::new(
        Vec3::new(road.lane_x(lane), 0.0, config.spawn_z),
        std::f32::consts::PI, // facing the player
    );
    let body = Body::new(Vec3::new(
        config.car_width,
        config.car_height,
        config.car_length,
    ));

    let entity = pool.acquire(world, Enemy::new(lane, speed), transform, body);
    debug!(lane, speed, allocated = pool.len_allocated(), "enemy spawned");
    Some(entity)
}

/// Return enemies that left the play area to the pool
pub fn recycle_enemies(
    world: &mut World,
    pool: &mut EnemyPool,
    config: &Config,
    events: &mut Events,
) {
    let behind = config.player_z + config.recycle_distance;
    let expired: Vec<hecs::Entity> = pool
        .active()
        .iter()
        .copied()
        .filter(|&entity| {
            world
                .get::<&Transform>(entity)
                .map(|t| t.pos.z > behind || t.pos.z < config.far_cull_z)
                .unwrap_or(true)
        })
        .collect();

    for entity in expired {
        if pool.release(world, entity) {
            events.recycled += 1;
            debug!(?entity, "enemy recycled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Visible;

    struct Fixture {
        world: World,
        pool: EnemyPool,
        spawner: Spawner,
        difficulty: Difficulty,
        road: Road,
        config: Config,
        rng: GameRng,
        events: Events,
    }

    fn setup() -> Fixture {
        let config = Config::new();
        Fixture {
            world: World::new(),
            pool: EnemyPool::new(),
            spawner: Spawner::new(&config),
            difficulty: Difficulty::new(&config),
            road: Road::new(&config),
            rng: GameRng::new(7),
            events: Events::new(),
            config,
        }
    }

    fn tick(f: &mut Fixture, dt: f32) {
        tick_spawner(
            &mut f.world,
            &mut f.pool,
            &mut f.spawner,
            &f.difficulty,
            &Time::new(dt, 0.0),
            &f.road,
            &f.config,
            &mut f.rng,
            &mut f.events,
        );
    }

    fn set_z(world: &mut World, entity: hecs::Entity, z: f32) {
        world.get::<&mut Transform>(entity).unwrap().pos.z = z;
    }

    #[test]
    fn test_no_spawn_before_timer_expires() {
        let mut f = setup();
        let dt = f.config.spawn_initial_delay * 0.5;
        tick(&mut f, dt);
        assert!(f.pool.active().is_empty());
        assert_eq!(f.events.spawned, 0);
    }

    #[test]
    fn test_spawn_resets_timer_to_interval() {
        let mut f = setup();
        f.difficulty.spawn_interval = 0.8;
        let dt = f.config.spawn_initial_delay + 0.01;
        tick(&mut f, dt);
        assert_eq!(f.pool.active().len(), 1);
        assert_eq!(f.events.spawned, 1);
        assert_eq!(f.spawner.timer, 0.8);
    }

    #[test]
    fn test_spawned_enemy_is_placed_in_valid_lane() {
        let mut f = setup();
        let entity = spawn_enemy(
            &mut f.world,
            &mut f.pool,
            &f.difficulty,
            &f.road,
            &f.config,
            &mut f.rng,
        )
        .expect("empty road has room");

        let enemy = *f.world.get::<&Enemy>(entity).unwrap();
        let transform = *f.world.get::<&Transform>(entity).unwrap();
        assert!(enemy.lane < f.config.lane_count);
        assert_eq!(transform.pos.x, f.road.lane_x(enemy.lane));
        assert_eq!(transform.pos.z, f.config.spawn_z);
        assert!(enemy.speed >= f.difficulty.enemy_speed_min);
        assert!(enemy.speed <= f.difficulty.enemy_speed_max);
    }

    #[test]
    fn test_never_walls_off_all_lanes() {
        let mut f = setup();
        let mut spawned = 0;
        for _ in 0..10 {
            if spawn_enemy(
                &mut f.world,
                &mut f.pool,
                &f.difficulty,
                &f.road,
                &f.config,
                &mut f.rng,
            )
            .is_some()
            {
                spawned += 1;
            }
        }
        assert_eq!(spawned, 2, "third lane must stay open near the spawn line");

        let mut lanes: Vec<u8> = f
            .pool
            .active()
            .iter()
            .map(|&e| f.world.get::<&Enemy>(e).unwrap().lane)
            .collect();
        lanes.sort();
        lanes.dedup();
        assert_eq!(lanes.len(), 2, "spawns must use distinct lanes");
    }

    #[test]
    fn test_spawn_resumes_once_lane_clears() {
        let mut f = setup();
        let first = spawn_enemy(
            &mut f.world,
            &mut f.pool,
            &f.difficulty,
            &f.road,
            &f.config,
            &mut f.rng,
        )
        .unwrap();
        let _second = spawn_enemy(
            &mut f.world,
            &mut f.pool,
            &f.difficulty,
            &f.road,
            &f.config,
            &mut f.rng,
        )
        .unwrap();

        set_z(&mut f.world, first, f.config.spawn_z + f.config.spawn_clearance + 1.0);
        assert!(spawn_enemy(
            &mut f.world,
            &mut f.pool,
            &f.difficulty,
            &f.road,
            &f.config,
            &mut f.rng,
        )
        .is_some());
    }

    #[test]
    fn test_recycle_behind_player() {
        let mut f = setup();
        let entity = spawn_enemy(
            &mut f.world,
            &mut f.pool,
            &f.difficulty,
            &f.road,
            &f.config,
            &mut f.rng,
        )
        .unwrap();

        set_z(&mut f.world, entity, f.config.player_z + f.config.recycle_distance - 0.1);
        recycle_enemies(&mut f.world, &mut f.pool, &f.config, &mut f.events);
        assert!(f.pool.is_active(entity), "not far enough behind yet");

        set_z(&mut f.world, entity, f.config.player_z + f.config.recycle_distance + 0.1);
        recycle_enemies(&mut f.world, &mut f.pool, &f.config, &mut f.events);
        assert!(!f.pool.is_active(entity));
        assert_eq!(f.events.recycled, 1);
        assert!(!f.world.get::<&Visible>(entity).unwrap().0);
    }

    #[test]
    fn test_recycle_far_ahead_when_reversing() {
        let mut f = setup();
        let entity = spawn_enemy(
            &mut f.world,
            &mut f.pool,
            &f.difficulty,
            &f.road,
            &f.config,
            &mut f.rng,
        )
        .unwrap();
        set_z(&mut f.world, entity, f.config.far_cull_z - 1.0);
        recycle_enemies(&mut f.world, &mut f.pool, &f.config, &mut f.events);
        assert!(f.pool.free().contains(&entity));
    }

    #[test]
    fn test_recycled_enemy_is_reused_by_spawner() {
        let mut f = setup();
        let entity = spawn_enemy(
            &mut f.world,
            &mut f.pool,
            &f.difficulty,
            &f.road,
            &f.config,
            &mut f.rng,
        )
        .unwrap();
        set_z(&mut f.world, entity, 100.0);
        recycle_enemies(&mut f.world, &mut f.pool, &f.config, &mut f.events);

        let again = spawn_enemy(
            &mut f.world,
            &mut f.pool,
            &f.difficulty,
            &f.road,
            &f.config,
            &mut f.rng,
        )
        .unwrap();
        assert_eq!(entity, again);
        assert_eq!(f.pool.len_allocated(), 1);
        assert_eq!(f.pool.active(), &[entity]);
    }

    #[test]
    fn test_single_lane_road_still_spawns() {
        let mut f = setup();
        f.config.lane_count = 1;
        f.road = Road::new(&f.config);
        assert!(spawn_enemy(
            &mut f.world,
            &mut f.pool,
            &f.difficulty,
            &f.road,
            &f.config,
            &mut f.rng,
        )
        .is_some());
    }
}
