use glam::Vec3;
use hecs::World;

use crate::{Body, Config, LaneMarker, Road, Time, Transform, Visible};

/// Far edge of the marker band; markers live in `[far, far + span)`
fn marker_far_z(config: &Config) -> f32 {
    config.player_z + config.recycle_distance - config.marker_span()
}

/// Wrap a marker Z back into the visible band
pub fn wrap_marker_z(z: f32, config: &Config) -> f32 {
    let far = marker_far_z(config);
    let span = config.marker_span();
    let offset = (z - far).rem_euclid(span);
    // rem_euclid can round up to exactly `span` for tiny negative inputs
    if offset >= span {
        far
    } else {
        far + offset
    }
}

/// Lay out `marker_count` dashes along every lane divider
pub fn spawn_markers(world: &mut World, road: &Road, config: &Config) {
    let far = marker_far_z(config);
    let size = Vec3::new(0.15, 0.02, config.marker_length);

    for divider in 0..road.lane_count.saturating_sub(1) {
        let x = road.divider_x(divider);
        for row in 0..config.marker_count {
            let z = far + row as f32 * config.marker_spacing;
            world.spawn((
                LaneMarker { divider },
                Transform::new(Vec3::new(x, 0.0, z), 0.0),
                Body::new(size),
                Visible(true),
            ));
        }
    }
}

/// Slide markers toward the camera and recycle the ones that pass it.
/// The player never moves in Z; the road moves instead.
pub fn scroll_markers(world: &mut World, time: &Time, config: &Config, player_speed: f32) {
    let dz = player_speed * time.dt;
    for (_entity, (_marker, transform)) in world.query_mut::<(&LaneMarker, &mut Transform)>() {
        transform.pos.z = wrap_marker_z(transform.pos.z + dz, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_zs(world: &World) -> Vec<f32> {
        let mut zs: Vec<f32> = world
            .query::<(&LaneMarker, &Transform)>()
            .iter()
            .map(|(_e, (_m, t))| t.pos.z)
            .collect();
        zs.sort_by(f32::total_cmp);
        zs
    }

    #[test]
    fn test_spawns_markers_per_divider() {
        let config = Config::new();
        let road = Road::new(&config);
        let mut world = World::new();
        spawn_markers(&mut world, &road, &config);
        // 3 lanes -> 2 dividers
        assert_eq!(marker_zs(&world).len(), 2 * config.marker_count as usize);
    }

    #[test]
    fn test_single_lane_has_no_markers() {
        let config = Config {
            lane_count: 1,
            ..Config::default()
        };
        let road = Road::new(&config);
        let mut world = World::new();
        spawn_markers(&mut world, &road, &config);
        assert!(marker_zs(&world).is_empty());
    }

    #[test]
    fn test_wrap_keeps_band() {
        let config = Config::new();
        let far = marker_far_z(&config);
        let near = far + config.marker_span();
        for z in [far - 500.0, far - 0.1, far, 0.0, near - 0.1, near, near + 333.0] {
            let wrapped = wrap_marker_z(z, &config);
            assert!(wrapped >= far && wrapped < near, "{z} wrapped to {wrapped}");
        }
    }

    #[test]
    fn test_scroll_forward_and_reverse_preserves_markers() {
        let config = Config::new();
        let road = Road::new(&config);
        let mut world = World::new();
        spawn_markers(&mut world, &road, &config);
        let before = marker_zs(&world).len();

        let time = Time::new(1.0 / 60.0, 0.0);
        for _ in 0..300 {
            scroll_markers(&mut world, &time, &config, config.max_forward_speed);
        }
        for _ in 0..300 {
            scroll_markers(&mut world, &time, &config, config.max_reverse_speed);
        }

        let zs = marker_zs(&world);
        assert_eq!(zs.len(), before);
        let far = marker_far_z(&config);
        assert!(zs.iter().all(|&z| z >= far && z < far + config.marker_span()));
    }

    #[test]
    fn test_scroll_moves_by_speed() {
        let config = Config::new();
        let mut world = World::new();
        let entity = world.spawn((
            LaneMarker { divider: 0 },
            Transform::new(Vec3::new(0.0, 0.0, -50.0), 0.0),
        ));
        scroll_markers(&mut world, &Time::new(0.5, 0.0), &config, 10.0);
        assert_eq!(world.get::<&Transform>(entity).unwrap().pos.z, -45.0);
    }
}
