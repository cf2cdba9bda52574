//! Turn the simulation world into cube instances for the renderer

use game_core::{Body, Enemy, LaneMarker, Player, Road, Transform, Visible};
use glam::Vec3;
use hecs::World;

/// Instance data for rendering (matches shader InstanceInput).
/// Must use `repr(C)` and `bytemuck` to safely cast to raw bytes for the GPU buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub placement: [f32; 4], // x, y, z (box centre), yaw
    pub scale: [f32; 4],     // box size x, y, z, unused
    pub tint: [f32; 4],      // rgba
}

impl InstanceData {
    fn new(center: Vec3, yaw: f32, size: Vec3, tint: [f32; 4]) -> Self {
        Self {
            placement: [center.x, center.y, center.z, yaw],
            scale: [size.x, size.y, size.z, 0.0],
            tint,
        }
    }
}

pub const ROAD_TINT: [f32; 4] = [0.16, 0.17, 0.19, 1.0];
pub const SHOULDER_TINT: [f32; 4] = [0.85, 0.85, 0.8, 1.0];
pub const MARKER_TINT: [f32; 4] = [0.95, 0.9, 0.55, 1.0];
pub const PLAYER_TINT: [f32; 4] = [0.1, 0.55, 0.95, 1.0];
pub const ENEMY_TINT: [f32; 4] = [0.9, 0.2, 0.18, 1.0];
pub const CABIN_TINT: [f32; 4] = [0.12, 0.14, 0.2, 1.0];

const ROAD_LENGTH: f32 = 400.0;
const ROAD_THICKNESS: f32 = 0.1;
const SHOULDER_WIDTH: f32 = 0.3;
const CABIN_SCALE: Vec3 = Vec3::new(0.8, 0.6, 0.45);
const CABIN_SETBACK: f32 = 0.12; // fraction of body length toward the rear

/// Rotate `v` around +Y by `yaw` (same convention as the shader)
fn rotate_y(v: Vec3, yaw: f32) -> Vec3 {
    let (s, c) = yaw.sin_cos();
    Vec3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}

/// Body box plus a smaller cabin box on top, set back toward the rear
fn push_car(out: &mut Vec<InstanceData>, transform: &Transform, body: &Body, tint: [f32; 4]) {
    let size = body.size;
    let base = transform.pos + Vec3::Y * (size.y * 0.5);
    out.push(InstanceData::new(base, transform.yaw, size, tint));

    let cabin = size * CABIN_SCALE;
    let local = Vec3::new(0.0, (size.y + cabin.y) * 0.5, size.z * CABIN_SETBACK);
    out.push(InstanceData::new(
        base + rotate_y(local, transform.yaw),
        transform.yaw,
        cabin,
        CABIN_TINT,
    ));
}

/// Rebuild `out` with everything visible this frame
pub fn build_instances(world: &World, road: &Road, player_z: f32, out: &mut Vec<InstanceData>) {
    out.clear();

    // Road slab and shoulders stay put; only the markers scroll
    let road_width = road.half_width() * 2.0;
    let road_center = Vec3::new(0.0, -ROAD_THICKNESS * 0.5, player_z - ROAD_LENGTH * 0.4);
    out.push(InstanceData::new(
        road_center,
        0.0,
        Vec3::new(road_width, ROAD_THICKNESS, ROAD_LENGTH),
        ROAD_TINT,
    ));
    for side in [-1.0, 1.0] {
        out.push(InstanceData::new(
            road_center + Vec3::new(side * (road.half_width() + SHOULDER_WIDTH * 0.5), 0.01, 0.0),
            0.0,
            Vec3::new(SHOULDER_WIDTH, ROAD_THICKNESS, ROAD_LENGTH),
            SHOULDER_TINT,
        ));
    }

    for (_e, (_marker, transform, body, visible)) in world
        .query::<(&LaneMarker, &Transform, &Body, &Visible)>()
        .iter()
    {
        if visible.0 {
            let center = transform.pos + Vec3::Y * 0.01;
            out.push(InstanceData::new(center, transform.yaw, body.size, MARKER_TINT));
        }
    }

    for (_e, (_player, transform, body)) in world.query::<(&Player, &Transform, &Body)>().iter() {
        push_car(out, transform, body, PLAYER_TINT);
    }

    for (_e, (_enemy, transform, body, visible)) in world
        .query::<(&Enemy, &Transform, &Body, &Visible)>()
        .iter()
    {
        if visible.0 {
            push_car(out, transform, body, ENEMY_TINT);
        }
    }
}
