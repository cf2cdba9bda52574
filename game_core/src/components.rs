use glam::{Vec2, Vec3};

use crate::Aabb;

/// World placement read by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub pos: Vec3,
    pub yaw: f32, // radians around +Y, 0 = facing -Z (down the road)
}

impl Transform {
    pub fn new(pos: Vec3, yaw: f32) -> Self {
        Self { pos, yaw }
    }
}

/// Full box extents of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub size: Vec3,
}

impl Body {
    pub fn new(size: Vec3) -> Self {
        Self { size }
    }

    /// Footprint on the road plane centred on `transform`
    pub fn footprint(&self, transform: &Transform) -> Aabb {
        Aabb::from_center_size(
            Vec2::new(transform.pos.x, transform.pos.z),
            Vec2::new(self.size.x, self.size.z),
        )
    }
}

/// Render visibility. Pooled enemies stay in the world but are hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visible(pub bool);

/// The player's car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub lane: u8,        // lane the car currently occupies
    pub target_lane: u8, // lane the car is steering toward
    pub speed: f32,
    pub target_speed: f32,
}

impl Player {
    pub fn new(lane: u8, speed: f32) -> Self {
        Self {
            lane,
            target_lane: lane,
            speed,
            target_speed: speed,
        }
    }
}

/// An oncoming car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub lane: u8,
    pub speed: f32, // own speed toward the player (+Z)
}

impl Enemy {
    pub fn new(lane: u8, speed: f32) -> Self {
        Self { lane, speed }
    }
}

/// One dash of a lane divider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneMarker {
    pub divider: u8,
}
