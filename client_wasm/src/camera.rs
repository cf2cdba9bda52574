//! Chase camera for the lane runner
//!
//! Sits behind and above the player and looks down the -Z road.

use glam::{Mat4, Vec3};

const FOV_Y: f32 = 60.0_f32 * std::f32::consts::PI / 180.0;
const HEIGHT: f32 = 5.5;
const DISTANCE: f32 = 11.0;
const LOOK_AHEAD: f32 = 20.0;
const FOLLOW: f32 = 0.6; // fraction of the player's lateral offset the camera tracks

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub aspect: f32,
}

impl Camera {
    pub fn chase(aspect: f32) -> Self {
        let mut camera = Self {
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            aspect,
        };
        camera.follow(0.0, 0.0);
        camera
    }

    /// Track the player at (`x`, `z`)
    pub fn follow(&mut self, x: f32, z: f32) {
        let cam_x = x * FOLLOW;
        self.eye = Vec3::new(cam_x, HEIGHT, z + DISTANCE);
        self.target = Vec3::new(cam_x, 0.0, z - LOOK_AHEAD);
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        let projection = Mat4::perspective_rh(FOV_Y, self.aspect.max(0.01), 0.1, 400.0);
        projection * view
    }
}

/// Camera uniform data (matches WGSL struct, 256-byte aligned)
#[repr(C, align(256))]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4], // 64 bytes (mat4x4)
    _padding: [f32; 48],      // 192 bytes padding (48 * 4) to reach 256 bytes
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            _padding: [0.0; 48],
        }
    }
}
