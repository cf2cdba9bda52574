use wgpu::util::DeviceExt;
use wgpu::*;

use crate::camera::{Camera, CameraUniform};
use crate::scene::InstanceData;

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// Initial instance slots: road, shoulders, 40 markers and a few dozen cars
const INITIAL_INSTANCES: usize = 256;

pub struct GameBuffers {
    pub camera: Buffer,
    pub instances: Buffer,
    pub instance_capacity: usize,
}

pub fn create_buffers(device: &Device, camera: &Camera) -> GameBuffers {
    let camera_uniform = CameraUniform::from_camera(camera);
    let camera_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
        label: Some("Camera Buffer"),
        contents: bytemuck::cast_slice(&[camera_uniform]),
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
    });

    GameBuffers {
        camera: camera_buffer,
        instances: create_instance_buffer(device, INITIAL_INSTANCES),
        instance_capacity: INITIAL_INSTANCES,
    }
}

fn create_instance_buffer(device: &Device, capacity: usize) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some("Instance Buffer"),
        size: (capacity * std::mem::size_of::<InstanceData>()) as u64,
        usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Grow the instance buffer when the scene outgrows it
pub fn ensure_instance_capacity(device: &Device, buffers: &mut GameBuffers, needed: usize) {
    if needed <= buffers.instance_capacity {
        return;
    }
    let capacity = needed.next_power_of_two();
    tracing::debug!(capacity, "growing instance buffer");
    buffers.instances = create_instance_buffer(device, capacity);
    buffers.instance_capacity = capacity;
}

pub fn create_depth_view(device: &Device, width: u32, height: u32) -> TextureView {
    let texture = device.create_texture(&TextureDescriptor {
        label: Some("Depth Texture"),
        size: Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&TextureViewDescriptor::default())
}
