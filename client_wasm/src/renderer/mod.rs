pub mod draw;
pub mod init;
pub mod pipeline;
pub mod resources;
pub mod shaders;

use crate::camera::Camera;
use crate::mesh::{create_cube, Mesh};
use crate::scene::InstanceData;
use game_core::Session;
use resources::GameBuffers;
use wgpu::*;

pub struct Renderer {
    pub device: Device,
    pub queue: Queue,
    pub surface: Surface<'static>,
    pub surface_config: SurfaceConfiguration,
    pub camera: Camera,

    pub pipeline: RenderPipeline,
    pub camera_bind_group: BindGroup,

    pub buffers: GameBuffers,
    pub depth_view: TextureView,
    pub cube: Mesh,

    /// Scratch list rebuilt every frame
    pub instances: Vec<InstanceData>,
}

impl Renderer {
    pub async fn new(canvas: web_sys::HtmlCanvasElement) -> Result<Self, String> {
        let ctx = init::init_wgpu(canvas).await?;
        let aspect = ctx.config.width as f32 / ctx.config.height as f32;
        let camera = Camera::chase(aspect);

        let buffers = resources::create_buffers(&ctx.device, &camera);
        let depth_view =
            resources::create_depth_view(&ctx.device, ctx.config.width, ctx.config.height);
        let pipes = pipeline::create_pipeline(&ctx.device, ctx.config.format);

        let (vertices, indices) = create_cube();
        let cube = Mesh::new(&ctx.device, &ctx.queue, &vertices, &indices);

        let camera_bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &pipes.camera_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: buffers.camera.as_entire_binding(),
            }],
        });

        Ok(Self {
            device: ctx.device,
            queue: ctx.queue,
            surface: ctx.surface,
            surface_config: ctx.config,
            camera,
            pipeline: pipes.pipeline,
            camera_bind_group,
            buffers,
            depth_view,
            cube,
            instances: Vec::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let max = self.device.limits().max_texture_dimension_2d;
        let (width, height) = init::fit_to_limit(width, height, max);
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = resources::create_depth_view(&self.device, width, height);
        self.camera.aspect = width as f32 / height as f32;
        tracing::debug!(width, height, "surface resized");
    }

    pub fn draw(&mut self, session: &Session) -> Result<(), String> {
        draw::draw_frame(self, session)
    }
}
