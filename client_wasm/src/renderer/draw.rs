use wgpu::*;

use super::resources::ensure_instance_capacity;
use super::Renderer;
use crate::camera::CameraUniform;
use crate::scene::build_instances;
use game_core::Session;

/// Matches the fog colour in the shader
const SKY: Color = Color {
    r: 0.55,
    g: 0.72,
    b: 0.9,
    a: 1.0,
};

pub fn draw_frame(renderer: &mut Renderer, session: &Session) -> Result<(), String> {
    let output = match renderer.surface.get_current_texture() {
        Ok(output) => output,
        Err(SurfaceError::Lost | SurfaceError::Outdated) => {
            // Skip this frame; the next one draws to the fresh surface
            renderer
                .surface
                .configure(&renderer.device, &renderer.surface_config);
            return Ok(());
        }
        Err(e) => return Err(format!("Failed to get current texture: {:?}", e)),
    };
    let view = output.texture.create_view(&TextureViewDescriptor::default());

    update_buffers(renderer, session);

    let mut encoder = renderer
        .device
        .create_command_encoder(&CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
    {
        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Main Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(SKY),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: &renderer.depth_view,
                depth_ops: Some(Operations {
                    load: LoadOp::Clear(1.0),
                    store: StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&renderer.pipeline);
        pass.set_bind_group(0, &renderer.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, renderer.cube.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, renderer.buffers.instances.slice(..));
        pass.set_index_buffer(renderer.cube.index_buffer.slice(..), IndexFormat::Uint16);
        pass.draw_indexed(
            0..renderer.cube.index_count,
            0,
            0..renderer.instances.len() as u32,
        );
    }

    renderer.queue.submit(std::iter::once(encoder.finish()));
    output.present();

    Ok(())
}

fn update_buffers(renderer: &mut Renderer, session: &Session) {
    if let Some(transform) = session.player_transform() {
        renderer.camera.follow(transform.pos.x, transform.pos.z);
    }
    let uniform = CameraUniform::from_camera(&renderer.camera);
    renderer
        .queue
        .write_buffer(&renderer.buffers.camera, 0, bytemuck::cast_slice(&[uniform]));

    build_instances(
        &session.world,
        &session.road,
        session.config.player_z,
        &mut renderer.instances,
    );
    ensure_instance_capacity(
        &renderer.device,
        &mut renderer.buffers,
        renderer.instances.len(),
    );
    if !renderer.instances.is_empty() {
        renderer.queue.write_buffer(
            &renderer.buffers.instances,
            0,
            bytemuck::cast_slice(&renderer.instances),
        );
    }
}
