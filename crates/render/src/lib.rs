#![warn(missing_docs)]
//! Forward renderer: fog, directional/ambient lighting, and a sky pass
//! on top of wgpu. Pixel-perfect output is a non-goal; the renderer is
//! a read-only consumer of pose snapshots.

mod context;
mod mesh;
mod pipeline;

pub use context::RenderContext;
pub use mesh::{heightfield_mesh, plane_mesh, MeshBuffers, MeshVertex};
pub use pipeline::{
    CameraUniform, MeshBuffer, ModelInstance, SceneLighting, ScenePipeline, SceneUniform,
    SkyPipeline,
};

use anyhow::Result;
use terraflight_camera::ChaseCamera;

/// Main renderer owning GPU resources.
pub struct Renderer {
    context: RenderContext,
    scene_pipeline: ScenePipeline,
    sky_pipeline: SkyPipeline,
}

impl Renderer {
    /// Initialize the renderer against a window (async).
    pub async fn new(window: std::sync::Arc<winit::window::Window>) -> Result<Self> {
        let context = RenderContext::new(window).await?;
        let scene_pipeline = ScenePipeline::new(&context)?;
        let sky_pipeline = SkyPipeline::new(&context)?;
        tracing::info!("renderer initialized");
        Ok(Self {
            context,
            scene_pipeline,
            sky_pipeline,
        })
    }

    /// Resize swapchain and depth resources.
    pub fn resize(&mut self, new_size: (u32, u32)) {
        self.context.resize(new_size);
        self.scene_pipeline
            .resize(&self.context.device, self.context.size);
    }

    /// Current aspect ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.context.aspect_ratio()
    }

    /// Upload a mesh to the GPU.
    pub fn upload_mesh(&self, mesh: &MeshBuffers) -> MeshBuffer {
        MeshBuffer::new(&self.context.device, &mesh.vertices, &mesh.indices)
    }

    /// Create a per-draw model instance textured with the ground texture.
    pub fn create_instance(&self, model: glam::Mat4) -> ModelInstance {
        self.scene_pipeline
            .create_instance(&self.context.device, model)
    }

    /// Create a per-draw model instance with a tint; `tint.w` blends
    /// between solid color (0.0) and the ground texture (1.0).
    pub fn create_tinted_instance(&self, model: glam::Mat4, tint: glam::Vec4) -> ModelInstance {
        self.scene_pipeline
            .create_instance_with_tint(&self.context.device, model, tint)
    }

    /// Rewrite an instance's model matrix (for moving entities).
    pub fn update_instance(&self, instance: &ModelInstance, model: glam::Mat4) {
        instance.update(&self.context.queue, model);
    }

    /// Push the camera transform for this frame.
    pub fn update_camera(&self, camera: &ChaseCamera) {
        self.scene_pipeline
            .update_camera(&self.context.queue, camera);
    }

    /// Push lighting and fog parameters.
    pub fn update_lighting(&self, lighting: &SceneLighting) {
        self.scene_pipeline
            .update_scene(&self.context.queue, lighting);
        self.sky_pipeline.update_sky(&self.context.queue, lighting);
    }

    /// Render one frame: sky first, then all mesh draws.
    ///
    /// A lost or outdated surface reconfigures and skips the frame;
    /// the next one will present normally.
    pub fn render(&mut self, draws: &[(&MeshBuffer, &ModelInstance)]) -> Result<()> {
        let frame = match self.context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring");
                self.context.resize(self.context.size);
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("frame encoder"),
                });

        {
            let mut pass = self.sky_pipeline.begin_render_pass(&mut encoder, &view);
            pass.set_pipeline(self.sky_pipeline.pipeline());
            pass.set_bind_group(0, self.sky_pipeline.sky_bind_group(), &[]);
            // Fullscreen triangle generated in the shader.
            pass.draw(0..3, 0..1);
        }

        {
            let mut pass = self.scene_pipeline.begin_render_pass(&mut encoder, &view);
            pass.set_pipeline(self.scene_pipeline.pipeline());
            pass.set_bind_group(0, self.scene_pipeline.frame_bind_group(), &[]);
            pass.set_bind_group(2, self.scene_pipeline.texture_bind_group(), &[]);
            for (mesh, instance) in draws {
                pass.set_bind_group(1, instance.bind_group(), &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
