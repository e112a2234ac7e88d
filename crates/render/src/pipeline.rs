//! GPU rendering pipelines: the forward scene pass and the sky pass.

use anyhow::Result;
use glam::{Mat4, Vec3, Vec4};
use wgpu::util::DeviceExt;

use crate::context::RenderContext;
use crate::mesh::MeshVertex;
use terraflight_camera::ChaseCamera;

/// Uniform data sent to the GPU for camera transforms.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// View-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera position in world space.
    pub camera_pos: [f32; 4],
}

impl CameraUniform {
    /// Create camera uniform from the chase camera.
    pub fn from_camera(camera: &ChaseCamera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: [camera.position.x, camera.position.y, camera.position.z, 1.0],
        }
    }
}

/// Lighting and fog settings for the frame.
#[derive(Debug, Clone)]
pub struct SceneLighting {
    /// Direction toward the light source.
    pub light_direction: Vec3,
    /// Directional light color.
    pub light_color: Vec3,
    /// Ambient light color.
    pub ambient_color: Vec3,
    /// Fog color, also used as the sky horizon.
    pub fog_color: Vec3,
    /// Exponential fog density.
    pub fog_density: f32,
    /// Sky color straight up.
    pub zenith_color: Vec3,
}

impl Default for SceneLighting {
    fn default() -> Self {
        Self {
            light_direction: Vec3::new(0.0, 1.0, 1.0).normalize(),
            light_color: Vec3::ONE,
            ambient_color: Vec3::splat(0.3),
            fog_color: Vec3::splat(0.5),
            fog_density: 0.02,
            zenith_color: Vec3::new(0.35, 0.55, 0.85),
        }
    }
}

/// Uniform data for lighting and fog.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    /// Direction toward the light (xyz, w unused).
    pub light_direction: [f32; 4],
    /// Directional light color.
    pub light_color: [f32; 4],
    /// Ambient light color.
    pub ambient_color: [f32; 4],
    /// Fog color in rgb, density in w.
    pub fog_color_density: [f32; 4],
}

impl SceneUniform {
    fn from_lighting(lighting: &SceneLighting) -> Self {
        let dir = lighting.light_direction.normalize_or_zero();
        Self {
            light_direction: [dir.x, dir.y, dir.z, 0.0],
            light_color: lighting.light_color.extend(1.0).to_array(),
            ambient_color: lighting.ambient_color.extend(1.0).to_array(),
            fog_color_density: lighting.fog_color.extend(lighting.fog_density).to_array(),
        }
    }
}

/// Sky gradient colors.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SkyUniform {
    zenith: [f32; 4],
    horizon: [f32; 4],
}

/// Per-draw uniform: model matrix plus tint.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    model: [[f32; 4]; 4],
    /// rgb tint; w is the ground-texture weight (0 = solid tint color).
    tint: [f32; 4],
}

/// GPU buffer pair for one mesh.
pub struct MeshBuffer {
    /// GPU vertex buffer.
    pub vertex_buffer: wgpu::Buffer,
    /// GPU index buffer.
    pub index_buffer: wgpu::Buffer,
    /// Number of indices to draw.
    pub index_count: u32,
}

impl MeshBuffer {
    /// Upload vertices and indices.
    pub fn new(device: &wgpu::Device, vertices: &[MeshVertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

/// Per-draw model transform bound at group 1.
pub struct ModelInstance {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    tint: [f32; 4],
}

impl ModelInstance {
    /// The bind group to set before drawing with this instance.
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Rewrite the model matrix, keeping the tint.
    pub fn update(&self, queue: &wgpu::Queue, model: Mat4) {
        let uniform = ModelUniform {
            model: model.to_cols_array_2d(),
            tint: self.tint,
        };
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}

/// Forward scene pipeline: textured, lit, fogged meshes.
pub struct ScenePipeline {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    scene_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    model_bind_group_layout: wgpu::BindGroupLayout,
    texture_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
}

impl ScenePipeline {
    /// Create the scene pipeline and its GPU resources.
    pub fn new(ctx: &RenderContext) -> Result<Self> {
        let device = &ctx.device;

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Buffer"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: scene_buffer.as_entire_binding(),
                },
            ],
        });

        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let (pixels, size) = create_ground_texture();
        let texture = upload_rgba_texture(device, &ctx.queue, size, size, &pixels, "Ground Texture");
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Ground Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout: &texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[
                &frame_bind_group_layout,
                &model_bind_group_layout,
                &texture_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let depth_view = create_depth_view(device, ctx.size);

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        // position
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        // normal
                        wgpu::VertexAttribute {
                            offset: 12,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        // uv
                        wgpu::VertexAttribute {
                            offset: 24,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        Ok(Self {
            render_pipeline,
            camera_buffer,
            scene_buffer,
            frame_bind_group,
            model_bind_group_layout,
            texture_bind_group,
            depth_view,
        })
    }

    /// Update the camera uniform buffer.
    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &ChaseCamera) {
        let uniform = CameraUniform::from_camera(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Update the lighting/fog uniform buffer.
    pub fn update_scene(&self, queue: &wgpu::Queue, lighting: &SceneLighting) {
        let uniform = SceneUniform::from_lighting(lighting);
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Create a per-draw instance with a model matrix and tint.
    ///
    /// `texture_weight` blends between the solid tint (0.0) and the
    /// tinted ground texture (1.0).
    pub fn create_instance_with_tint(
        &self,
        device: &wgpu::Device,
        model: Mat4,
        tint: Vec4,
    ) -> ModelInstance {
        let tint = tint.to_array();
        let uniform = ModelUniform {
            model: model.to_cols_array_2d(),
            tint,
        };
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout: &self.model_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        ModelInstance {
            buffer,
            bind_group,
            tint,
        }
    }

    /// Create a per-draw instance for the ground texture.
    pub fn create_instance(&self, device: &wgpu::Device, model: Mat4) -> ModelInstance {
        self.create_instance_with_tint(device, model, Vec4::new(1.0, 1.0, 1.0, 1.0))
    }

    /// Recreate the depth texture after a resize.
    pub fn resize(&mut self, device: &wgpu::Device, new_size: (u32, u32)) {
        self.depth_view = create_depth_view(device, new_size);
    }

    /// Begin the scene render pass (color loaded, depth cleared).
    pub fn begin_render_pass<'a>(
        &'a self,
        encoder: &'a mut wgpu::CommandEncoder,
        view: &'a wgpu::TextureView,
    ) -> wgpu::RenderPass<'a> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    // Load existing content (the sky pass already ran).
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        })
    }

    /// Get the render pipeline.
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.render_pipeline
    }

    /// Get the per-frame bind group (camera + scene).
    pub fn frame_bind_group(&self) -> &wgpu::BindGroup {
        &self.frame_bind_group
    }

    /// Get the ground texture bind group.
    pub fn texture_bind_group(&self) -> &wgpu::BindGroup {
        &self.texture_bind_group
    }
}

/// Sky gradient pipeline: a fullscreen triangle drawn before the scene.
pub struct SkyPipeline {
    render_pipeline: wgpu::RenderPipeline,
    sky_buffer: wgpu::Buffer,
    sky_bind_group: wgpu::BindGroup,
}

impl SkyPipeline {
    /// Create the sky pipeline.
    pub fn new(ctx: &RenderContext) -> Result<Self> {
        let device = &ctx.device;

        let sky_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sky Buffer"),
            size: std::mem::size_of::<SkyUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sky_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Sky Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let sky_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sky Bind Group"),
            layout: &sky_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: sky_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sky Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sky.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sky Pipeline Layout"),
            bind_group_layouts: &[&sky_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sky Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[], // Fullscreen triangle generated in the shader.
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None, // The sky is always behind everything.
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        Ok(Self {
            render_pipeline,
            sky_buffer,
            sky_bind_group,
        })
    }

    /// Update the sky gradient from the scene lighting.
    pub fn update_sky(&self, queue: &wgpu::Queue, lighting: &SceneLighting) {
        let uniform = SkyUniform {
            zenith: lighting.zenith_color.extend(1.0).to_array(),
            horizon: lighting.fog_color.extend(1.0).to_array(),
        };
        queue.write_buffer(&self.sky_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Begin the sky render pass (clears the color target).
    pub fn begin_render_pass<'a>(
        &'a self,
        encoder: &'a mut wgpu::CommandEncoder,
        view: &'a wgpu::TextureView,
    ) -> wgpu::RenderPass<'a> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Sky Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        })
    }

    /// Get the render pipeline.
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.render_pipeline
    }

    /// Get the sky bind group.
    pub fn sky_bind_group(&self) -> &wgpu::BindGroup {
        &self.sky_bind_group
    }
}

fn create_depth_view(device: &wgpu::Device, size: (u32, u32)) -> wgpu::TextureView {
    let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: size.0.max(1),
            height: size.1.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    depth_texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Procedural ground texture: mottled grass with darker patches.
///
/// Returns RGBA pixels and the texture dimension in pixels.
fn create_ground_texture() -> (Vec<u8>, u32) {
    const SIZE: u32 = 256;

    let mut data = vec![0u8; (SIZE * SIZE * 4) as usize];
    for y in 0..SIZE {
        for x in 0..SIZE {
            // Cheap deterministic hash for per-pixel variation.
            let h = (x.wrapping_mul(37) ^ y.wrapping_mul(73)).wrapping_mul(2654435761) >> 24;
            let n = (h % 48) as u8;
            let patch = ((x / 32 + y / 32) % 2) as u8;

            let idx = ((y * SIZE + x) * 4) as usize;
            data[idx] = 58 + n / 3 + patch * 8;
            data[idx + 1] = 110 + n / 2 + patch * 6;
            data[idx + 2] = 48 + n / 4;
            data[idx + 3] = 255;
        }
    }

    (data, SIZE)
}

fn upload_rgba_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    width: u32,
    height: u32,
    pixels: &[u8],
    label: &str,
) -> wgpu::Texture {
    assert_eq!(pixels.len(), (width * height * 4) as usize);
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    texture
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_texture_is_opaque_rgba() {
        let (pixels, size) = create_ground_texture();
        assert_eq!(pixels.len(), (size * size * 4) as usize);
        assert!(pixels.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn scene_uniform_packs_fog_density() {
        let lighting = SceneLighting {
            fog_density: 0.04,
            ..Default::default()
        };
        let uniform = SceneUniform::from_lighting(&lighting);
        assert_eq!(uniform.fog_color_density[3], 0.04);
        // The light direction is normalized on the way in.
        let d = uniform.light_direction;
        let len = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }
}
