//! Per-object drawable unit
//!
//! A [`Renderable`] owns the GPU resources behind one scene member: its
//! vertex buffer, color texture, model transform, per-object uniform
//! buffers, and bind groups, plus a shared handle to [`ScenePipelines`].
//! The box / plane / textured-box members differ only in the parameters
//! they construct it with.

use std::path::Path;
use std::sync::Arc;

use glam::{Mat3, Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::errors::Result;
use crate::geometry::{self, ShapeKind, Vertex};
use crate::host::GpuContext;
use crate::renderer::pipelines::ScenePipelines;
use crate::renderer::shadow::ShadowTarget;
use crate::renderer::texture::GpuTexture;
use crate::renderer::uniforms::{DepthUniforms, LightUniforms, ObjectUniforms};

/// Per-instance shadow behavior.
///
/// `Simple` and `Pcf` are both declared but currently sample the shadow map
/// identically; the distinction is kept in the interface for forward
/// compatibility. Only `NoShadow` changes behavior: such instances neither
/// cast into the shadow pass nor bind shadow resources in the main pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowMode {
    NoShadow,
    Simple,
    Pcf,
}

impl ShadowMode {
    /// Whether draws bind the shadow map and upload light uniforms.
    #[must_use]
    pub fn samples_shadow_map(self) -> bool {
        !matches!(self, ShadowMode::NoShadow)
    }

    /// Whether the instance is drawn into the shadow map.
    #[must_use]
    pub fn casts_shadow(self) -> bool {
        self.samples_shadow_map()
    }
}

/// Camera and light state for one main-pass draw, captured by the view
/// controller from its published matrices.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub view_matrix: Mat4,
    pub projection_matrix: Mat4,
    pub light_position: Vec3,
    pub light_view_projection: Mat4,
}

pub struct Renderable {
    shape: ShapeKind,
    shadow_mode: ShadowMode,

    /// CPU copy of the vertex data; rewritten in place on resize and
    /// re-uploaded wholesale.
    vertices: Vec<Vertex>,
    vertex_buffer: wgpu::Buffer,

    texture: GpuTexture,
    model_matrix: Mat4,

    object_uniforms: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,

    // Shadow-receiving resources; absent for ShadowMode::NoShadow.
    light_uniforms: Option<wgpu::Buffer>,
    shadow_bind_group: Option<wgpu::BindGroup>,

    // Shadow-casting resources; absent for ShadowMode::NoShadow.
    depth_uniforms: Option<wgpu::Buffer>,
    depth_bind_group: Option<wgpu::BindGroup>,

    pipelines: Arc<ScenePipelines>,
}

impl Renderable {
    pub fn new(
        gpu: &GpuContext,
        pipelines: Arc<ScenePipelines>,
        shadow_target: &ShadowTarget,
        shape: ShapeKind,
        shadow_mode: ShadowMode,
        length: f32,
    ) -> Self {
        let vertices = shape.vertices(length);

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Renderable Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });

        let texture = GpuTexture::blank(gpu);

        let object_uniforms = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniform Buffer"),
            size: std::mem::size_of::<ObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let object_bind_group =
            Self::create_object_bind_group(gpu, &pipelines, &object_uniforms, &texture);

        let (light_uniforms, shadow_bind_group, depth_uniforms, depth_bind_group) =
            if shadow_mode.samples_shadow_map() {
                let light_uniforms = gpu.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("Light Uniform Buffer"),
                    size: std::mem::size_of::<LightUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });

                let shadow_bind_group =
                    gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("Shadow BindGroup"),
                        layout: &pipelines.shadow_layout,
                        entries: &[
                            wgpu::BindGroupEntry {
                                binding: 0,
                                resource: light_uniforms.as_entire_binding(),
                            },
                            wgpu::BindGroupEntry {
                                binding: 1,
                                resource: wgpu::BindingResource::TextureView(
                                    &shadow_target.depth_view,
                                ),
                            },
                            wgpu::BindGroupEntry {
                                binding: 2,
                                resource: wgpu::BindingResource::Sampler(
                                    &pipelines.shadow_sampler,
                                ),
                            },
                        ],
                    });

                let depth_uniforms = gpu.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("Depth Uniform Buffer"),
                    size: std::mem::size_of::<DepthUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });

                let depth_bind_group =
                    gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("Depth BindGroup"),
                        layout: &pipelines.depth_layout,
                        entries: &[wgpu::BindGroupEntry {
                            binding: 0,
                            resource: depth_uniforms.as_entire_binding(),
                        }],
                    });

                (
                    Some(light_uniforms),
                    Some(shadow_bind_group),
                    Some(depth_uniforms),
                    Some(depth_bind_group),
                )
            } else {
                (None, None, None, None)
            };

        Self {
            shape,
            shadow_mode,
            vertices,
            vertex_buffer,
            texture,
            model_matrix: Mat4::IDENTITY,
            object_uniforms,
            object_bind_group,
            light_uniforms,
            shadow_bind_group,
            depth_uniforms,
            depth_bind_group,
            pipelines,
        }
    }

    fn create_object_bind_group(
        gpu: &GpuContext,
        pipelines: &ScenePipelines,
        object_uniforms: &wgpu::Buffer,
        texture: &GpuTexture,
    ) -> wgpu::BindGroup {
        gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object BindGroup"),
            layout: &pipelines.object_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object_uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }

    #[must_use]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    #[must_use]
    pub fn shadow_mode(&self) -> ShadowMode {
        self.shadow_mode
    }

    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Rewrites every vertex position to the new edge length, preserving
    /// octants, and re-uploads the buffer. Topology never changes.
    pub fn resize(&mut self, gpu: &GpuContext, new_length: f32) {
        geometry::resize_vertices(&mut self.vertices, new_length);
        gpu.queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&self.vertices),
        );
    }

    /// Replaces the color texture from an image on disk, mirrored
    /// vertically, with a regenerated mip chain.
    ///
    /// On failure the previous texture stays bound and the error is
    /// returned for the owner to report; rendering continues either way.
    pub fn retexture(&mut self, gpu: &GpuContext, source: &Path) -> Result<()> {
        let image = crate::renderer::texture::load_rgba_image(source)?;
        self.texture = GpuTexture::from_image(gpu, &self.pipelines.mipmaps, &image);
        self.object_bind_group =
            Self::create_object_bind_group(gpu, &self.pipelines, &self.object_uniforms, &self.texture);
        Ok(())
    }

    /// Resets the model matrix to a pure translation. Rotation and scale
    /// are never composed into this matrix.
    pub fn retranslate(&mut self, translation: Vec3) {
        self.model_matrix = Mat4::from_translation(translation);
    }

    /// Records one main-pass draw.
    ///
    /// Shadow-receiving modes upload light uniforms and bind the shadow
    /// map; `NoShadow` binds the plain pipeline and touches neither.
    pub fn draw(&self, gpu: &GpuContext, pass: &mut wgpu::RenderPass<'_>, frame: &FrameContext) {
        let model_view = frame.view_matrix * self.model_matrix;
        let object = ObjectUniforms {
            model: self.model_matrix,
            view: frame.view_matrix,
            projection: frame.projection_matrix,
            model_view_normal: Mat4::from_mat3(
                Mat3::from_mat4(model_view).inverse().transpose(),
            ),
        };
        gpu.queue
            .write_buffer(&self.object_uniforms, 0, bytemuck::bytes_of(&object));

        if let (Some(light_uniforms), Some(shadow_bind_group)) =
            (&self.light_uniforms, &self.shadow_bind_group)
        {
            let light = LightUniforms {
                view_projection: frame.light_view_projection,
                position: frame.light_position.extend(1.0),
            };
            gpu.queue
                .write_buffer(light_uniforms, 0, bytemuck::bytes_of(&light));

            pass.set_pipeline(&self.pipelines.shadowed_pipeline);
            pass.set_bind_group(1, shadow_bind_group, &[]);
        } else {
            pass.set_pipeline(&self.pipelines.plain_pipeline);
        }

        pass.set_bind_group(0, &self.object_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count(), 0..1);
    }

    /// Records one depth-only draw into the shadow map. No-op for
    /// `NoShadow` instances (they own no depth-pass resources).
    pub fn draw_depth_only(
        &self,
        gpu: &GpuContext,
        pass: &mut wgpu::RenderPass<'_>,
        light_view_projection: Mat4,
    ) {
        let (Some(depth_uniforms), Some(depth_bind_group)) =
            (&self.depth_uniforms, &self.depth_bind_group)
        else {
            return;
        };

        let uniforms = DepthUniforms {
            view_projection: light_view_projection,
            model: self.model_matrix,
        };
        gpu.queue
            .write_buffer(depth_uniforms, 0, bytemuck::bytes_of(&uniforms));

        pass.set_pipeline(&self.pipelines.depth_pipeline);
        pass.set_bind_group(0, depth_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count(), 0..1);
    }
}
