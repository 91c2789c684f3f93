//! Shared pipeline state
//!
//! The compiled programs and bind group layouts every renderable draws with:
//! the lit program (one WGSL module, shadow-sampling and plain fragment
//! entries) and the depth-only program for the shadow pass. Built once by
//! the view controller at first synchronize and handed to each renderable as
//! an `Arc`; the `Arc` count is the pipeline state's reference count, and
//! the shared GPU objects are released when the last renderable drops.

use std::sync::Arc;

use crate::errors::{Result, UmbraError};
use crate::geometry::Vertex;
use crate::renderer::mipmap::MipmapGenerator;
use crate::renderer::shadow::ShadowTarget;

/// Depth-buffer format of the main pass.
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
const DEPTH_WGSL: &str = include_str!("../shaders/depth.wgsl");

pub struct ScenePipelines {
    /// Group 0 of the lit program: object uniforms + color texture + sampler.
    pub(crate) object_layout: wgpu::BindGroupLayout,
    /// Group 1 of the lit program: light uniforms + shadow depth texture +
    /// comparison sampler. Bound only by shadow-receiving draws.
    pub(crate) shadow_layout: wgpu::BindGroupLayout,
    /// Group 0 of the depth-only program: view-projection + model.
    pub(crate) depth_layout: wgpu::BindGroupLayout,

    /// Lit pipeline sampling the shadow map (`fs_shadowed`).
    pub(crate) shadowed_pipeline: wgpu::RenderPipeline,
    /// Lit pipeline that never touches shadow resources (`fs_plain`).
    pub(crate) plain_pipeline: wgpu::RenderPipeline,
    /// Depth-only pipeline for the shadow pass. Culls front faces to reduce
    /// peter-panning; the lit pipelines cull back faces as usual.
    pub(crate) depth_pipeline: wgpu::RenderPipeline,

    pub(crate) shadow_sampler: wgpu::Sampler,
    pub(crate) mipmaps: MipmapGenerator,
}

impl ScenePipelines {
    /// Compiles both programs and builds all pipelines.
    ///
    /// Shader or pipeline validation failure is fatal: it is caught through
    /// a wgpu validation error scope and returned to the caller that
    /// triggered first initialization. No fallback pipeline exists.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Result<Arc<Self>> {
        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipelines = Self::create(device, surface_format);
        if let Some(err) = pollster::block_on(error_scope.pop()) {
            return Err(UmbraError::PipelineCreation(err.to_string()));
        }
        Ok(Arc::new(pipelines))
    }

    fn create(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let depth_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Depth Shader"),
            source: wgpu::ShaderSource::Wgsl(DEPTH_WGSL.into()),
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object BindGroup Layout"),
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
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let shadow_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Shadow BindGroup Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
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
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });

        let depth_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Depth BindGroup Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let shadowed_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Shadowed Pipeline Layout"),
                bind_group_layouts: &[Some(&object_layout), Some(&shadow_layout)],
                immediate_size: 0,
            });
        let plain_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Plain Pipeline Layout"),
                bind_group_layouts: &[Some(&object_layout)],
                immediate_size: 0,
            });
        let depth_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Depth Pipeline Layout"),
                bind_group_layouts: &[Some(&depth_layout)],
                immediate_size: 0,
            });

        let lit_pipeline = |label, layout, fragment_entry| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: &scene_shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::LAYOUT],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &scene_shader,
                    entry_point: Some(fragment_entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: Some(true),
                    depth_compare: Some(wgpu::CompareFunction::Less),
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let shadowed_pipeline =
            lit_pipeline("Shadowed Pipeline", &shadowed_pipeline_layout, "fs_shadowed");
        let plain_pipeline = lit_pipeline("Plain Pipeline", &plain_pipeline_layout, "fs_plain");

        let depth_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Depth Pipeline"),
            layout: Some(&depth_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &depth_shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::POSITION_ONLY_LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &depth_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ShadowTarget::COLOR_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                // Front-face culling for the whole shadow pass.
                cull_mode: Some(wgpu::Face::Front),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: ShadowTarget::DEPTH_FORMAT,
                depth_write_enabled: Some(true),
                depth_compare: Some(wgpu::CompareFunction::Less),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Linear comparison filtering gives hardware 2x2 PCF on the depth
        // texture.
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Comparison Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        let mipmaps = MipmapGenerator::new(device);

        Self {
            object_layout,
            shadow_layout,
            depth_layout,
            shadowed_pipeline,
            plain_pipeline,
            depth_pipeline,
            shadow_sampler,
            mipmaps,
        }
    }
}
