//! Scene/View controller
//!
//! Owns the camera, the light, the shadow-map target, and the member
//! registry, and drives the two-pass render sequence. The host invokes
//! `synchronize` (mutate shared state, possibly on the UI thread) and then
//! `render` (issue GPU commands on the render thread) once per frame, in
//! that order, plus `invalidate` on graphics-context teardown. The host
//! guarantees that synchronize for a frame completes before that frame's
//! render begins; this controller guarantees the render phase only ever
//! observes fully-published matrix snapshots.

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::errors::Result;
use crate::host::{FrameTarget, GpuContext, SharedNotifier, SurfaceInfo};
use crate::renderer::{DEPTH_FORMAT, FrameContext, ScenePipelines, ShadowTarget};
use crate::scene::member::SharedMember;
use crate::scene::{Camera, Light};

/// GPU-side state, present only between lazy initialization and
/// invalidation.
struct RenderState {
    pipelines: Arc<ScenePipelines>,
    shadow_target: ShadowTarget,
    depth_view: wgpu::TextureView,
    surface: SurfaceInfo,
}

pub struct SceneView {
    camera: Camera,
    light: Light,
    /// Derived from the published projection and the light position at
    /// synchronize time; read by both passes.
    light_view_projection: Mat4,

    members: Vec<SharedMember>,
    /// Members at indices below this are initialized; the registry is
    /// append-only between frames.
    initialized_members: usize,

    notifier: SharedNotifier,
    state: Option<RenderState>,
}

impl SceneView {
    #[must_use]
    pub fn new(notifier: SharedNotifier) -> Self {
        let camera = Camera::default();
        let light = Light::default();
        let light_view_projection = light.view_projection(camera.projection_matrix());
        Self {
            camera,
            light,
            light_view_projection,
            members: Vec::new(),
            initialized_members: 0,
            notifier,
            state: None,
        }
    }

    /// Appends a member to the registry and hands it the host notifier.
    /// Members attached after initialization are picked up at the next
    /// synchronize; attaching mid-frame is not supported.
    pub fn attach(&mut self, member: SharedMember) {
        member.lock().attach(Arc::clone(&self.notifier));
        self.members.push(member);
    }

    /// Host signal that a window surface with an active graphics context
    /// exists. GPU resources are still created lazily at the first
    /// synchronize; this only schedules the first frame.
    pub fn surface_ready(&mut self) {
        self.notifier.request_redraw();
    }

    /// Per-frame synchronize callback: the safe point to mutate shared
    /// scene state.
    ///
    /// Lazily initializes GPU state on the first call with a valid context
    /// (shared pipelines, shadow target, depth buffer, member resources),
    /// then publishes pending camera matrices, recomputes the light
    /// view-projection matrix if its inputs changed, and applies every
    /// member's pending mutations.
    pub fn synchronize(&mut self, gpu: &GpuContext, surface: SurfaceInfo) -> Result<()> {
        if self.state.is_none() {
            self.initialize(gpu, surface)?;
        }

        let projection_changed = self.camera.publish();
        let light_changed = self.light.take_dirty();
        if projection_changed || light_changed {
            self.light_view_projection =
                self.light.view_projection(self.camera.projection_matrix());
        }

        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };

        if state.surface != surface {
            state.depth_view = Self::create_depth_view(&gpu.device, surface);
            state.surface = surface;
        }

        for member in &self.members[self.initialized_members..] {
            member
                .lock()
                .initialize(gpu, &state.pipelines, &state.shadow_target)?;
        }
        self.initialized_members = self.members.len();

        for member in &self.members {
            member.lock().sync(gpu);
        }

        Ok(())
    }

    /// Per-frame render callback: shadow pass, then main pass, then submit.
    /// A no-op until the first successful synchronize.
    pub fn render(&mut self, gpu: &GpuContext, frame: &FrameTarget<'_>) {
        let Some(state) = self.state.as_ref() else {
            return;
        };

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        // Shadow pass: depth-only draws from the light's viewpoint. The
        // depth pipeline culls front faces for the duration of this pass.
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &state.shadow_target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &state.shadow_target.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for member in &self.members {
                let mut member = member.lock();
                if member.casts_shadow() {
                    member.render_shadow(gpu, &mut pass, self.light_view_projection);
                }
            }
        }

        // Main pass: shaded draws sampling the shadow map.
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &state.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_viewport(
                0.0,
                0.0,
                frame.width as f32,
                frame.height as f32,
                0.0,
                1.0,
            );

            let frame_context = FrameContext {
                view_matrix: self.camera.view_matrix(),
                projection_matrix: self.camera.projection_matrix(),
                light_position: self.light.position(),
                light_view_projection: self.light_view_projection,
            };

            for member in &self.members {
                member.lock().render(gpu, &mut pass, &frame_context);
            }
        }

        gpu.queue.submit(Some(encoder.finish()));
        self.notifier.reset_render_state();
    }

    /// Graphics-context teardown: releases every member's GPU resources and
    /// drops the shadow target, depth buffer, and shared pipelines. A later
    /// synchronize with a fresh context re-initializes everything.
    pub fn invalidate(&mut self) {
        log::debug!("releasing scene view GPU state");
        for member in &self.members {
            member.lock().release();
        }
        self.state = None;
        self.initialized_members = 0;
    }

    fn initialize(&mut self, gpu: &GpuContext, surface: SurfaceInfo) -> Result<()> {
        log::debug!(
            "initializing scene view ({}x{})",
            surface.width,
            surface.height
        );

        let pipelines = ScenePipelines::new(&gpu.device, surface.format)?;
        let shadow_target = ShadowTarget::new(&gpu.device);
        let depth_view = Self::create_depth_view(&gpu.device, surface);

        if surface.height > 0 {
            self.camera
                .set_aspect_ratio(surface.width as f32 / surface.height as f32);
        }
        self.camera.publish();
        self.light.take_dirty();
        self.light_view_projection = self.light.view_projection(self.camera.projection_matrix());

        self.state = Some(RenderState {
            pipelines,
            shadow_target,
            depth_view,
            surface,
        });
        self.initialized_members = 0;
        self.notifier.request_redraw();
        Ok(())
    }

    fn create_depth_view(device: &wgpu::Device, surface: SurfaceInfo) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Depth Texture"),
            size: wgpu::Extent3d {
                width: surface.width.max(1),
                height: surface.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    // ========================================================================
    // Camera and light property surface. Setters short-circuit on equality
    // and mark the component dirty with the host on any real change.
    // ========================================================================

    pub fn set_camera_position(&mut self, position: Vec3) {
        if self.camera.set_position(position) {
            self.notifier.request_redraw();
        }
    }

    pub fn set_camera_look_at(&mut self, look_at: Vec3) {
        if self.camera.set_look_at(look_at) {
            self.notifier.request_redraw();
        }
    }

    pub fn set_camera_up(&mut self, up: Vec3) {
        if self.camera.set_up(up) {
            self.notifier.request_redraw();
        }
    }

    pub fn set_field_of_view(&mut self, field_of_view: f32) {
        if self.camera.set_field_of_view(field_of_view) {
            self.notifier.request_redraw();
        }
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if self.camera.set_aspect_ratio(aspect_ratio) {
            self.notifier.request_redraw();
        }
    }

    pub fn set_near_plane(&mut self, near_plane: f32) {
        if self.camera.set_near_plane(near_plane) {
            self.notifier.request_redraw();
        }
    }

    pub fn set_far_plane(&mut self, far_plane: f32) {
        if self.camera.set_far_plane(far_plane) {
            self.notifier.request_redraw();
        }
    }

    pub fn set_light_position(&mut self, position: Vec3) {
        if self.light.set_position(position) {
            self.notifier.request_redraw();
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn light(&self) -> &Light {
        &self.light
    }

    #[must_use]
    pub fn light_view_projection(&self) -> Mat4 {
        self.light_view_projection
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }
}
