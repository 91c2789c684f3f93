//! Scene members
//!
//! The host's declarative tree attaches members to the view; each member
//! owns exactly one [`Renderable`] plus a pending-change record. Property
//! setters (host/UI thread) only write values and dirty bits; the dirty
//! bits are consumed at the next synchronize callback, the only point where
//! a member's GPU state is mutated.

use std::path::PathBuf;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use parking_lot::Mutex;

use crate::errors::Result;
use crate::geometry::ShapeKind;
use crate::host::{GpuContext, SharedNotifier};
use crate::renderer::{FrameContext, Renderable, ScenePipelines, ShadowMode, ShadowTarget};

/// Capability set of every scene member. The view controller's per-frame
/// loops dispatch through this trait only; member kinds are never
/// inspected at runtime.
pub trait SceneMember: Send {
    /// Called when the member is attached to a view; carries the host
    /// notifier used for redraw requests.
    fn attach(&mut self, notifier: SharedNotifier);

    /// Creates the member's GPU resources. Idempotent: a second call on an
    /// initialized member is a no-op.
    fn initialize(
        &mut self,
        gpu: &GpuContext,
        pipelines: &Arc<ScenePipelines>,
        shadow_target: &ShadowTarget,
    ) -> Result<()>;

    /// Applies pending property changes. Runs once per frame, before the
    /// render callback; may stall on GPU uploads.
    fn sync(&mut self, gpu: &GpuContext);

    /// Records the member's main-pass draw.
    fn render(&mut self, gpu: &GpuContext, pass: &mut wgpu::RenderPass<'_>, frame: &FrameContext);

    /// Records the member's depth-only draw into the shadow map.
    fn render_shadow(
        &mut self,
        gpu: &GpuContext,
        pass: &mut wgpu::RenderPass<'_>,
        light_view_projection: Mat4,
    );

    /// Releases the member's GPU resources (graphics context teardown).
    fn release(&mut self);

    /// Whether the member participates in the shadow pass.
    fn casts_shadow(&self) -> bool;
}

/// How members are held: shared between the host (property mutation) and
/// the view controller (sync/render dispatch).
pub type SharedMember = Arc<Mutex<dyn SceneMember>>;

/// State and behavior common to all member kinds; the concrete members are
/// parameterizations of this core.
struct MemberCore {
    shape: ShapeKind,
    shadow_mode: ShadowMode,

    // Authoritative property values plus one dirty bit each; written by
    // setters, consumed by sync.
    length: f32,
    length_dirty: bool,
    texture_source: Option<PathBuf>,
    texture_dirty: bool,
    translation: Vec3,
    translation_dirty: bool,

    renderable: Option<Renderable>,
    notifier: Option<SharedNotifier>,
}

impl MemberCore {
    fn new(shape: ShapeKind, shadow_mode: ShadowMode, length: f32) -> Self {
        Self {
            shape,
            shadow_mode,
            length,
            length_dirty: false,
            texture_source: None,
            texture_dirty: false,
            translation: Vec3::ZERO,
            translation_dirty: false,
            renderable: None,
            notifier: None,
        }
    }

    fn notify(&self) {
        if let Some(notifier) = &self.notifier {
            notifier.request_redraw();
        }
    }

    fn set_length(&mut self, length: f32) {
        if self.length == length {
            return;
        }
        self.length = length;
        self.length_dirty = true;
        self.notify();
    }

    fn set_texture_source(&mut self, source: impl Into<PathBuf>) {
        let source = source.into();
        if self.texture_source.as_ref() == Some(&source) {
            return;
        }
        self.texture_source = Some(source);
        self.texture_dirty = true;
        self.notify();
    }

    fn set_translation(&mut self, translation: Vec3) {
        if self.translation == translation {
            return;
        }
        self.translation = translation;
        self.translation_dirty = true;
        self.notify();
    }

    fn initialize(
        &mut self,
        gpu: &GpuContext,
        pipelines: &Arc<ScenePipelines>,
        shadow_target: &ShadowTarget,
    ) {
        if self.renderable.is_some() {
            return;
        }
        self.renderable = Some(Renderable::new(
            gpu,
            Arc::clone(pipelines),
            shadow_target,
            self.shape,
            self.shadow_mode,
            self.length,
        ));
        // The current length is baked into the fresh vertex data; texture
        // and translation changes recorded before initialization still
        // apply at the next sync.
        self.length_dirty = false;
    }

    fn sync(&mut self, gpu: &GpuContext) {
        let Some(renderable) = self.renderable.as_mut() else {
            return;
        };

        if self.length_dirty {
            renderable.resize(gpu, self.length);
            self.length_dirty = false;
        }
        if self.texture_dirty {
            if let Some(source) = &self.texture_source {
                if let Err(err) = renderable.retexture(gpu, source) {
                    log::warn!("texture {} could not be loaded: {err}", source.display());
                }
            }
            self.texture_dirty = false;
        }
        if self.translation_dirty {
            renderable.retranslate(self.translation);
            self.translation_dirty = false;
        }
    }

    fn render(&mut self, gpu: &GpuContext, pass: &mut wgpu::RenderPass<'_>, frame: &FrameContext) {
        if let Some(renderable) = &self.renderable {
            renderable.draw(gpu, pass, frame);
        }
    }

    fn render_shadow(
        &mut self,
        gpu: &GpuContext,
        pass: &mut wgpu::RenderPass<'_>,
        light_view_projection: Mat4,
    ) {
        if let Some(renderable) = &self.renderable {
            renderable.draw_depth_only(gpu, pass, light_view_projection);
        }
    }

    fn release(&mut self) {
        self.renderable = None;
    }

    fn has_pending_changes(&self) -> bool {
        self.length_dirty || self.texture_dirty || self.translation_dirty
    }
}

macro_rules! delegate_member_surface {
    ($member:ty) => {
        impl $member {
            /// Edge length of the shape; positive, half-extent basis.
            pub fn set_length(&mut self, length: f32) {
                self.core.set_length(length);
            }

            /// Image location to texture the shape with, decoded at the
            /// next synchronize.
            pub fn set_texture_source(&mut self, source: impl Into<std::path::PathBuf>) {
                self.core.set_texture_source(source);
            }

            /// World-space translation applied to the model matrix.
            pub fn set_translation(&mut self, translation: Vec3) {
                self.core.set_translation(translation);
            }

            #[must_use]
            pub fn length(&self) -> f32 {
                self.core.length
            }

            #[must_use]
            pub fn texture_source(&self) -> Option<&std::path::Path> {
                self.core.texture_source.as_deref()
            }

            #[must_use]
            pub fn translation(&self) -> Vec3 {
                self.core.translation
            }

            #[must_use]
            pub fn shadow_mode(&self) -> ShadowMode {
                self.core.shadow_mode
            }

            #[must_use]
            pub fn is_initialized(&self) -> bool {
                self.core.renderable.is_some()
            }

            /// Whether any property change is waiting for the next
            /// synchronize.
            #[must_use]
            pub fn has_pending_changes(&self) -> bool {
                self.core.has_pending_changes()
            }

            /// Convenience constructor for the shared handle the view and
            /// the host both hold.
            #[must_use]
            pub fn shared() -> Arc<Mutex<Self>> {
                Arc::new(Mutex::new(Self::new()))
            }
        }

        impl Default for $member {
            fn default() -> Self {
                Self::new()
            }
        }

        impl SceneMember for $member {
            fn attach(&mut self, notifier: SharedNotifier) {
                self.core.notifier = Some(notifier);
            }

            fn initialize(
                &mut self,
                gpu: &GpuContext,
                pipelines: &Arc<ScenePipelines>,
                shadow_target: &ShadowTarget,
            ) -> Result<()> {
                self.core.initialize(gpu, pipelines, shadow_target);
                Ok(())
            }

            fn sync(&mut self, gpu: &GpuContext) {
                self.core.sync(gpu);
            }

            fn render(
                &mut self,
                gpu: &GpuContext,
                pass: &mut wgpu::RenderPass<'_>,
                frame: &FrameContext,
            ) {
                self.core.render(gpu, pass, frame);
            }

            fn render_shadow(
                &mut self,
                gpu: &GpuContext,
                pass: &mut wgpu::RenderPass<'_>,
                light_view_projection: Mat4,
            ) {
                self.core.render_shadow(gpu, pass, light_view_projection);
            }

            fn release(&mut self) {
                self.core.release();
            }

            fn casts_shadow(&self) -> bool {
                self.core.shadow_mode.casts_shadow()
            }
        }
    };
}

/// A shadowed box, default edge length 25.
pub struct BoxMember {
    core: MemberCore,
}

impl BoxMember {
    pub const DEFAULT_LENGTH: f32 = 25.0;

    #[must_use]
    pub fn new() -> Self {
        Self {
            core: MemberCore::new(ShapeKind::Cube, ShadowMode::Simple, Self::DEFAULT_LENGTH),
        }
    }
}

delegate_member_surface!(BoxMember);

/// A shadowed ground plane, default edge length 25.
pub struct PlaneMember {
    core: MemberCore,
}

impl PlaneMember {
    pub const DEFAULT_LENGTH: f32 = 25.0;

    #[must_use]
    pub fn new() -> Self {
        Self {
            core: MemberCore::new(ShapeKind::Plane, ShadowMode::Simple, Self::DEFAULT_LENGTH),
        }
    }
}

delegate_member_surface!(PlaneMember);

/// A textured box outside the shadow protocol: it neither casts into the
/// shadow map nor samples it. Default edge length 10.
pub struct TexturedBoxMember {
    core: MemberCore,
}

impl TexturedBoxMember {
    pub const DEFAULT_LENGTH: f32 = 10.0;

    #[must_use]
    pub fn new() -> Self {
        Self {
            core: MemberCore::new(ShapeKind::Cube, ShadowMode::NoShadow, Self::DEFAULT_LENGTH),
        }
    }
}

delegate_member_surface!(TexturedBoxMember);
