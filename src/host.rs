//! Host runtime interface
//!
//! The scene component is a library embedded in a declarative UI host. The
//! host owns the window, the wgpu device/queue/surface, and the render
//! thread; it drives the component through [`crate::view::SceneView`]'s
//! `synchronize` / `render` / `invalidate` callbacks and receives
//! notifications back through [`HostNotifier`].

use std::sync::Arc;

/// GPU handles supplied by the host during each callback.
///
/// `wgpu::Device` and `wgpu::Queue` are internally reference-counted, so the
/// host clones its handles into this struct cheaply.
#[derive(Debug, Clone)]
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

/// Current surface dimensions and color format, supplied by the host with
/// every synchronize callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
}

/// The frame's render target, supplied by the host with every render
/// callback. The view must match the format reported via [`SurfaceInfo`].
pub struct FrameTarget<'a> {
    pub view: &'a wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

/// Notifications from the scene component back to its host.
pub trait HostNotifier: Send + Sync {
    /// Marks the component dirty: camera, light, or a member's visual state
    /// changed outside the render phase and a new frame should be scheduled.
    fn request_redraw(&self);

    /// Invoked after each submitted frame. Hosts that share the device with
    /// other renderers can restore their own expectations here.
    fn reset_render_state(&self) {}
}

/// Notifier handle shared with every attached scene member.
pub type SharedNotifier = Arc<dyn HostNotifier>;
