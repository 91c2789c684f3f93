//! GPU-facing layer: shared pipeline state, per-object renderables, the
//! shadow-map target, and texture/mipmap plumbing.

mod mipmap;
mod pipelines;
mod renderable;
mod shadow;
mod texture;
mod uniforms;

pub use pipelines::ScenePipelines;
pub(crate) use pipelines::DEPTH_FORMAT;
pub use renderable::{FrameContext, Renderable, ShadowMode};
pub use shadow::{SHADOW_MAP_SIZE, ShadowTarget};
pub use texture::{GpuTexture, load_rgba_image};
