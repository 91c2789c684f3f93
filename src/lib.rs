#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]
// Property setters short-circuit on exact equality by design.
#![allow(clippy::float_cmp)]

pub mod errors;
pub mod geometry;
pub mod host;
pub mod renderer;
pub mod scene;
pub mod view;

pub use errors::{Result, UmbraError};
pub use geometry::{ShapeKind, Vertex};
pub use host::{FrameTarget, GpuContext, HostNotifier, SurfaceInfo};
pub use renderer::{FrameContext, Renderable, ScenePipelines, ShadowMode, ShadowTarget};
pub use scene::{BoxMember, Camera, Light, PlaneMember, SceneMember, TexturedBoxMember};
pub use view::SceneView;
