//! Scene state: camera, light, and the member registry types.

pub mod camera;
pub mod light;
pub mod member;

pub use camera::Camera;
pub use light::Light;
pub use member::{BoxMember, PlaneMember, SceneMember, SharedMember, TexturedBoxMember};
