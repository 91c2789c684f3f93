//! Uniform buffer layouts for the three programs.
//!
//! All structs are `#[repr(C)]` Pod types uploaded with
//! `Queue::write_buffer`; field order matches the WGSL declarations in
//! `src/shaders/`.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

/// Per-object uniforms for the lit program (group 0, binding 0).
///
/// `model_view_normal` is the inverse transpose of the upper 3x3 of
/// `view * model`, widened back to a mat4; WGSL uniform alignment pads a
/// mat3x3 column to the same size anyway.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub model_view_normal: Mat4,
}

/// Light uniforms for shadow-receiving draws (group 1, binding 0).
/// Never written for `ShadowMode::NoShadow` instances.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniforms {
    pub view_projection: Mat4,
    pub position: Vec4,
}

/// Uniforms for the depth-only program (group 0, binding 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct DepthUniforms {
    pub view_projection: Mat4,
    pub model: Mat4,
}
