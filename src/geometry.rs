//! Shape geometry
//!
//! Static, non-indexed triangle-list vertex data for the two scene shapes:
//! a cube (36 vertices, 6 faces x 2 triangles) and a ground plane
//! (6 vertices, one quad at y = 0). Topology is fixed for the lifetime of a
//! shape; resizing rewrites vertex positions in place and never changes the
//! vertex count.

use bytemuck::{Pod, Zeroable};

/// Components this close to zero are treated as exactly zero when
/// canonicalizing a position (a plane vertex has no extent on its normal
/// axis and must stay at 0 across resizes).
const AXIS_EPSILON: f32 = 1e-5;

/// Per-vertex data: position, surface normal, and texture coordinate.
///
/// Stride is 32 bytes with attributes at offsets 0 / 12 / 24, bound to
/// shader locations 0 / 1 / 2.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    /// Layout for the depth-only program: same stride, position attribute only.
    pub const POSITION_ONLY_LAYOUT: wgpu::VertexBufferLayout<'static> =
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        };

    fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// The two shapes the scene can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    Plane,
}

impl ShapeKind {
    /// Fixed vertex count of the shape's triangle list.
    #[must_use]
    pub fn vertex_count(self) -> u32 {
        match self {
            ShapeKind::Cube => 36,
            ShapeKind::Plane => 6,
        }
    }

    /// Builds the shape's vertex list at the given edge length.
    #[must_use]
    pub fn vertices(self, length: f32) -> Vec<Vertex> {
        match self {
            ShapeKind::Cube => cube_vertices(length),
            ShapeKind::Plane => plane_vertices(length),
        }
    }
}

/// 36-vertex cube with edge length `length`, centered on the origin.
///
/// Winding is counter-clockwise viewed from outside each face. Per face the
/// corner order is kept exactly as listed below; changing it silently turns
/// faces inside out under back-face culling.
#[must_use]
pub fn cube_vertices(length: f32) -> Vec<Vertex> {
    let semi = length / 2.0;

    // The 8 cube corners.
    let corner = [
        [semi, -semi, semi],   // 0
        [semi, -semi, -semi],  // 1
        [-semi, -semi, -semi], // 2
        [-semi, -semi, semi],  // 3
        [semi, semi, semi],    // 4
        [semi, semi, -semi],   // 5
        [-semi, semi, -semi],  // 6
        [-semi, semi, semi],   // 7
    ];

    // Axis-aligned face normals.
    const POS_X: [f32; 3] = [1.0, 0.0, 0.0];
    const POS_Y: [f32; 3] = [0.0, 1.0, 0.0];
    const POS_Z: [f32; 3] = [0.0, 0.0, 1.0];
    const NEG_X: [f32; 3] = [-1.0, 0.0, 0.0];
    const NEG_Y: [f32; 3] = [0.0, -1.0, 0.0];
    const NEG_Z: [f32; 3] = [0.0, 0.0, -1.0];

    // The four shared UV corners.
    const UV: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

    // (corner index, uv index) per vertex, two triangles per face.
    #[rustfmt::skip]
    let faces: [([f32; 3], [(usize, usize); 6]); 6] = [
        // Front (+Z)
        (POS_Z, [(7, 2), (3, 0), (0, 1), (4, 3), (7, 2), (0, 1)]),
        // Back (-Z)
        (NEG_Z, [(5, 2), (2, 1), (6, 3), (5, 2), (1, 0), (2, 1)]),
        // Top (+Y)
        (POS_Y, [(4, 2), (5, 3), (6, 1), (4, 2), (6, 1), (7, 0)]),
        // Bottom (-Y)
        (NEG_Y, [(0, 3), (2, 0), (1, 1), (0, 3), (3, 2), (2, 0)]),
        // Left (-X)
        (NEG_X, [(2, 0), (3, 1), (7, 3), (2, 0), (7, 3), (6, 2)]),
        // Right (+X)
        (POS_X, [(4, 2), (1, 1), (5, 3), (1, 1), (4, 2), (0, 0)]),
    ];

    let mut vertices = Vec::with_capacity(ShapeKind::Cube.vertex_count() as usize);
    for (normal, table) in faces {
        for (corner_index, uv_index) in table {
            vertices.push(Vertex::new(corner[corner_index], normal, UV[uv_index]));
        }
    }
    vertices
}

/// 6-vertex ground plane with edge length `length`: one quad in the XZ plane
/// at y = 0, normal +Y, counter-clockwise viewed from above.
#[must_use]
pub fn plane_vertices(length: f32) -> Vec<Vertex> {
    let semi = length / 2.0;

    let corner = [
        [semi, 0.0, -semi],  // 0
        [semi, 0.0, semi],   // 1
        [-semi, 0.0, -semi], // 2
        [-semi, 0.0, semi],  // 3
    ];

    const UP: [f32; 3] = [0.0, 1.0, 0.0];
    const UV: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

    vec![
        Vertex::new(corner[2], UP, UV[1]),
        Vertex::new(corner[1], UP, UV[2]),
        Vertex::new(corner[0], UP, UV[0]),
        Vertex::new(corner[2], UP, UV[1]),
        Vertex::new(corner[3], UP, UV[3]),
        Vertex::new(corner[1], UP, UV[2]),
    ]
}

/// Rewrites each component of `position` to its sign (+1 / -1), leaving
/// near-zero components at exactly 0.
#[must_use]
pub fn canonicalize(position: [f32; 3]) -> [f32; 3] {
    let mut out = position;
    for component in &mut out {
        if component.abs() > AXIS_EPSILON {
            *component /= component.abs();
        } else {
            *component = 0.0;
        }
    }
    out
}

/// Re-scales every vertex position to half-extent `new_length / 2` per axis,
/// preserving each vertex's octant. Canonicalize-then-scale: applying the
/// same length twice yields the same positions as applying it once.
pub fn resize_vertices(vertices: &mut [Vertex], new_length: f32) {
    let semi = new_length / 2.0;
    for vertex in vertices {
        let canonical = canonicalize(vertex.position);
        vertex.position = [
            canonical[0] * semi,
            canonical[1] * semi,
            canonical[2] * semi,
        ];
    }
}
