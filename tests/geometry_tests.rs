//! Geometry Tests
//!
//! Tests for:
//! - Fixed vertex counts and topology invariance
//! - Face winding consistency (counter-clockwise viewed from outside)
//! - Canonicalize-then-scale resize semantics (idempotence, octant
//!   preservation, degenerate axis handling)
//! - Normal and texture-coordinate integrity

use glam::Vec3;

use umbra::geometry::{
    ShapeKind, canonicalize, cube_vertices, plane_vertices, resize_vertices,
};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Vertex Count / Topology Tests
// ============================================================================

#[test]
fn cube_has_36_vertices() {
    assert_eq!(cube_vertices(25.0).len(), 36);
    assert_eq!(ShapeKind::Cube.vertex_count(), 36);
}

#[test]
fn plane_has_6_vertices() {
    assert_eq!(plane_vertices(25.0).len(), 6);
    assert_eq!(ShapeKind::Plane.vertex_count(), 6);
}

#[test]
fn vertex_count_invariant_across_resize() {
    let mut vertices = cube_vertices(25.0);
    for length in [50.0, 1.0, 25.0, 0.5] {
        resize_vertices(&mut vertices, length);
        assert_eq!(vertices.len(), 36, "resize must never change topology");
    }
}

#[test]
fn resize_leaves_normals_and_tex_coords_untouched() {
    let original = cube_vertices(25.0);
    let mut resized = original.clone();
    resize_vertices(&mut resized, 80.0);
    for (a, b) in original.iter().zip(&resized) {
        assert_eq!(a.normal, b.normal);
        assert_eq!(a.tex_coord, b.tex_coord);
    }
}

// ============================================================================
// Winding Tests
// ============================================================================

#[test]
fn cube_faces_wind_counter_clockwise() {
    let vertices = cube_vertices(2.0);
    for (index, triangle) in vertices.chunks(3).enumerate() {
        let a = Vec3::from(triangle[0].position);
        let b = Vec3::from(triangle[1].position);
        let c = Vec3::from(triangle[2].position);
        let face_normal = Vec3::from(triangle[0].normal);
        let winding = (b - a).cross(c - b);
        assert!(
            winding.dot(face_normal) > 0.0,
            "triangle {index} winds away from its face normal {face_normal:?}"
        );
    }
}

#[test]
fn plane_winds_counter_clockwise() {
    let vertices = plane_vertices(2.0);
    for triangle in vertices.chunks(3) {
        let a = Vec3::from(triangle[0].position);
        let b = Vec3::from(triangle[1].position);
        let c = Vec3::from(triangle[2].position);
        let winding = (b - a).cross(c - b);
        assert!(winding.y > 0.0, "plane triangles must face +Y");
    }
}

#[test]
fn cube_vertices_lie_on_their_face() {
    let vertices = cube_vertices(2.0);
    for vertex in &vertices {
        let normal = Vec3::from(vertex.normal);
        let position = Vec3::from(vertex.position);
        // Every vertex of a face sits on the face plane at half-extent 1.
        assert!(approx(position.dot(normal), 1.0));
    }
}

#[test]
fn cube_normals_are_unit_axis_aligned() {
    for vertex in cube_vertices(25.0) {
        let normal = Vec3::from(vertex.normal);
        assert!(approx(normal.length(), 1.0));
        let axis_components = [normal.x, normal.y, normal.z]
            .iter()
            .filter(|component| component.abs() > EPSILON)
            .count();
        assert_eq!(axis_components, 1);
    }
}

#[test]
fn tex_coords_use_the_four_shared_corners() {
    for vertex in cube_vertices(25.0).iter().chain(&plane_vertices(25.0)) {
        for component in vertex.tex_coord {
            assert!(component == 0.0 || component == 1.0);
        }
    }
}

// ============================================================================
// Resize Tests
// ============================================================================

#[test]
fn resize_box_to_50_yields_components_of_25() {
    // Default box is 25 units; resizing to 50 must put every non-zero
    // component at half of 50, preserving its sign.
    let mut vertices = cube_vertices(25.0);
    let signs: Vec<[f32; 3]> = vertices.iter().map(|v| canonicalize(v.position)).collect();

    resize_vertices(&mut vertices, 50.0);

    for (vertex, sign) in vertices.iter().zip(&signs) {
        for axis in 0..3 {
            assert!(
                approx(vertex.position[axis], sign[axis] * 25.0),
                "expected {} got {}",
                sign[axis] * 25.0,
                vertex.position[axis]
            );
        }
    }
}

#[test]
fn resize_is_idempotent() {
    let mut once = cube_vertices(25.0);
    resize_vertices(&mut once, 40.0);

    let mut twice = once.clone();
    resize_vertices(&mut twice, 40.0);

    for (a, b) in once.iter().zip(&twice) {
        assert_eq!(a.position, b.position);
    }
}

#[test]
fn resize_preserves_octants() {
    let original = cube_vertices(25.0);
    let mut resized = original.clone();
    resize_vertices(&mut resized, 3.0);

    for (a, b) in original.iter().zip(&resized) {
        for axis in 0..3 {
            assert!(
                (a.position[axis] >= 0.0) == (b.position[axis] >= 0.0),
                "resize flipped an octant"
            );
        }
    }
}

#[test]
fn plane_y_stays_zero_across_resizes() {
    // The degenerate axis (no extent on Y) must stay exactly 0 rather than
    // trip a division by zero.
    let mut vertices = plane_vertices(25.0);
    resize_vertices(&mut vertices, 100.0);
    resize_vertices(&mut vertices, 0.5);
    for vertex in &vertices {
        assert_eq!(vertex.position[1], 0.0);
    }
}

#[test]
fn canonicalize_degenerate_components() {
    assert_eq!(canonicalize([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    assert_eq!(canonicalize([12.5, -12.5, 0.0]), [1.0, -1.0, 0.0]);
    // Within fuzz of zero counts as zero.
    assert_eq!(canonicalize([1e-7, -1e-7, 5.0]), [0.0, 0.0, 1.0]);
}
