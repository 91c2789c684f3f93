//! Camera and Light Tests
//!
//! Tests for:
//! - Deterministic view/projection derivation
//! - Projection against the standard perspective formula (zero-to-one clip)
//! - Staged matrix publication (mutations invisible until publish)
//! - Setter equality short-circuits
//! - Light view-projection composition

use glam::{Mat4, Vec3, Vec4};

use umbra::scene::{Camera, Light};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn mat4_approx(a: Mat4, b: Mat4) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(x, y)| approx(*x, *y))
}

// ============================================================================
// Derivation Tests
// ============================================================================

#[test]
fn view_derivation_is_deterministic() {
    let camera = Camera::default();
    // Identical inputs must be bit-reproducible, not merely approximate.
    assert_eq!(
        camera.compute_view().to_cols_array(),
        camera.compute_view().to_cols_array()
    );
    assert_eq!(
        camera.compute_projection().to_cols_array(),
        camera.compute_projection().to_cols_array()
    );
}

#[test]
fn view_matches_look_at() {
    let camera = Camera::new(
        Vec3::new(0.0, 0.0, 50.0),
        Vec3::ZERO,
        Vec3::Y,
        45.0,
        16.0 / 9.0,
        0.5,
        500.0,
    );
    let expected = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, Vec3::Y);
    assert_eq!(camera.view_matrix().to_cols_array(), expected.to_cols_array());
}

#[test]
fn projection_matches_standard_perspective_formula() {
    // position (0,0,50), look-at origin, fov 45 deg, aspect 16/9,
    // near 0.5, far 500: the projection must match the standard
    // right-handed zero-to-one perspective matrix within 1e-5.
    let camera = Camera::new(
        Vec3::new(0.0, 0.0, 50.0),
        Vec3::ZERO,
        Vec3::Y,
        45.0,
        16.0 / 9.0,
        0.5,
        500.0,
    );

    let fov = 45.0f32.to_radians();
    let aspect = 16.0 / 9.0;
    let (near, far) = (0.5, 500.0);
    let focal = 1.0 / (fov / 2.0).tan();
    let expected = Mat4::from_cols(
        Vec4::new(focal / aspect, 0.0, 0.0, 0.0),
        Vec4::new(0.0, focal, 0.0, 0.0),
        Vec4::new(0.0, 0.0, far / (near - far), -1.0),
        Vec4::new(0.0, 0.0, near * far / (near - far), 0.0),
    );

    assert!(
        mat4_approx(camera.projection_matrix(), expected),
        "projection {:?} != expected {:?}",
        camera.projection_matrix(),
        expected
    );
}

// ============================================================================
// Staged Publication Tests
// ============================================================================

#[test]
fn camera_mutation_is_invisible_until_publish() {
    let mut camera = Camera::default();
    let before = camera.view_matrix();

    camera.set_position(Vec3::new(10.0, 5.0, 50.0));

    // The published matrix still shows the previous snapshot.
    assert_eq!(camera.view_matrix().to_cols_array(), before.to_cols_array());

    camera.publish();

    // After publish, the full new snapshot is visible.
    assert_eq!(
        camera.view_matrix().to_cols_array(),
        camera.compute_view().to_cols_array()
    );
    assert!(camera.view_matrix().to_cols_array() != before.to_cols_array());
}

#[test]
fn publish_reports_projection_changes_only() {
    let mut camera = Camera::default();

    camera.set_position(Vec3::new(1.0, 2.0, 3.0));
    assert!(!camera.publish(), "view-only change must not report projection");

    camera.set_field_of_view(60.0);
    assert!(camera.publish());
    assert!(!camera.publish(), "publish must consume the dirty bit");
}

#[test]
fn setters_short_circuit_on_equal_values() {
    let mut camera = Camera::default();
    assert!(!camera.set_position(camera.position()));
    assert!(!camera.set_field_of_view(camera.field_of_view()));
    assert!(!camera.set_aspect_ratio(camera.aspect_ratio()));
    assert!(camera.set_near_plane(camera.near_plane() + 1.0));
}

#[test]
fn default_camera_matches_scene_conventions() {
    let camera = Camera::default();
    assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 50.0));
    assert_eq!(camera.look_at(), Vec3::ZERO);
    assert_eq!(camera.up(), Vec3::Y);
    assert!(approx(camera.field_of_view(), 45.0));
    assert!(approx(camera.aspect_ratio(), 16.0 / 9.0));
    assert!(approx(camera.near_plane(), 0.5));
    assert!(approx(camera.far_plane(), 500.0));
}

// ============================================================================
// Light Tests
// ============================================================================

#[test]
fn light_view_projection_composition() {
    let camera = Camera::default();
    let light = Light::new(Vec3::new(0.0, 80.0, 80.0));

    let expected = camera.projection_matrix()
        * Mat4::look_at_rh(Vec3::new(0.0, 80.0, 80.0), Vec3::ZERO, Vec3::Y);
    assert_eq!(
        light
            .view_projection(camera.projection_matrix())
            .to_cols_array(),
        expected.to_cols_array()
    );
}

#[test]
fn moving_the_light_changes_only_the_composition() {
    let mut camera = Camera::default();
    let mut light = Light::new(Vec3::new(0.0, 80.0, 80.0));

    let projection_before = camera.projection_matrix();
    let composed_before = light.view_projection(projection_before);

    assert!(light.set_position(Vec3::new(40.0, 80.0, 0.0)));

    // The projection factor is untouched; the composed matrix is not.
    assert!(!camera.publish());
    assert_eq!(
        camera.projection_matrix().to_cols_array(),
        projection_before.to_cols_array()
    );
    let composed_after = light.view_projection(camera.projection_matrix());
    assert!(composed_after.to_cols_array() != composed_before.to_cols_array());
}

#[test]
fn light_dirty_bit_is_consumed_once() {
    let mut light = Light::new(Vec3::new(0.0, 80.0, 80.0));
    assert!(!light.take_dirty());

    light.set_position(Vec3::new(1.0, 80.0, 80.0));
    assert!(light.take_dirty());
    assert!(!light.take_dirty());

    // Equal value: no dirty, no change.
    assert!(!light.set_position(light.position()));
    assert!(!light.take_dirty());
}
