//! Scene Member and View Tests
//!
//! Tests for:
//! - Member defaults (shape parameters, shadow modes)
//! - Pending-change records: dirty bits, equality short-circuits
//! - Host redraw notification on property changes
//! - Shadow-mode draw behavior selection
//! - Texture source failure is recoverable
//! - View registry and uninitialized-view behavior

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use glam::Vec3;

use umbra::renderer::{ShadowMode, load_rgba_image};
use umbra::scene::{BoxMember, PlaneMember, TexturedBoxMember};
use umbra::{HostNotifier, SceneView};

#[derive(Default)]
struct CountingNotifier {
    redraws: AtomicUsize,
    resets: AtomicUsize,
}

impl CountingNotifier {
    fn redraws(&self) -> usize {
        self.redraws.load(Ordering::SeqCst)
    }
}

impl HostNotifier for CountingNotifier {
    fn request_redraw(&self) {
        self.redraws.fetch_add(1, Ordering::SeqCst);
    }

    fn reset_render_state(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Member Defaults
// ============================================================================

#[test]
fn member_defaults_match_scene_conventions() {
    let cube = BoxMember::new();
    assert_eq!(cube.length(), 25.0);
    assert_eq!(cube.shadow_mode(), ShadowMode::Simple);

    let plane = PlaneMember::new();
    assert_eq!(plane.length(), 25.0);
    assert_eq!(plane.shadow_mode(), ShadowMode::Simple);

    let textured = TexturedBoxMember::new();
    assert_eq!(textured.length(), 10.0);
    assert_eq!(textured.shadow_mode(), ShadowMode::NoShadow);
}

#[test]
fn members_start_clean_and_uninitialized() {
    let cube = BoxMember::new();
    assert!(!cube.has_pending_changes());
    assert!(!cube.is_initialized());
    assert_eq!(cube.translation(), Vec3::ZERO);
    assert!(cube.texture_source().is_none());
}

// ============================================================================
// Shadow Mode Selection
// ============================================================================

#[test]
fn no_shadow_members_skip_both_shadow_roles() {
    // NoShadow instances neither bind shadow resources in the main pass
    // nor draw into the shadow map.
    assert!(!ShadowMode::NoShadow.samples_shadow_map());
    assert!(!ShadowMode::NoShadow.casts_shadow());

    assert!(ShadowMode::Simple.samples_shadow_map());
    assert!(ShadowMode::Simple.casts_shadow());

    // PCF is declared but not yet differentiated from Simple in sampling.
    assert!(ShadowMode::Pcf.samples_shadow_map());
    assert!(ShadowMode::Pcf.casts_shadow());
}

// ============================================================================
// Pending-Change Records
// ============================================================================

#[test]
fn setters_mark_dirty_and_store_the_value() {
    let mut cube = BoxMember::new();

    cube.set_length(50.0);
    assert_eq!(cube.length(), 50.0);
    assert!(cube.has_pending_changes());

    let mut plane = PlaneMember::new();
    plane.set_translation(Vec3::new(0.0, -10.0, 0.0));
    assert_eq!(plane.translation(), Vec3::new(0.0, -10.0, 0.0));
    assert!(plane.has_pending_changes());

    let mut textured = TexturedBoxMember::new();
    textured.set_texture_source("textures/crate.png");
    assert!(textured.has_pending_changes());
    assert_eq!(
        textured.texture_source().unwrap().to_str().unwrap(),
        "textures/crate.png"
    );
}

#[test]
fn setters_short_circuit_on_equal_values() {
    let mut cube = BoxMember::new();
    cube.set_length(BoxMember::DEFAULT_LENGTH);
    assert!(!cube.has_pending_changes());

    cube.set_translation(Vec3::ZERO);
    assert!(!cube.has_pending_changes());
}

#[test]
fn property_changes_notify_the_host() {
    let notifier = Arc::new(CountingNotifier::default());
    let mut view = SceneView::new(notifier.clone());

    let cube = BoxMember::shared();
    view.attach(cube.clone());
    assert_eq!(view.member_count(), 1);
    assert_eq!(notifier.redraws(), 0);

    cube.lock().set_length(40.0);
    assert_eq!(notifier.redraws(), 1);

    // Unchanged value: no notification.
    cube.lock().set_length(40.0);
    assert_eq!(notifier.redraws(), 1);

    cube.lock().set_translation(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(notifier.redraws(), 2);
}

#[test]
fn detached_members_do_not_notify() {
    let mut cube = BoxMember::new();
    // No notifier attached yet; setters must still record the change.
    cube.set_length(12.0);
    assert!(cube.has_pending_changes());
}

// ============================================================================
// View Property Surface
// ============================================================================

#[test]
fn camera_and_light_changes_notify_the_host() {
    let notifier = Arc::new(CountingNotifier::default());
    let mut view = SceneView::new(notifier.clone());

    view.set_camera_position(Vec3::new(0.0, 20.0, 50.0));
    assert_eq!(notifier.redraws(), 1);

    // Equality short-circuit.
    view.set_camera_position(Vec3::new(0.0, 20.0, 50.0));
    assert_eq!(notifier.redraws(), 1);

    view.set_light_position(Vec3::new(30.0, 60.0, 0.0));
    assert_eq!(notifier.redraws(), 2);

    view.set_field_of_view(60.0);
    assert_eq!(notifier.redraws(), 3);
}

#[test]
fn view_starts_uninitialized() {
    let notifier = Arc::new(CountingNotifier::default());
    let view = SceneView::new(notifier);
    assert!(!view.is_initialized());
    assert_eq!(view.member_count(), 0);
}

#[test]
fn surface_ready_schedules_the_first_frame() {
    let notifier = Arc::new(CountingNotifier::default());
    let mut view = SceneView::new(notifier.clone());

    view.surface_ready();
    assert_eq!(notifier.redraws(), 1);
    // GPU state stays lazy until the first synchronize.
    assert!(!view.is_initialized());
}

#[test]
fn camera_mutations_stay_pending_until_synchronize() {
    let notifier = Arc::new(CountingNotifier::default());
    let mut view = SceneView::new(notifier);

    let before = view.camera().view_matrix();
    view.set_camera_position(Vec3::new(5.0, 5.0, 5.0));

    // The render phase reads published matrices; without a synchronize in
    // between, the previous snapshot is still in effect.
    assert_eq!(
        view.camera().view_matrix().to_cols_array(),
        before.to_cols_array()
    );
}

// ============================================================================
// Texture Failure
// ============================================================================

#[test]
fn unreadable_texture_source_is_a_recoverable_error() {
    let _ = env_logger::builder().is_test(true).try_init();

    let result = load_rgba_image(std::path::Path::new("/nonexistent/texture.png"));
    assert!(result.is_err(), "missing file must surface as an error");
}

#[test]
fn setting_a_bad_texture_source_never_panics() {
    let mut cube = BoxMember::new();
    cube.set_texture_source("/nonexistent/texture.png");
    assert!(cube.has_pending_changes());
}
