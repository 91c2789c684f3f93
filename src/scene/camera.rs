use glam::{Mat4, Vec3};

/// Perspective camera with staged matrix publication.
///
/// Property setters recompute the affected matrix into a *pending* slot and
/// mark it dirty; [`publish`](Camera::publish) copies pending matrices into
/// the slots the render phase reads. The render phase therefore always
/// observes whole-matrix snapshots, never a matrix mid-update; the
/// synchronize callback is the only place `publish` is called from.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    look_at: Vec3,
    up: Vec3,

    /// Vertical field of view, degrees.
    field_of_view: f32,
    aspect_ratio: f32,
    near_plane: f32,
    far_plane: f32,

    pending_view: Mat4,
    pending_projection: Mat4,
    view_dirty: bool,
    projection_dirty: bool,

    // Published snapshots, read by the render phase.
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vec3::new(0.0, 0.0, 50.0),
            Vec3::ZERO,
            Vec3::Y,
            45.0,
            16.0 / 9.0,
            0.5,
            500.0,
        )
    }
}

impl Camera {
    #[must_use]
    pub fn new(
        position: Vec3,
        look_at: Vec3,
        up: Vec3,
        field_of_view: f32,
        aspect_ratio: f32,
        near_plane: f32,
        far_plane: f32,
    ) -> Self {
        let mut camera = Self {
            position,
            look_at,
            up,
            field_of_view,
            aspect_ratio,
            near_plane,
            far_plane,
            pending_view: Mat4::IDENTITY,
            pending_projection: Mat4::IDENTITY,
            view_dirty: false,
            projection_dirty: false,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.pending_view = camera.compute_view();
        camera.pending_projection = camera.compute_projection();
        camera.view_matrix = camera.pending_view;
        camera.projection_matrix = camera.pending_projection;
        camera
    }

    /// View matrix as a pure function of position / look-at / up.
    /// Deterministic: identical inputs produce bit-identical output.
    #[must_use]
    pub fn compute_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, self.up)
    }

    /// Projection matrix as a pure function of the frustum fields
    /// (right-handed, zero-to-one depth clip, matching wgpu NDC).
    #[must_use]
    pub fn compute_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.field_of_view.to_radians(),
            self.aspect_ratio,
            self.near_plane,
            self.far_plane,
        )
    }

    fn stage_view(&mut self) {
        self.pending_view = self.compute_view();
        self.view_dirty = true;
    }

    fn stage_projection(&mut self) {
        self.pending_projection = self.compute_projection();
        self.projection_dirty = true;
    }

    /// Publishes any pending matrices. Returns `true` if the projection
    /// changed (the light's view-projection matrix depends on it).
    pub fn publish(&mut self) -> bool {
        if self.view_dirty {
            self.view_matrix = self.pending_view;
            self.view_dirty = false;
        }
        let projection_changed = self.projection_dirty;
        if self.projection_dirty {
            self.projection_matrix = self.pending_projection;
            self.projection_dirty = false;
        }
        projection_changed
    }

    // ========================================================================
    // Property setters. Each short-circuits on equality and returns whether
    // the value actually changed, so the owner can notify its host.
    // ========================================================================

    pub fn set_position(&mut self, position: Vec3) -> bool {
        if self.position == position {
            return false;
        }
        self.position = position;
        self.stage_view();
        true
    }

    pub fn set_look_at(&mut self, look_at: Vec3) -> bool {
        if self.look_at == look_at {
            return false;
        }
        self.look_at = look_at;
        self.stage_view();
        true
    }

    pub fn set_up(&mut self, up: Vec3) -> bool {
        if self.up == up {
            return false;
        }
        self.up = up;
        self.stage_view();
        true
    }

    pub fn set_field_of_view(&mut self, field_of_view: f32) -> bool {
        if self.field_of_view == field_of_view {
            return false;
        }
        self.field_of_view = field_of_view;
        self.stage_projection();
        true
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) -> bool {
        if self.aspect_ratio == aspect_ratio {
            return false;
        }
        self.aspect_ratio = aspect_ratio;
        self.stage_projection();
        true
    }

    pub fn set_near_plane(&mut self, near_plane: f32) -> bool {
        if self.near_plane == near_plane {
            return false;
        }
        self.near_plane = near_plane;
        self.stage_projection();
        true
    }

    pub fn set_far_plane(&mut self, far_plane: f32) -> bool {
        if self.far_plane == far_plane {
            return false;
        }
        self.far_plane = far_plane;
        self.stage_projection();
        true
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    #[must_use]
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    #[must_use]
    pub fn near_plane(&self) -> f32 {
        self.near_plane
    }

    #[must_use]
    pub fn far_plane(&self) -> f32 {
        self.far_plane
    }

    /// Published view matrix (what the render phase sees).
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// Published projection matrix (what the render phase sees).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }
}
