use glam::{Mat4, Vec3};

/// The scene's single light, positioned in world space and always aimed at
/// the origin.
///
/// The light's view-projection matrix deliberately reuses the camera's
/// projection parameters instead of an independent frustum; the shadow map
/// is rendered and sampled through `projection * look_at(position, origin, +Y)`.
#[derive(Debug, Clone)]
pub struct Light {
    position: Vec3,
    dirty: bool,
}

impl Default for Light {
    fn default() -> Self {
        // Above and behind the default camera; the host normally overrides
        // this through the scene description.
        Self::new(Vec3::new(0.0, 50.0, 50.0))
    }
}

impl Light {
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            dirty: false,
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Short-circuits on equality; returns whether the position changed.
    pub fn set_position(&mut self, position: Vec3) -> bool {
        if self.position == position {
            return false;
        }
        self.position = position;
        self.dirty = true;
        true
    }

    /// Consumes the dirty bit set by [`set_position`](Light::set_position).
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Composes the light's view-projection matrix from the camera's
    /// projection. Pure function of `projection` and the light position.
    #[must_use]
    pub fn view_projection(&self, projection: Mat4) -> Mat4 {
        projection * Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }
}
