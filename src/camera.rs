//! Pinhole model of the device camera.
//!
//! The host AR framework owns the real camera; this resource mirrors its pose
//! and projection so the core can move between screen taps and world rays.
//! Screen coordinates are in pixels with the origin at the bottom-left and Y
//! pointing up.

use bevy_ecs::prelude::Resource;
use bevy_transform::components::Transform;
use glam::{Vec2, Vec3};

use crate::geometry::Ray;

/// Camera pose, field of view and viewport size.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewCamera {
    /// World pose; the camera looks along its local `-Z` with `+Y` up.
    pub transform: Transform,
    /// Vertical field of view in radians.
    pub vertical_fov: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self::looking_at(
            Vec3::new(0.0, 1.5, 0.0),
            Vec3::new(0.0, 0.0, -2.0),
            Vec2::new(1080.0, 1920.0),
        )
    }
}

impl ViewCamera {
    /// Default vertical field of view, roughly that of a phone camera.
    pub const DEFAULT_FOV: f32 = std::f32::consts::FRAC_PI_3;

    /// Camera at `eye` looking at `target` with the default field of view.
    #[must_use]
    pub fn looking_at(eye: Vec3, target: Vec3, viewport: Vec2) -> Self {
        Self {
            transform: Transform::from_translation(eye).looking_at(target, Vec3::Y),
            vertical_fov: Self::DEFAULT_FOV,
            viewport,
        }
    }

    fn half_extent_slopes(&self) -> Vec2 {
        let tan_half = (self.vertical_fov * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;
        Vec2::new(tan_half * aspect, tan_half)
    }

    /// Projects a world point to the screen.
    ///
    /// `x`/`y` are pixels and `z` is the depth in front of the camera. A
    /// negative depth means the point lies behind the camera.
    #[must_use]
    pub fn world_to_screen(&self, point: Vec3) -> Vec3 {
        let local = self.transform.rotation.inverse() * (point - self.transform.translation);
        let depth = -local.z;
        let slopes = self.half_extent_slopes();
        let ndc = Vec2::new(local.x, local.y) / (slopes * depth);
        let screen = (ndc + Vec2::ONE) * 0.5 * self.viewport;
        screen.extend(depth)
    }

    /// Whether a projected point is in front of the camera and inside the
    /// viewport.
    #[must_use]
    pub fn is_on_screen(&self, projected: Vec3) -> bool {
        projected.z > 0.0
            && projected.x >= 0.0
            && projected.x <= self.viewport.x
            && projected.y >= 0.0
            && projected.y <= self.viewport.y
    }

    /// World ray through a screen point.
    #[must_use]
    pub fn screen_ray(&self, screen: Vec2) -> Ray {
        let ndc = screen / self.viewport * 2.0 - Vec2::ONE;
        let local = (ndc * self.half_extent_slopes()).extend(-1.0);
        Ray::new(self.transform.translation, self.transform.rotation * local)
    }

    /// Centre of the viewport in pixels.
    #[must_use]
    pub fn screen_center(&self) -> Vec2 {
        self.viewport * 0.5
    }
}
