//! Vector helpers that keep horizontal and vertical motion apart.
//!
//! The world is Y-up. "Horizontal" means the X/Z plane, which is the plane
//! a user drags furniture across.
use glam::{Vec2, Vec3};

/// Returns `position` with its height replaced by `height`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use furnish::vector_math::with_height;
/// let moved = with_height(Vec3::new(1.0, 5.0, -2.0), 0.5);
/// assert_eq!(moved, Vec3::new(1.0, 0.5, -2.0));
/// ```
#[must_use]
pub const fn with_height(position: Vec3, height: f32) -> Vec3 {
    Vec3::new(position.x, height, position.z)
}

/// Projects a position onto the horizontal plane.
#[must_use]
pub const fn horizontal(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}

/// Returns `position` moved to the horizontal coordinates of `to`, keeping
/// its own height.
///
/// # Examples
/// ```
/// use glam::{Vec2, Vec3};
/// use furnish::vector_math::with_horizontal;
/// let dragged = with_horizontal(Vec3::new(0.0, 0.7, 0.0), Vec2::new(3.0, 4.0));
/// assert_eq!(dragged, Vec3::new(3.0, 0.7, 4.0));
/// ```
#[must_use]
pub const fn with_horizontal(position: Vec3, to: Vec2) -> Vec3 {
    Vec3::new(to.x, position.y, to.y)
}

/// Unit vector in the direction of `vector`, or zero when that is undefined.
#[must_use]
pub fn normalize_or_zero(vector: Vec3) -> Vec3 {
    if !vector.is_finite() {
        return Vec3::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec3::ZERO)
}
