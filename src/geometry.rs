//! Bounding volumes and rays used for coarse overlap and hit testing.
//!
//! Overlap tests are strict: volumes that only touch on a face or at a point
//! do not overlap, so furniture can be placed flush against other furniture.

use glam::{Mat3, Quat, Vec3};

use crate::vector_math::normalize_or_zero;

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point in world space.
    pub origin: Vec3,
    /// Unit direction; zero when constructed from a degenerate vector.
    pub direction: Vec3,
}

impl Ray {
    /// Builds a ray, normalising `direction`.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: normalize_or_zero(direction),
        }
    }

    /// Ray pointing straight down from `origin`.
    #[must_use]
    pub const fn downward(origin: Vec3) -> Self {
        Self {
            origin,
            direction: Vec3::NEG_Y,
        }
    }

    /// Point at `distance` along the ray.
    #[must_use]
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Axis-aligned box stored as centre and half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Centre of the box.
    pub center: Vec3,
    /// Half the size along each axis; never negative.
    pub half_extents: Vec3,
}

impl Aabb {
    /// Builds a box from its centre and full size.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            half_extents: size.abs() * 0.5,
        }
    }

    /// Smallest corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    /// Largest corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Full size along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    /// Same box moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            center: self.center + offset,
            half_extents: self.half_extents,
        }
    }

    /// Treats `self` as a local-space box and returns the world-space box
    /// enclosing it after scale, rotation and translation.
    #[must_use]
    pub fn transformed(&self, translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        let basis = Mat3::from_quat(rotation);
        let half = scale.abs() * self.half_extents;
        Self {
            center: translation + rotation * (scale * self.center),
            half_extents: basis.x_axis.abs() * half.x
                + basis.y_axis.abs() * half.y
                + basis.z_axis.abs() * half.z,
        }
    }

    /// Whether the interiors of the two boxes overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let gap = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        gap.cmplt(reach).all()
    }

    /// Point of the box nearest to `point`.
    #[must_use]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min(), self.max())
    }

    /// Whether `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.center).abs().cmple(self.half_extents).all()
    }

    /// Distance along `ray` to where it enters the box.
    ///
    /// Rays starting inside the box report no hit, matching collider
    /// raycasts in game physics engines.
    #[must_use]
    pub fn ray_distance(&self, ray: &Ray, max_distance: f32) -> Option<f32> {
        if self.contains(ray.origin) {
            return None;
        }
        let inverse = ray.direction.recip();
        let to_min = (self.min() - ray.origin) * inverse;
        let to_max = (self.max() - ray.origin) * inverse;
        let near = to_min.min(to_max);
        let far = to_min.max(to_max);
        let enter = axis_max(near);
        let exit = axis_min(far);
        if enter.is_nan() || exit < enter || enter < 0.0 || enter > max_distance {
            return None;
        }
        Some(enter)
    }
}

// `f32::max` ignores NaN, which a slab test relies on for rays parallel to an
// axis whose origin lies inside that slab.
fn axis_max(v: Vec3) -> f32 {
    v.x.max(v.y).max(v.z)
}

fn axis_min(v: Vec3) -> f32 {
    v.x.min(v.y).min(v.z)
}

/// Sphere used when an object has no collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Centre of the sphere.
    pub center: Vec3,
    /// Radius; never negative.
    pub radius: f32,
}

impl Sphere {
    /// Builds a sphere, taking the absolute value of `radius`.
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// Whether the two spheres overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.center.distance(other.center) < self.radius + other.radius
    }

    /// Whether the sphere overlaps `aabb`.
    #[must_use]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        aabb.closest_point(self.center).distance(self.center) < self.radius
    }

    /// Distance along `ray` to the sphere surface.
    ///
    /// As with [`Aabb::ray_distance`], rays starting inside report no hit.
    #[must_use]
    pub fn ray_distance(&self, ray: &Ray, max_distance: f32) -> Option<f32> {
        let to_center = self.center - ray.origin;
        if to_center.length_squared() <= self.radius * self.radius {
            return None;
        }
        let along = to_center.dot(ray.direction);
        if along < 0.0 {
            return None;
        }
        let off_axis_sq = to_center.length_squared() - along * along;
        let radius_sq = self.radius * self.radius;
        if off_axis_sq > radius_sq {
            return None;
        }
        let distance = along - (radius_sq - off_axis_sq).sqrt();
        (distance <= max_distance).then_some(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn unit_box(center: Vec3) -> Aabb {
        Aabb::from_center_size(center, Vec3::ONE)
    }

    #[rstest]
    #[case::same_place(Vec3::ZERO, true)]
    #[case::half_overlap(Vec3::new(0.5, 0.0, 0.0), true)]
    #[case::touching_face(Vec3::new(1.0, 0.0, 0.0), false)]
    #[case::apart(Vec3::new(0.0, 0.0, 3.0), false)]
    #[case::diagonal_overlap(Vec3::new(0.9, 0.9, 0.9), true)]
    fn box_overlap(#[case] other: Vec3, #[case] expected: bool) {
        assert_eq!(unit_box(Vec3::ZERO).intersects(&unit_box(other)), expected);
    }

    #[rstest]
    #[case::close(0.5, true)]
    #[case::touching(2.0, false)]
    #[case::far(3.0, false)]
    fn sphere_overlap(#[case] separation: f32, #[case] expected: bool) {
        let a = Sphere::new(Vec3::ZERO, 1.0);
        let b = Sphere::new(Vec3::new(separation, 0.0, 0.0), 1.0);
        assert_eq!(a.intersects(&b), expected);
    }

    #[test]
    fn sphere_meets_box_corner() {
        let aabb = unit_box(Vec3::ZERO);
        let corner = Vec3::splat(0.5);
        assert!(Sphere::new(corner + Vec3::splat(0.1), 0.2).intersects_aabb(&aabb));
        assert!(!Sphere::new(corner + Vec3::splat(0.5), 0.2).intersects_aabb(&aabb));
    }

    #[test]
    fn rotated_box_grows_to_enclose() {
        let local = Aabb::from_center_size(Vec3::ZERO, Vec3::new(2.0, 1.0, 0.0));
        let world = local.transformed(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
            Vec3::ONE,
        );
        assert_relative_eq!(world.center.x, 1.0);
        assert_relative_eq!(world.half_extents.x, 2.0_f32.sqrt() / 2.0, epsilon = 1e-5);
        assert_relative_eq!(world.half_extents.z, 2.0_f32.sqrt() / 2.0, epsilon = 1e-5);
        assert_relative_eq!(world.half_extents.y, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn scaled_offset_moves_centre() {
        let local = Aabb::from_center_size(Vec3::new(0.0, 0.5, 0.0), Vec3::ONE);
        let world = local.transformed(Vec3::ZERO, Quat::IDENTITY, Vec3::splat(2.0));
        assert_relative_eq!(world.center.y, 1.0);
        assert_relative_eq!(world.size().x, 2.0);
    }

    #[test]
    fn ray_enters_box_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = unit_box(Vec3::ZERO).ray_distance(&ray, 10.0);
        assert_eq!(hit, Some(4.5));
        assert_eq!(unit_box(Vec3::ZERO).ray_distance(&ray, 4.0), None);
    }

    #[test]
    fn ray_from_inside_box_misses() {
        let ray = Ray::downward(Vec3::ZERO);
        assert_eq!(unit_box(Vec3::ZERO).ray_distance(&ray, 10.0), None);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert_eq!(unit_box(Vec3::ZERO).ray_distance(&ray, 10.0), None);
    }

    #[test]
    fn ray_hits_sphere() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        assert_eq!(sphere.ray_distance(&ray, 10.0), Some(4.0));
        let skew = Ray::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::X);
        assert_eq!(sphere.ray_distance(&skew, 10.0), None);
    }
}
