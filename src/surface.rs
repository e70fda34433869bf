//! Ray queries answered by the host environment.
//!
//! Two services feed the core. The AR plane service reports hits against
//! planes detected by the device; the collider service reports hits against
//! whatever static geometry the host physics engine knows about. Both are
//! injected through [`SurfaceServices`] so nothing searches the world for
//! them at runtime.

use bevy_ecs::prelude::{Entity, Resource};
use glam::Vec3;

use crate::geometry::Ray;

/// Orientation class of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneAlignment {
    /// Faces up, like a floor or table top.
    HorizontalUp,
    /// Faces down, like a ceiling.
    HorizontalDown,
    /// A wall.
    Vertical,
    /// Anything else.
    NotAxisAligned,
}

impl PlaneAlignment {
    /// Tolerance on the normal's vertical component when classifying.
    const AXIS_TOLERANCE: f32 = 1e-3;

    /// Classifies a unit surface normal.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use furnish::surface::PlaneAlignment;
    /// assert_eq!(PlaneAlignment::from_normal(Vec3::Y), PlaneAlignment::HorizontalUp);
    /// assert_eq!(PlaneAlignment::from_normal(Vec3::X), PlaneAlignment::Vertical);
    /// ```
    #[must_use]
    pub fn from_normal(normal: Vec3) -> Self {
        if (normal.y - 1.0).abs() < Self::AXIS_TOLERANCE {
            Self::HorizontalUp
        } else if (normal.y + 1.0).abs() < Self::AXIS_TOLERANCE {
            Self::HorizontalDown
        } else if normal.y.abs() < Self::AXIS_TOLERANCE {
            Self::Vertical
        } else {
            Self::NotAxisAligned
        }
    }
}

/// Result of a successful surface raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// World-space hit point.
    pub point: Vec3,
    /// Unit normal of the surface at the hit point.
    pub normal: Vec3,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Orientation class of the surface that was hit.
    pub alignment: PlaneAlignment,
}

/// Raycasts against planes detected by the AR framework.
///
/// Implementations only report hits inside a plane's detected boundary.
pub trait PlaneRaycaster: Send + Sync {
    /// Nearest plane hit along `ray`, if any.
    fn raycast(&self, ray: &Ray) -> Option<SurfaceHit>;
}

/// Raycasts against physics colliders in the host scene.
///
/// Colliders may belong to placed furniture. A query made on behalf of an
/// item passes that item as `ignore` so it never lands on itself.
pub trait ColliderRaycaster: Send + Sync {
    /// Nearest hit along `ray` no further than `max_distance`, skipping
    /// colliders owned by `ignore`.
    fn raycast(
        &self,
        ray: &Ray,
        max_distance: f32,
        ignore: Option<Entity>,
    ) -> Option<SurfaceHit>;
}

/// External ray-query services available to the core.
///
/// A missing plane service disables surface tracking and makes tap placement
/// fall back to the collider service.
#[derive(Resource, Default)]
pub struct SurfaceServices {
    planes: Option<Box<dyn PlaneRaycaster>>,
    colliders: Option<Box<dyn ColliderRaycaster>>,
}

impl SurfaceServices {
    /// Installs the AR plane service.
    #[must_use]
    pub fn with_planes(mut self, planes: impl PlaneRaycaster + 'static) -> Self {
        self.planes = Some(Box::new(planes));
        self
    }

    /// Installs the collider service.
    #[must_use]
    pub fn with_colliders(mut self, colliders: impl ColliderRaycaster + 'static) -> Self {
        self.colliders = Some(Box::new(colliders));
        self
    }

    /// Whether an AR plane service is installed.
    #[must_use]
    pub fn has_plane_service(&self) -> bool {
        self.planes.is_some()
    }

    /// Plane raycast; `None` when missed or when no plane service exists.
    #[must_use]
    pub fn raycast_planes(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.planes.as_ref().and_then(|planes| planes.raycast(ray))
    }

    /// Collider raycast ignoring colliders owned by `ignore`; `None` when
    /// missed or when no collider service exists.
    #[must_use]
    pub fn raycast_colliders(
        &self,
        ray: &Ray,
        max_distance: f32,
        ignore: Option<Entity>,
    ) -> Option<SurfaceHit> {
        self.colliders
            .as_ref()
            .and_then(|colliders| colliders.raycast(ray, max_distance, ignore))
    }
}

impl std::fmt::Debug for SurfaceServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceServices")
            .field("planes", &self.planes.is_some())
            .field("colliders", &self.colliders.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Floor;

    impl PlaneRaycaster for Floor {
        fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
            let distance = -ray.origin.y / ray.direction.y;
            (distance >= 0.0).then(|| SurfaceHit {
                point: ray.at(distance),
                normal: Vec3::Y,
                distance,
                alignment: PlaneAlignment::HorizontalUp,
            })
        }
    }

    #[rstest]
    #[case(Vec3::Y, PlaneAlignment::HorizontalUp)]
    #[case(Vec3::NEG_Y, PlaneAlignment::HorizontalDown)]
    #[case(Vec3::Z, PlaneAlignment::Vertical)]
    #[case(Vec3::new(0.0, 0.7071, 0.7071), PlaneAlignment::NotAxisAligned)]
    fn classifies_normals(#[case] normal: Vec3, #[case] expected: PlaneAlignment) {
        assert_eq!(PlaneAlignment::from_normal(normal), expected);
    }

    #[test]
    fn empty_services_report_nothing() {
        let services = SurfaceServices::default();
        let ray = Ray::downward(Vec3::Y);
        assert!(!services.has_plane_service());
        assert!(services.raycast_planes(&ray).is_none());
        assert!(services.raycast_colliders(&ray, 10.0, None).is_none());
    }

    #[test]
    fn installed_plane_service_answers() {
        let services = SurfaceServices::default().with_planes(Floor);
        let hit = services.raycast_planes(&Ray::downward(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(hit.map(|h| h.point), Some(Vec3::new(1.0, 0.0, 3.0)));
    }
}
