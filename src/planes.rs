//! In-memory implementations of the surface services.
//!
//! [`PlaneSet`] stands in for an AR plane manager: a list of horizontal
//! rectangles, each one a plane the device has detected. [`ColliderSet`]
//! stands in for a physics scene of boxes, some of them owned by placed
//! furniture. The demo binary and the tests use them; a device build installs
//! adapters over the real framework instead.

use bevy_ecs::prelude::Entity;
use glam::{Vec2, Vec3};
use ordered_float::OrderedFloat;

use crate::geometry::{Aabb, Ray};
use crate::surface::{ColliderRaycaster, PlaneAlignment, PlaneRaycaster, SurfaceHit};

/// Rays closer to parallel with a plane than this are treated as misses.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A detected horizontal plane with a rectangular boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedPlane {
    /// Centre of the plane; its `y` is the plane height.
    pub center: Vec3,
    /// Half the boundary size along X and Z.
    pub half_extents: Vec2,
    /// Which side of the plane faces the room.
    pub alignment: PlaneAlignment,
}

impl DetectedPlane {
    /// Floor-like plane facing up.
    #[must_use]
    pub fn floor(center: Vec3, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size.abs() * 0.5,
            alignment: PlaneAlignment::HorizontalUp,
        }
    }

    fn normal(&self) -> Vec3 {
        match self.alignment {
            PlaneAlignment::HorizontalDown => Vec3::NEG_Y,
            _ => Vec3::Y,
        }
    }

    fn within_boundary(&self, point: Vec3) -> bool {
        let offset = Vec2::new(point.x - self.center.x, point.z - self.center.z);
        offset.abs().cmple(self.half_extents).all()
    }

    /// Hit of `ray` against this plane, inside its boundary.
    #[must_use]
    pub fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        if ray.direction.y.abs() < PARALLEL_EPSILON {
            return None;
        }
        let distance = (self.center.y - ray.origin.y) / ray.direction.y;
        if distance < 0.0 {
            return None;
        }
        let point = ray.at(distance);
        self.within_boundary(point).then(|| SurfaceHit {
            point,
            normal: self.normal(),
            distance,
            alignment: self.alignment,
        })
    }
}

/// Collection of detected planes answering AR raycasts.
#[derive(Debug, Clone, Default)]
pub struct PlaneSet {
    planes: Vec<DetectedPlane>,
}

impl PlaneSet {
    /// Creates a set from already detected planes.
    #[must_use]
    pub const fn new(planes: Vec<DetectedPlane>) -> Self {
        Self { planes }
    }

    /// Adds a newly detected plane.
    pub fn add(&mut self, plane: DetectedPlane) {
        self.planes.push(plane);
    }

    /// Number of planes detected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    /// Whether no plane has been detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    fn nearest(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.planes
            .iter()
            .filter_map(|plane| plane.raycast(ray))
            .min_by_key(|hit| OrderedFloat(hit.distance))
    }
}

impl PlaneRaycaster for PlaneSet {
    fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.nearest(ray)
    }
}

// Planes belong to the room, never to an item, so nothing is ignored.
impl ColliderRaycaster for PlaneSet {
    fn raycast(
        &self,
        ray: &Ray,
        max_distance: f32,
        _ignore: Option<Entity>,
    ) -> Option<SurfaceHit> {
        self.nearest(ray).filter(|hit| hit.distance <= max_distance)
    }
}

/// Box colliders answering physics raycasts.
///
/// Room geometry has no owner; boxes added with [`ColliderSet::add_owned`]
/// belong to an entity and are skipped by queries made for that entity.
#[derive(Debug, Clone, Default)]
pub struct ColliderSet {
    boxes: Vec<(Option<Entity>, Aabb)>,
}

impl ColliderSet {
    /// Creates a set from world-space room boxes.
    #[must_use]
    pub fn new(boxes: Vec<Aabb>) -> Self {
        Self {
            boxes: boxes.into_iter().map(|aabb| (None, aabb)).collect(),
        }
    }

    /// Adds a world-space room box.
    pub fn add(&mut self, aabb: Aabb) {
        self.boxes.push((None, aabb));
    }

    /// Adds a world-space box belonging to `owner`.
    pub fn add_owned(&mut self, owner: Entity, aabb: Aabb) {
        self.boxes.push((Some(owner), aabb));
    }
}

/// Outward normal of the box face containing `point`.
fn face_normal(aabb: &Aabb, point: Vec3) -> Vec3 {
    let relative = (point - aabb.center) / aabb.half_extents.max(Vec3::splat(f32::EPSILON));
    let magnitude = relative.abs();
    if magnitude.y >= magnitude.x && magnitude.y >= magnitude.z {
        Vec3::Y * relative.y.signum()
    } else if magnitude.x >= magnitude.z {
        Vec3::X * relative.x.signum()
    } else {
        Vec3::Z * relative.z.signum()
    }
}

impl ColliderRaycaster for ColliderSet {
    fn raycast(
        &self,
        ray: &Ray,
        max_distance: f32,
        ignore: Option<Entity>,
    ) -> Option<SurfaceHit> {
        self.boxes
            .iter()
            .filter(|(owner, _)| ignore.is_none() || *owner != ignore)
            .filter_map(|(_, aabb)| {
                aabb.ray_distance(ray, max_distance).map(|distance| {
                    let point = ray.at(distance);
                    let normal = face_normal(aabb, point);
                    SurfaceHit {
                        point,
                        normal,
                        distance,
                        alignment: PlaneAlignment::from_normal(normal),
                    }
                })
            })
            .min_by_key(|hit| OrderedFloat(hit.distance))
    }
}
