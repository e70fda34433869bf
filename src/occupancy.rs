//! Occupancy check run before a new item is placed.
//!
//! Every placed item carries a [`Footprint`]: its collider box in local
//! space, or a radius when the catalog gives it no collider. A candidate
//! placement is accepted only when its own volume overlaps none of the placed
//! volumes. The check is a linear scan; rooms hold tens of items, not
//! thousands.
//!
//! The check only runs at spawn time. Items dragged afterwards may overlap.

use bevy_ecs::prelude::{Component, Entity, Resource};
use bevy_transform::components::Transform;
use glam::Vec3;
use log::debug;

use crate::catalog::FurnitureItem;
use crate::geometry::{Aabb, Ray, Sphere};
use crate::FALLBACK_OCCUPANCY_RADIUS;

/// Occupancy configuration.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OccupancySettings {
    /// Radius used for items without a collider.
    pub fallback_radius: f32,
}

impl Default for OccupancySettings {
    fn default() -> Self {
        Self {
            fallback_radius: FALLBACK_OCCUPANCY_RADIUS,
        }
    }
}

/// Space an item occupies, relative to its origin.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Footprint {
    /// Collider box in item-local space.
    Collider(Aabb),
    /// Approximation used when no collider is known.
    Radius(f32),
}

impl Footprint {
    /// Footprint for a catalog item, falling back to the configured radius.
    #[must_use]
    pub fn for_item(item: &FurnitureItem, settings: &OccupancySettings) -> Self {
        item.collider.map_or(Self::Radius(settings.fallback_radius), |collider| {
            Self::Collider(collider.local_bounds())
        })
    }

    /// World-space volume of an item with this footprint at `transform`.
    #[must_use]
    pub fn world_volume(&self, transform: &Transform) -> Volume {
        match *self {
            Self::Collider(local) => Volume::Box(local.transformed(
                transform.translation,
                transform.rotation,
                transform.scale,
            )),
            Self::Radius(radius) => Volume::Sphere(Sphere::new(
                transform.translation,
                radius * transform.scale.abs().max_element(),
            )),
        }
    }

    /// World-space volume of an unrotated, unscaled item at `position`.
    ///
    /// The collider's local centre offset is preserved.
    #[must_use]
    pub fn volume_at(&self, position: Vec3) -> Volume {
        self.world_volume(&Transform::from_translation(position))
    }
}

/// World-space bounding volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Volume {
    /// Axis-aligned box.
    Box(Aabb),
    /// Sphere.
    Sphere(Sphere),
}

impl Volume {
    /// Whether two volumes overlap. Touching volumes do not.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Box(a), Self::Box(b)) => a.intersects(b),
            (Self::Sphere(a), Self::Sphere(b)) => a.intersects(b),
            (Self::Box(aabb), Self::Sphere(sphere)) | (Self::Sphere(sphere), Self::Box(aabb)) => {
                sphere.intersects_aabb(aabb)
            }
        }
    }

    /// Distance along `ray` to the volume, if hit within `max_distance`.
    #[must_use]
    pub fn ray_distance(&self, ray: &Ray, max_distance: f32) -> Option<f32> {
        match self {
            Self::Box(aabb) => aabb.ray_distance(ray, max_distance),
            Self::Sphere(sphere) => sphere.ray_distance(ray, max_distance),
        }
    }
}

/// Outcome of an occupancy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementCheck {
    /// Nothing overlaps the candidate.
    Clear,
    /// The candidate overlaps this placed item.
    Blocked(Entity),
}

impl PlacementCheck {
    /// Whether the placement may go ahead.
    #[must_use]
    pub const fn is_clear(self) -> bool {
        matches!(self, Self::Clear)
    }
}

/// Checks `candidate` against every placed volume, stopping at the first
/// overlap.
///
/// # Examples
/// ```
/// use bevy_ecs::entity::Entity;
/// use glam::Vec3;
/// use furnish::geometry::Sphere;
/// use furnish::occupancy::{check_placement, PlacementCheck, Volume};
///
/// let placed = [(Entity::PLACEHOLDER, Volume::Sphere(Sphere::new(Vec3::ZERO, 1.0)))];
/// let near = Volume::Sphere(Sphere::new(Vec3::new(0.5, 0.0, 0.0), 1.0));
/// let far = Volume::Sphere(Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0));
/// assert_eq!(check_placement(&near, placed), PlacementCheck::Blocked(Entity::PLACEHOLDER));
/// assert!(check_placement(&far, placed).is_clear());
/// ```
pub fn check_placement(
    candidate: &Volume,
    placed: impl IntoIterator<Item = (Entity, Volume)>,
) -> PlacementCheck {
    placed
        .into_iter()
        .find(|(_, volume)| candidate.intersects(volume))
        .map_or(PlacementCheck::Clear, |(entity, _)| {
            debug!("placement blocked by {entity:?}");
            PlacementCheck::Blocked(entity)
        })
}
