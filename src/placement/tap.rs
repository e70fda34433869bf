//! Turning a screen tap into a selection or a new piece of furniture.
//!
//! A tap first looks for placed furniture under the finger. Only when none is
//! hit, and a catalog item is selected, does it look for a surface to place
//! on. The AR plane service answers that query when installed; otherwise the
//! static colliders do. The occupancy check gets the final word.
//!
//! Spawns made by an observer land only when the world next applies its
//! command queue. Until then they are kept in [`PendingPlacements`], so a
//! second tap arriving first still picks and blocks on them.

use bevy_ecs::entity::Entities;
use bevy_ecs::prelude::{Commands, Entity, On, Query, Res, ResMut, Resource};
use bevy_ecs::system::SystemParam;
use bevy_transform::components::Transform;
use glam::{Vec2, Vec3};
use log::{debug, info, warn};
use ordered_float::OrderedFloat;

use super::events::{FurnitureSpawned, ObjectSelected, PlacementRejected, RejectReason, Tap};
use super::settings::{FurnitureSettings, VerticalMode};
use crate::camera::ViewCamera;
use crate::catalog::FurnitureCatalog;
use crate::components::{Furniture, Tint};
use crate::constraint::{PlaneConstraint, PlaneConstraintSettings};
use crate::geometry::Ray;
use crate::occupancy::{check_placement, Footprint, OccupancySettings, PlacementCheck, Volume};
use crate::session::SessionState;
use crate::surface::{SurfaceHit, SurfaceServices};
use crate::tracking::{SurfaceTracker, SurfaceTrackerSettings};
use crate::MAX_TAP_DISTANCE;

/// What a tap resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    /// The tap hit placed furniture.
    Select {
        /// Furniture under the tap.
        entity: Entity,
        /// Catalog item it was made from.
        catalog_index: usize,
    },
    /// The selected item may be placed here.
    Place {
        /// Catalog item to spawn.
        catalog_index: usize,
        /// Surface point that was hit.
        position: Vec3,
    },
    /// The selected item cannot be placed.
    Rejected {
        /// Catalog item that would have been spawned.
        catalog_index: usize,
        /// Why not.
        reason: RejectReason,
    },
    /// Nothing was hit and no catalog item is selected.
    Ignored,
}

/// Nearest volume hit by `ray`.
#[must_use]
pub fn pick_nearest(
    ray: &Ray,
    volumes: impl IntoIterator<Item = (Entity, Volume)>,
) -> Option<Entity> {
    volumes
        .into_iter()
        .filter_map(|(entity, volume)| {
            volume
                .ray_distance(ray, MAX_TAP_DISTANCE)
                .map(|distance| (entity, distance))
        })
        .min_by_key(|&(_, distance)| OrderedFloat(distance))
        .map(|(entity, _)| entity)
}

/// Surface a tap ray lands on.
///
/// With an AR plane service only detected planes count; without one the
/// static colliders are used.
#[must_use]
pub fn find_surface(ray: &Ray, services: &SurfaceServices) -> Option<SurfaceHit> {
    if services.has_plane_service() {
        services.raycast_planes(ray)
    } else {
        services.raycast_colliders(ray, MAX_TAP_DISTANCE, None)
    }
}

/// A tap-spawned item whose spawn command has not been applied yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPlacement {
    /// Reserved entity.
    pub entity: Entity,
    /// Catalog item being spawned.
    pub catalog_index: usize,
    /// World volume it will occupy.
    pub volume: Volume,
}

/// Tap spawns that queries cannot see yet.
#[derive(Resource, Debug, Default)]
pub struct PendingPlacements(Vec<PendingPlacement>);

impl PendingPlacements {
    /// Items still waiting to be spawned.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &PendingPlacement> {
        self.0.iter()
    }

    fn find(&self, entity: Entity) -> Option<&PendingPlacement> {
        self.0.iter().find(|pending| pending.entity == entity)
    }
}

/// Everything the tap handler reads from the world.
#[derive(SystemParam)]
pub struct PlacementContext<'w, 's> {
    /// Viewpoint taps are cast from.
    pub camera: Res<'w, ViewCamera>,
    /// Plane and collider raycasting.
    pub services: Res<'w, SurfaceServices>,
    /// Items that can be placed.
    pub catalog: Res<'w, FurnitureCatalog>,
    /// Occupancy configuration.
    pub occupancy: Res<'w, OccupancySettings>,
    /// Placement configuration.
    pub settings: Res<'w, FurnitureSettings>,
    /// Tracker configuration for new items.
    pub tracker: Res<'w, SurfaceTrackerSettings>,
    /// Constraint configuration for new items.
    pub constraint: Res<'w, PlaneConstraintSettings>,
    /// Furniture already in the room.
    pub placed: Query<'w, 's, (Entity, &'static Transform, &'static Footprint, &'static Furniture)>,
    /// Spawns queued by earlier taps.
    pub pending: ResMut<'w, PendingPlacements>,
    /// Entity allocator, used to drop pending spawns that were cancelled.
    pub entities: &'w Entities,
}

impl PlacementContext<'_, '_> {
    /// World volumes of all placed furniture, including queued spawns.
    #[must_use]
    pub fn placed_volumes(&self) -> impl Iterator<Item = (Entity, Volume)> + '_ {
        self.placed
            .iter()
            .map(|(entity, transform, footprint, _)| (entity, footprint.world_volume(transform)))
            .chain(self.pending.iter().map(|pending| (pending.entity, pending.volume)))
    }

    /// Forgets pending spawns that have landed or were despawned unapplied.
    pub fn settle_pending(&mut self) {
        let placed = &self.placed;
        let entities = self.entities;
        self.pending.0.retain(|pending| {
            !placed.contains(pending.entity) && entities.contains(pending.entity)
        });
    }

    fn catalog_index_of(&self, entity: Entity) -> Option<usize> {
        self.placed
            .get(entity)
            .map(|(_, _, _, furniture)| furniture.catalog_index)
            .ok()
            .or_else(|| self.pending.find(entity).map(|pending| pending.catalog_index))
    }

    /// Works out what a tap at `screen` should do.
    #[must_use]
    pub fn resolve(&self, screen: Vec2, selected_item: Option<usize>) -> TapOutcome {
        let ray = self.camera.screen_ray(screen);
        if let Some(entity) = pick_nearest(&ray, self.placed_volumes()) {
            if let Some(catalog_index) = self.catalog_index_of(entity) {
                return TapOutcome::Select {
                    entity,
                    catalog_index,
                };
            }
        }

        let Some(catalog_index) = selected_item else {
            return TapOutcome::Ignored;
        };
        let Some(item) = self.catalog.get(catalog_index) else {
            warn!("selected catalog index {catalog_index} is no longer in the catalog");
            return TapOutcome::Ignored;
        };
        let Some(hit) = find_surface(&ray, &self.services) else {
            return TapOutcome::Rejected {
                catalog_index,
                reason: RejectReason::NoSurface,
            };
        };

        let candidate = Footprint::for_item(item, &self.occupancy).volume_at(hit.point);
        match check_placement(&candidate, self.placed_volumes()) {
            PlacementCheck::Clear => TapOutcome::Place {
                catalog_index,
                position: hit.point,
            },
            PlacementCheck::Blocked(blocked_by) => TapOutcome::Rejected {
                catalog_index,
                reason: RejectReason::Occupied {
                    position: hit.point,
                    blocked_by,
                },
            },
        }
    }

    /// Queues a spawn of catalog item `catalog_index` at `position` and
    /// records it as pending.
    ///
    /// Returns `None` when the index is not in the catalog.
    pub fn spawn(
        &mut self,
        commands: &mut Commands,
        catalog_index: usize,
        position: Vec3,
    ) -> Option<Entity> {
        let item = self.catalog.get(catalog_index)?;
        let footprint = Footprint::for_item(item, &self.occupancy);
        let volume = footprint.volume_at(position);
        let mut entity = commands.spawn((
            Furniture { catalog_index },
            Transform::from_translation(position),
            footprint,
            Tint(item.default_color()),
        ));
        match self.settings.vertical_mode {
            VerticalMode::SurfaceTracking => {
                entity.insert(SurfaceTracker::new(self.tracker.clone()));
            }
            VerticalMode::PlaneConstraint => {
                entity.insert(PlaneConstraint::new(self.constraint.clone()));
            }
            VerticalMode::Free => {}
        }
        let entity = entity.id();
        self.pending.0.push(PendingPlacement {
            entity,
            catalog_index,
            volume,
        });
        info!("placed {} at {position}", item.name);
        Some(entity)
    }
}

/// Observer resolving [`Tap`] events.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub(crate) fn handle_tap(
    tap: On<Tap>,
    mut commands: Commands,
    mut session: ResMut<SessionState>,
    mut context: PlacementContext,
) {
    context.settle_pending();
    match context.resolve(tap.event().screen, session.selected_item()) {
        TapOutcome::Select {
            entity,
            catalog_index,
        } => {
            debug!("tap selected {entity:?}");
            session.select_object(entity, catalog_index);
            commands.trigger(ObjectSelected {
                entity,
                catalog_index,
            });
        }
        TapOutcome::Place {
            catalog_index,
            position,
        } => {
            if let Some(entity) = context.spawn(&mut commands, catalog_index, position) {
                session.select_object(entity, catalog_index);
                commands.trigger(FurnitureSpawned {
                    entity,
                    catalog_index,
                    position,
                });
            }
        }
        TapOutcome::Rejected {
            catalog_index,
            reason,
        } => {
            info!("placement of catalog item {catalog_index} rejected: {reason:?}");
            commands.trigger(PlacementRejected {
                catalog_index,
                reason,
            });
        }
        TapOutcome::Ignored => debug!("tap hit nothing and no item is selected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Aabb, Sphere};
    use crate::planes::{ColliderSet, DetectedPlane, PlaneSet};
    use bevy_ecs::world::World;
    use rstest::{fixture, rstest};

    #[fixture]
    fn entities() -> (Entity, Entity) {
        let mut world = World::new();
        (world.spawn_empty().id(), world.spawn_empty().id())
    }

    #[rstest]
    fn nearest_volume_wins(entities: (Entity, Entity)) {
        let (near, far) = entities;
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let volumes = [
            (far, Volume::Sphere(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5))),
            (near, Volume::Sphere(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5))),
        ];
        assert_eq!(pick_nearest(&ray, volumes), Some(near));
    }

    #[rstest]
    fn missed_volumes_pick_nothing(entities: (Entity, Entity)) {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let volumes = [(
            entities.0,
            Volume::Box(Aabb::from_center_size(Vec3::new(3.0, 0.0, -2.0), Vec3::ONE)),
        )];
        assert_eq!(pick_nearest(&ray, volumes), None);
    }

    #[test]
    fn plane_service_takes_precedence_over_colliders() {
        let services = SurfaceServices::default()
            .with_planes(PlaneSet::new(vec![DetectedPlane::floor(
                Vec3::new(0.0, 0.3, 0.0),
                Vec2::splat(4.0),
            )]))
            .with_colliders(ColliderSet::new(vec![Aabb::from_center_size(
                Vec3::new(0.0, -0.5, 0.0),
                Vec3::new(10.0, 1.0, 10.0),
            )]));
        let hit = find_surface(&Ray::downward(Vec3::new(0.0, 2.0, 0.0)), &services)
            .expect("plane below the ray");
        assert!((hit.point.y - 0.3).abs() < 1e-5);
    }

    #[test]
    fn colliders_answer_without_plane_service() {
        let services = SurfaceServices::default().with_colliders(ColliderSet::new(vec![
            Aabb::from_center_size(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 1.0, 10.0)),
        ]));
        let hit = find_surface(&Ray::downward(Vec3::new(1.0, 2.0, 1.0)), &services)
            .expect("collider below the ray");
        assert!(hit.point.y.abs() < 1e-5);
    }

    #[test]
    fn nothing_installed_finds_nothing() {
        let ray = Ray::downward(Vec3::Y);
        assert!(find_surface(&ray, &SurfaceServices::default()).is_none());
    }
}
