//! Keeps placed furniture resting on the real surface beneath it.
//!
//! A [`SurfaceTracker`] polls on a fixed interval rather than every frame.
//! Each poll projects the object into the camera view. When the object is on
//! screen, the AR plane service is queried along the camera ray through it.
//! Otherwise, or when that query misses, a collider ray is cast straight down
//! from just above the object, ignoring the object's own collider. The hit
//! height plus a small offset becomes the
//! target height, unless the hit lies implausibly far away. The object then
//! moves vertically toward the target while its X/Z position stays under
//! external control.
//!
//! Without an AR plane service the tracker switches itself off for good.

use bevy_ecs::prelude::{Component, Entity, Query, Res, Resource};
use bevy_time::Time;
use bevy_transform::components::Transform;
use glam::Vec3;
use log::{debug, warn};

use crate::camera::ViewCamera;
use crate::geometry::Ray;
use crate::numeric::{approach, smoothing_factor};
use crate::surface::SurfaceServices;
use crate::vector_math::with_height;
use crate::{
    FALLBACK_RAY_LIFT, MAX_TRACKING_DISTANCE, MIN_TRACKING_INTERVAL_SECS, SURFACE_OFFSET,
    TRACKING_INTERVAL_SECS, TRANSITION_SPEED,
};

/// Surface tracking configuration applied to newly placed items.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SurfaceTrackerSettings {
    /// Seconds between polls.
    pub tracking_interval: f32,
    /// Readings further than this from the object are ignored.
    pub max_tracking_distance: f32,
    /// Gap kept between the surface and the object.
    pub surface_offset: f32,
    /// Whether heights are approached smoothly or applied at once.
    pub smooth_transition: bool,
    /// Smoothing rate per second.
    pub transition_speed: f32,
}

impl Default for SurfaceTrackerSettings {
    fn default() -> Self {
        Self {
            tracking_interval: TRACKING_INTERVAL_SECS,
            max_tracking_distance: MAX_TRACKING_DISTANCE,
            surface_offset: SURFACE_OFFSET,
            smooth_transition: true,
            transition_speed: TRANSITION_SPEED,
        }
    }
}

/// Lifecycle of a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerStatus {
    /// Not yet updated.
    Pending,
    /// Polling normally.
    Active,
    /// No AR plane service was available; the tracker never polls again.
    Unavailable,
}

/// Timing of the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    /// Seconds since startup.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
}

impl From<&Time> for FrameClock {
    fn from(time: &Time) -> Self {
        Self {
            elapsed: time.elapsed_secs(),
            delta: time.delta_secs(),
        }
    }
}

/// Per-object surface tracking state.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SurfaceTracker {
    settings: SurfaceTrackerSettings,
    status: TrackerStatus,
    enabled: bool,
    last_poll: Option<f32>,
    target_height: f32,
    has_valid_target: bool,
    last_good_position: Vec3,
}

impl Default for SurfaceTracker {
    fn default() -> Self {
        Self::new(SurfaceTrackerSettings::default())
    }
}

impl SurfaceTracker {
    /// Creates an enabled tracker that polls on its first update.
    #[must_use]
    pub fn new(settings: SurfaceTrackerSettings) -> Self {
        let mut tracker = Self {
            settings,
            status: TrackerStatus::Pending,
            enabled: true,
            last_poll: None,
            target_height: 0.0,
            has_valid_target: false,
            last_good_position: Vec3::ZERO,
        };
        tracker.set_tracking_interval(tracker.settings.tracking_interval);
        tracker
    }

    /// Current configuration.
    #[must_use]
    pub const fn settings(&self) -> &SurfaceTrackerSettings {
        &self.settings
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn status(&self) -> TrackerStatus {
        self.status
    }

    /// Whether polling is switched on.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Height the object is moving toward, once a surface has been found.
    #[must_use]
    pub const fn target_height(&self) -> Option<f32> {
        if self.has_valid_target {
            Some(self.target_height)
        } else {
            None
        }
    }

    /// Last position at which a surface reading was accepted.
    #[must_use]
    pub const fn last_good_position(&self) -> Vec3 {
        self.last_good_position
    }

    /// Switches polling on or off. Has no effect once unavailable.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        debug!(
            "surface tracking {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Changes the polling interval, never going below
    /// [`MIN_TRACKING_INTERVAL_SECS`].
    pub fn set_tracking_interval(&mut self, seconds: f32) {
        self.settings.tracking_interval = seconds.max(MIN_TRACKING_INTERVAL_SECS);
    }

    /// Makes the next update poll regardless of the interval.
    pub fn force_update(&mut self) {
        self.last_poll = None;
    }

    /// Runs one frame of tracking for `entity` and returns its new position.
    ///
    /// The returned position always keeps the X/Z of `position`.
    pub fn update(
        &mut self,
        entity: Entity,
        position: Vec3,
        clock: FrameClock,
        camera: &ViewCamera,
        services: &SurfaceServices,
    ) -> Vec3 {
        if !self.enabled || self.status == TrackerStatus::Unavailable {
            return position;
        }
        if self.status == TrackerStatus::Pending && !self.activate(position, services) {
            return position;
        }
        if self
            .last_poll
            .is_some_and(|last| clock.elapsed - last < self.settings.tracking_interval)
        {
            return position;
        }
        self.last_poll = Some(clock.elapsed);

        let mut next = position;
        if let Some(height) = self.sample_surface(entity, position, camera, services) {
            self.target_height = height;
            self.has_valid_target = true;
            self.last_good_position = with_height(position, height);
            if !self.settings.smooth_transition {
                next = with_height(position, height);
            }
        }
        if self.settings.smooth_transition && self.has_valid_target {
            let factor = smoothing_factor(self.settings.transition_speed, clock.delta);
            next = with_height(next, approach(next.y, self.target_height, factor));
        }
        next
    }

    fn activate(&mut self, position: Vec3, services: &SurfaceServices) -> bool {
        if !services.has_plane_service() {
            warn!("no AR plane service available; surface tracking disabled");
            self.status = TrackerStatus::Unavailable;
            self.enabled = false;
            return false;
        }
        self.status = TrackerStatus::Active;
        self.target_height = position.y;
        self.has_valid_target = true;
        self.last_good_position = position;
        debug!("surface tracker initialised at {position}");
        true
    }

    fn accept(&self, position: Vec3, candidate: Vec3) -> Option<f32> {
        (position.distance(candidate) < self.settings.max_tracking_distance).then_some(candidate.y)
    }

    fn sample_surface(
        &self,
        entity: Entity,
        position: Vec3,
        camera: &ViewCamera,
        services: &SurfaceServices,
    ) -> Option<f32> {
        let lift = Vec3::Y * self.settings.surface_offset;
        let projected = camera.world_to_screen(position);
        if camera.is_on_screen(projected) {
            let ray = camera.screen_ray(projected.truncate());
            if let Some(hit) = services.raycast_planes(&ray) {
                return self.accept(position, hit.point + lift);
            }
        }
        let ray = Ray::downward(position + Vec3::Y * FALLBACK_RAY_LIFT);
        services
            .raycast_colliders(&ray, self.settings.max_tracking_distance, Some(entity))
            .and_then(|hit| self.accept(position, with_height(position, hit.point.y) + lift))
    }
}

/// Advances every [`SurfaceTracker`] by one frame.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn track_surfaces_system(
    time: Res<Time>,
    camera: Res<ViewCamera>,
    services: Res<SurfaceServices>,
    mut tracked: Query<(Entity, &mut Transform, &mut SurfaceTracker)>,
) {
    let clock = FrameClock::from(&*time);
    for (entity, mut transform, mut tracker) in &mut tracked {
        let was_pending = tracker.status() == TrackerStatus::Pending;
        let next = tracker.update(entity, transform.translation, clock, &camera, &services);
        if was_pending && tracker.status() == TrackerStatus::Unavailable {
            debug!("surface tracker on {entity:?} switched off");
        }
        if next != transform.translation {
            transform.translation = next;
        }
    }
}
