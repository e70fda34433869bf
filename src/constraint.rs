//! Pins an object's height to a recorded baseline.
//!
//! Grab manipulation moves furniture in all three axes; the constraint pulls
//! the height back so dragging stays flat against the virtual floor. The
//! baseline is recorded on the first update and may be changed explicitly.

use bevy_ecs::prelude::{Component, Entity, Query, Res, Resource};
use bevy_time::Time;
use bevy_transform::components::Transform;
use glam::Vec3;
use log::debug;

use crate::numeric::{approach, smoothing_factor};
use crate::vector_math::with_height;
use crate::{BASELINE_TOLERANCE, CORRECTION_LOG_DISTANCE, CORRECTION_SPEED};

/// Plane constraint configuration applied to newly placed items.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlaneConstraintSettings {
    /// Whether drift is corrected smoothly or at once.
    pub smooth_correction: bool,
    /// Correction rate per second.
    pub correction_speed: f32,
    /// Drift tolerated before correcting.
    pub tolerance: f32,
}

impl Default for PlaneConstraintSettings {
    fn default() -> Self {
        Self {
            smooth_correction: true,
            correction_speed: CORRECTION_SPEED,
            tolerance: BASELINE_TOLERANCE,
        }
    }
}

/// Whether a baseline has been recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintState {
    /// Waiting for the first update.
    Uninitialized,
    /// Correcting toward `baseline`.
    Initialized {
        /// Height the object is held at.
        baseline: f32,
    },
}

/// Per-object plane constraint.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlaneConstraint {
    settings: PlaneConstraintSettings,
    state: ConstraintState,
    enabled: bool,
    last_position: Option<Vec3>,
}

impl Default for PlaneConstraint {
    fn default() -> Self {
        Self::new(PlaneConstraintSettings::default())
    }
}

impl PlaneConstraint {
    /// Creates an enabled, uninitialised constraint.
    #[must_use]
    pub const fn new(settings: PlaneConstraintSettings) -> Self {
        Self {
            settings,
            state: ConstraintState::Uninitialized,
            enabled: true,
            last_position: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ConstraintState {
        self.state
    }

    /// Recorded baseline, if any.
    #[must_use]
    pub const fn baseline(&self) -> Option<f32> {
        match self.state {
            ConstraintState::Initialized { baseline } => Some(baseline),
            ConstraintState::Uninitialized => None,
        }
    }

    /// Whether correction is switched on.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switches correction on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        debug!(
            "plane constraint {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Records the height of `position` as the baseline.
    pub fn update_baseline(&mut self, position: Vec3) {
        self.state = ConstraintState::Initialized {
            baseline: position.y,
        };
        debug!("plane constraint baseline updated to {:.3}", position.y);
    }

    /// Sets an explicit baseline and returns `position` moved onto it.
    #[must_use]
    pub fn set_baseline(&mut self, height: f32, position: Vec3) -> Vec3 {
        self.state = ConstraintState::Initialized { baseline: height };
        debug!("plane constraint baseline set to {height:.3}");
        with_height(position, height)
    }

    /// Returns `position` moved onto the baseline, or unchanged before one
    /// has been recorded.
    #[must_use]
    pub fn reset_to_baseline(&self, position: Vec3) -> Vec3 {
        self.baseline()
            .map_or(position, |baseline| with_height(position, baseline))
    }

    /// Runs one frame of correction and returns the object's new position.
    pub fn update(&mut self, position: Vec3, delta_secs: f32) -> Vec3 {
        if !self.enabled {
            return position;
        }
        let ConstraintState::Initialized { baseline } = self.state else {
            self.update_baseline(position);
            self.last_position = Some(position);
            return position;
        };

        let mut next = position;
        if (position.y - baseline).abs() > self.settings.tolerance {
            next = if self.settings.smooth_correction {
                let factor = smoothing_factor(self.settings.correction_speed, delta_secs);
                with_height(position, approach(position.y, baseline, factor))
            } else {
                with_height(position, baseline)
            };
            if self
                .last_position
                .is_some_and(|last| position.distance(last) > CORRECTION_LOG_DISTANCE)
            {
                debug!(
                    "corrected height from {:.2} toward baseline {baseline:.2}",
                    position.y
                );
            }
        }
        self.last_position = Some(next);
        next
    }
}

/// Applies every enabled [`PlaneConstraint`] for one frame.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn constrain_to_plane_system(
    time: Res<Time>,
    mut constrained: Query<(Entity, &mut Transform, &mut PlaneConstraint)>,
) {
    let delta = time.delta_secs();
    for (entity, mut transform, mut constraint) in &mut constrained {
        let next = constraint.update(transform.translation, delta);
        if next != transform.translation {
            debug!("plane constraint moved {entity:?} to height {:.3}", next.y);
            transform.translation = next;
        }
    }
}
