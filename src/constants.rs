//! Tuning constants shared by the tracking, constraint and placement systems.
//!
//! Distances are in metres and times in seconds. The settings resources use
//! these values for their `Default` implementations.

/// Seconds between two surface polls of a tracked object.
pub const TRACKING_INTERVAL_SECS: f32 = 0.1;
/// Lower bound accepted by `SurfaceTracker::set_tracking_interval`.
pub const MIN_TRACKING_INTERVAL_SECS: f32 = 0.05;
/// Readings further than this from the current position are treated as
/// tracking glitches and ignored.
pub const MAX_TRACKING_DISTANCE: f32 = 2.0;
/// Gap left between a surface and the object resting on it.
pub const SURFACE_OFFSET: f32 = 0.01;
/// Rate used for exponential height smoothing, per second.
pub const TRANSITION_SPEED: f32 = 10.0;
/// Height above the object from which the downward fallback ray starts.
pub const FALLBACK_RAY_LIFT: f32 = 0.1;

/// Drift tolerated by the plane constraint before it corrects.
pub const BASELINE_TOLERANCE: f32 = 0.01;
/// Rate used for exponential baseline correction, per second.
pub const CORRECTION_SPEED: f32 = 10.0;
/// Corrections moving an object further than this in one tick are logged.
pub const CORRECTION_LOG_DISTANCE: f32 = 0.1;

/// Radius of the sphere used when an item has no collider.
pub const FALLBACK_OCCUPANCY_RADIUS: f32 = 0.3;

/// Smallest uniform scale a placed item may be given.
pub const MIN_ITEM_SCALE: f32 = 0.1;
/// Largest uniform scale a placed item may be given.
pub const MAX_ITEM_SCALE: f32 = 5.0;

/// Longest camera ray followed when picking furniture or placing on colliders.
pub const MAX_TAP_DISTANCE: f32 = 50.0;
