//! Scalar helpers for frame-rate dependent smoothing.
//!
//! Both the surface tracker and the plane constraint interpolate a single
//! height toward a target using `speed * delta` as the blend factor, clamped
//! into `[0, 1]` so a long frame never overshoots.

/// Blend factor for one frame of exponential smoothing.
///
/// Non-finite or negative inputs yield `0.0`, leaving the value untouched.
///
/// # Examples
/// ```
/// use furnish::numeric::smoothing_factor;
/// assert!((smoothing_factor(10.0, 0.05) - 0.5).abs() < f32::EPSILON);
/// assert_eq!(smoothing_factor(10.0, 1.0), 1.0);
/// assert_eq!(smoothing_factor(f32::NAN, 0.1), 0.0);
/// ```
#[must_use]
pub fn smoothing_factor(speed: f32, delta_secs: f32) -> f32 {
    let raw = speed * delta_secs;
    if !raw.is_finite() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}

/// Moves `current` toward `target` by `factor` of the remaining gap.
///
/// # Examples
/// ```
/// use furnish::numeric::approach;
/// assert!((approach(0.0, 1.0, 0.25) - 0.25).abs() < f32::EPSILON);
/// assert!((approach(2.0, 1.0, 1.0) - 1.0).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}
