//! Pose derivatives: world pose assembly and numeric differentiation
//!
//! The tracker reports the marker's world transform; the controller's
//! physical origin sits at a fixed offset and rotation from the marker.
//! Acceleration and angular velocity are second/first differences across
//! frames, which makes them sensitive to the clock: both stages skip
//! differentiation for any cycle whose elapsed time is under
//! [`MIN_DELTA_TIME`], because dividing a position delta by a near-zero
//! dt squared turns tracker jitter into enormous spikes.
//!
//! Angular velocity is an Euler-angle difference, so orientations near a
//! gimbal pole or wrapping across the 180-degree seam can produce a
//! one-cycle artifact; consumers smoothing gyro data should clamp
//! outliers.

use glam::{EulerRot, Quat, Vec3};

/// Standard gravity as reported in the acceleration signal, m/s^2.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);

/// Elapsed-time floor below which differentiation is skipped for the cycle.
pub const MIN_DELTA_TIME: f32 = 1e-4;

/// Previous-frame pose retained for differentiation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseHistory {
    /// World position of the previous cycle.
    pub position: Vec3,
    /// World orientation of the previous cycle.
    pub orientation: Quat,
}

impl PoseHistory {
    /// History at the world origin with identity orientation.
    pub const fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Default for PoseHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Carry the tracked marker's world transform onto the controller origin.
///
/// `local_offset` and `local_rotation` are the controller's physical origin
/// relative to the marker, applied through the marker's world transform.
#[inline]
pub fn world_pose(
    tracked_position: Vec3,
    tracked_rotation: Quat,
    local_offset: Vec3,
    local_rotation: Quat,
) -> (Vec3, Quat) {
    let position = tracked_rotation * local_offset + tracked_position;
    let orientation = tracked_rotation * local_rotation;
    (position, orientation)
}

/// Linear acceleration from a second difference of position.
///
/// Gravity plus `(position - previous) / dt^2`. Commits `position` as the
/// new history. Below the dt floor the gravity term alone is reported and
/// the history still advances, so the next valid cycle differentiates
/// against fresh data.
#[inline]
pub fn derive_accel(history: &mut PoseHistory, position: Vec3, dt: f32) -> Vec3 {
    let accel = if dt < MIN_DELTA_TIME {
        GRAVITY
    } else {
        GRAVITY + (position - history.position) / (dt * dt)
    };
    history.position = position;
    accel
}

/// Angular velocity from a per-axis Euler-angle difference, rad/s.
///
/// Commits `orientation` as the new history. Below the dt floor the
/// reported velocity is zero and the history still advances.
#[inline]
pub fn derive_gyro(history: &mut PoseHistory, orientation: Quat, dt: f32) -> Vec3 {
    let gyro = if dt < MIN_DELTA_TIME {
        Vec3::ZERO
    } else {
        let (cy, cx, cz) = orientation.to_euler(EulerRot::YXZ);
        let (py, px, pz) = history.orientation.to_euler(EulerRot::YXZ);
        Vec3::new(cx - px, cy - py, cz - pz) / dt
    };
    history.orientation = orientation;
    gyro
}
