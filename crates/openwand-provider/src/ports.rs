//! Port traits separating the provider from platform infrastructure
//!
//! The provider consumes three capabilities: named analog axes from the
//! platform input layer, a tracked rigid-body pose, and the wall-clock
//! delta between polling cycles. All three are cheap synchronous queries;
//! `read_state` calls them while holding its per-instance lock, so
//! implementations must not block.

use glam::{Quat, Vec3};

/// Platform input layer: joystick enumeration and named analog axes.
pub trait JoystickInput {
    /// Names of the joysticks currently connected.
    fn joystick_names(&self) -> Vec<String>;

    /// Current value of a named analog axis.
    ///
    /// Unknown or unconfigured names must return a stable default of 0.0,
    /// never an error.
    fn axis(&self, name: &str) -> f32;

    /// Whether a joystick with the given name is connected.
    fn is_connected(&self, name: &str) -> bool {
        self.joystick_names().iter().any(|n| n == name)
    }
}

/// World transform of the tracked marker the controller is mounted on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPose {
    /// Marker position in world space, meters.
    pub position: Vec3,
    /// Marker orientation in world space.
    pub rotation: Quat,
}

impl Default for TrackedPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// External optical/marker tracker.
pub trait PoseTracker {
    /// Whether the marker currently has tracking.
    fn is_tracked(&self) -> bool;

    /// The marker's current world transform. Only meaningful while
    /// [`is_tracked`](Self::is_tracked) returns true.
    fn pose(&self) -> TrackedPose;
}

/// Wall-clock source for per-cycle elapsed time.
pub trait FrameClock {
    /// Seconds elapsed since the previous polling cycle.
    fn delta_seconds(&self) -> f32;
}
