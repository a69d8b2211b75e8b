//! Synthetic 6-DoF controller provider
//!
//! Fuses a 2-axis joystick's analog stick and digital buttons with a
//! separately tracked rigid-body pose into a per-frame controller state
//! for a VR runtime. The stick emulates a capacitive touchpad (dead-zone
//! and return-to-neutral filtering, hold-and-fling scroll gesture) and the
//! tracked pose is differentiated into acceleration and angular velocity.
//!
//! The host runtime calls [`WandProvider::read_state`] once per frame; the
//! platform input layer, the pose tracker and the frame clock are supplied
//! through the port traits in [`ports`].
//!
//! ```
//! use openwand_provider::{ProviderConfig, WandProvider};
//! use openwand_provider::ports::{FrameClock, JoystickInput, PoseTracker, TrackedPose};
//! use openwand_state::ControllerState;
//!
//! # struct NoJoystick;
//! # impl JoystickInput for NoJoystick {
//! #     fn joystick_names(&self) -> Vec<String> { Vec::new() }
//! #     fn axis(&self, _: &str) -> f32 { 0.0 }
//! # }
//! # struct NoTracker;
//! # impl PoseTracker for NoTracker {
//! #     fn is_tracked(&self) -> bool { false }
//! #     fn pose(&self) -> TrackedPose { TrackedPose::default() }
//! # }
//! # struct Clock;
//! # impl FrameClock for Clock {
//! #     fn delta_seconds(&self) -> f32 { 1.0 / 60.0 }
//! # }
//! let provider = WandProvider::new(ProviderConfig::default(), NoJoystick, NoTracker, Clock);
//! let mut state = ControllerState::default();
//! provider.read_state(&mut state, 0);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod ports;
pub mod provider;

pub use config::{AxisBindings, ConfigError, ProviderConfig};
pub use provider::WandProvider;
