//! Per-frame filter stages for the OpenWand provider
//!
//! Each stage is a plain `Copy` state struct plus free functions that take
//! the state, the fresh sensor sample and the wall-clock delta for the
//! cycle. Stages hold the only history the provider keeps between frames.
//!
//! The stage functions are split into pure signal computation and explicit
//! history commits so a stage can be queried without mutating state behind
//! the caller's back; the provider commits each history exactly once per
//! cycle.
//!
//! # Stages
//!
//! - **Touch**: affine mapping of raw stick axes into the normalized touch
//!   frame, dead-zone and return-to-neutral suppression.
//! - **Hold**: anchor-plus-timer detection of a stationary touch.
//! - **Scroll**: the hold-and-fling gesture producing repeating scroll
//!   ticks while a touch is held away from center.
//! - **Pose**: local offset/rotation application and numeric
//!   differentiation of the tracked pose.
//!
//! All stages are allocation-free and O(1) per cycle.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod hold;
pub mod pose;
pub mod scroll;
pub mod touch;

pub use hold::{HoldDetector, hold_update};
pub use pose::{GRAVITY, MIN_DELTA_TIME, PoseHistory, derive_accel, derive_gyro, world_pose};
pub use scroll::{ScrollState, scroll_update};
pub use touch::{AxisMapping, TouchMapping, TouchSample, sample_touch};

pub use openwand_state::NEUTRAL_TOUCH;
