//! Controller state model for the OpenWand synthetic 6-DoF provider
//!
//! This crate defines the per-frame controller snapshot consumed by the host
//! VR runtime, the button bitmask and status enums, and the constant
//! disconnected record returned for unsupported controller indices.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod buttons;
pub mod state;
pub mod status;

pub use buttons::*;
pub use state::*;
pub use status::*;
