//! Connection, API and battery status enums
//!
//! These mirror the host runtime's controller-state container so the
//! snapshot can be copied into it field for field.

use serde::{Deserialize, Serialize};

/// Connection phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Scanning,
    Connecting,
    Connected,
    Error,
}

/// Health of the controller API itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    #[default]
    Ok,
    Unavailable,
    ApiNotFound,
    ApiObsolete,
    Error,
}

/// Coarse battery charge level.
///
/// The synthetic controller has no battery telemetry; a connected state
/// always reports `Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryLevel {
    #[default]
    Unknown,
    CriticalLow,
    Low,
    Medium,
    AlmostFull,
    Full,
}
