//! Runtime configuration surface
//!
//! Everything platform-specific lives here as data: the joystick name, the
//! axis bindings, the affine touch mapping and the gesture tuning
//! constants. The provider itself is platform-agnostic; a host selects one
//! of the presets (or loads its own values) after platform detection.

use glam::{EulerRot, Quat, Vec3};
use openwand_filters::{AxisMapping, TouchMapping};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("joystick name must not be empty")]
    MissingJoystickName,

    #[error("stick axis '{0}' must be bound")]
    MissingStickAxis(&'static str),

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
}

/// Named analog axes the provider polls. An empty button name means the
/// platform has no such button; its predicate then evaluates false forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AxisBindings {
    /// Thumbstick X axis. Required.
    pub axis_x: String,
    /// Thumbstick Y axis. Required.
    pub axis_y: String,
    /// Button under the touch pad.
    pub touchpad_click: String,
    /// Grip button.
    pub grip: String,
    /// Trigger button.
    pub trigger: String,
    /// Application button.
    pub app: String,
    /// System button.
    pub system: String,
}

impl Default for AxisBindings {
    fn default() -> Self {
        Self {
            axis_x: "Horizontal".to_owned(),
            axis_y: "Vertical".to_owned(),
            touchpad_click: String::new(),
            grip: String::new(),
            trigger: String::new(),
            app: String::new(),
            system: String::new(),
        }
    }
}

/// Full provider configuration.
///
/// `Default` is the standalone-device preset; [`ProviderConfig::editor`]
/// carries the desktop-editor bindings and mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProviderConfig {
    /// Joystick name tested against the platform's enumeration.
    pub joystick_name: String,
    /// Axis names for the stick and the digital buttons.
    pub bindings: AxisBindings,
    /// Affine mapping from raw stick space into the touch frame.
    pub touch_map: TouchMapping,

    /// Scroll cursor speed in touch-frame units per second.
    pub scroll_speed: f32,
    /// Displacement radius within which a touch still counts as held.
    pub hold_zone: f32,
    /// Radius around neutral where touches are suppressed. Zero disables.
    pub dead_zone: f32,
    /// Minimum per-cycle approach toward neutral that counts as a return.
    pub return_threshold: f32,
    /// Seconds a touch must dwell before it is held. Zero is immediate.
    pub hold_time: f32,

    /// Controller origin relative to the tracked marker, meters.
    pub local_offset: Vec3,
    /// Controller orientation relative to the tracked marker.
    pub local_rotation: Quat,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            joystick_name: "VR BOX".to_owned(),
            bindings: AxisBindings {
                touchpad_click: "Fire3".to_owned(),
                app: "Jump".to_owned(),
                system: "Fire1".to_owned(),
                trigger: "Fire2".to_owned(),
                ..AxisBindings::default()
            },
            touch_map: TouchMapping {
                x: AxisMapping {
                    scale: 0.5,
                    offset: 0.5,
                },
                y: AxisMapping {
                    scale: 0.5,
                    offset: 0.5,
                },
                swap_axes: true,
            },
            scroll_speed: 1.0,
            hold_zone: 0.05,
            // The historical device mapping relied on return suppression
            // alone; radius zero keeps that behavior under the unified rule.
            dead_zone: 0.0,
            return_threshold: 0.01,
            hold_time: 0.0,
            local_offset: Vec3::new(0.051_961_524, -0.037_819_389, 0.066_103_66),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_local_rotation() -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        (-135.0_f32).to_radians(),
        (-35.264_39_f32).to_radians(),
        0.0,
    )
}

impl ProviderConfig {
    /// Desktop-editor preset: keyboard-backed axes and the near-binary
    /// affine mapping the editor stick produces, with a dead zone.
    pub fn editor() -> Self {
        Self {
            joystick_name: "Keyboard".to_owned(),
            bindings: AxisBindings {
                touchpad_click: "Jump".to_owned(),
                app: "Submit".to_owned(),
                system: "Cancel".to_owned(),
                ..AxisBindings::default()
            },
            touch_map: TouchMapping {
                x: AxisMapping {
                    scale: 100.0,
                    offset: -99.0,
                },
                y: AxisMapping {
                    scale: 100.0,
                    offset: 100.0,
                },
                swap_axes: true,
            },
            dead_zone: 0.05,
            ..Self::default()
        }
    }

    /// Check the configuration for values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.joystick_name.is_empty() {
            return Err(ConfigError::MissingJoystickName);
        }
        if self.bindings.axis_x.is_empty() {
            return Err(ConfigError::MissingStickAxis("axis_x"));
        }
        if self.bindings.axis_y.is_empty() {
            return Err(ConfigError::MissingStickAxis("axis_y"));
        }

        for (field, value) in [
            ("scroll_speed", self.scroll_speed),
            ("hold_zone", self.hold_zone),
            ("dead_zone", self.dead_zone),
            ("return_threshold", self.return_threshold),
            ("hold_time", self.hold_time),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if self.scroll_speed <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "scroll_speed",
                value: self.scroll_speed,
            });
        }
        if self.return_threshold <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "return_threshold",
                value: self.return_threshold,
            });
        }
        for (field, value) in [
            ("hold_zone", self.hold_zone),
            ("dead_zone", self.dead_zone),
            ("hold_time", self.hold_time),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }
}
