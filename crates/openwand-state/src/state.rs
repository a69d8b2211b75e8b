//! Per-frame controller snapshot

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{ApiStatus, BatteryLevel, ButtonTransitions, Buttons, ConnectionState};

/// Center of the emulated touch surface in normalized coordinates.
pub const NEUTRAL_TOUCH: Vec2 = Vec2::new(0.5, 0.5);

/// One frame's worth of controller state, recomputed every polling cycle.
///
/// The snapshot is a pure function of the provider's filter state plus the
/// sensors read during the cycle; it carries no history of its own except
/// the transient signals (`buttons_pressed`, `buttons_released`,
/// `recentered`), which are populated once per cycle and cleared after
/// copy-out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    pub connection: ConnectionState,
    pub api_status: ApiStatus,
    pub battery_level: BatteryLevel,
    pub is_charging: bool,
    /// True when the provider supplies positional as well as rotational data.
    pub six_dof: bool,

    /// Buttons currently down.
    pub buttons: Buttons,
    /// Buttons that went down this cycle. Transient.
    pub buttons_pressed: Buttons,
    /// Buttons that went up this cycle. Transient.
    pub buttons_released: Buttons,

    /// Normalized touch coordinate in [0, 1] x [0, 1].
    pub touch_pos: Vec2,
    /// Controller origin in world space, meters.
    pub position: Vec3,
    /// Controller orientation in world space.
    pub orientation: Quat,
    /// Linear acceleration, m/s^2, gravity included.
    pub accel: Vec3,
    /// Angular velocity, rad/s per axis.
    pub gyro: Vec3,

    /// Set when the user requested a pose recenter; the consumer owns the
    /// actual reset.
    pub recentered: bool,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::disconnected()
    }
}

impl ControllerState {
    /// The neutral, disconnected record. Also serves as the dummy state for
    /// controller indices the provider does not drive.
    pub const fn disconnected() -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            api_status: ApiStatus::Ok,
            battery_level: BatteryLevel::Unknown,
            is_charging: false,
            six_dof: false,
            buttons: Buttons::empty(),
            buttons_pressed: Buttons::empty(),
            buttons_released: Buttons::empty(),
            touch_pos: NEUTRAL_TOUCH,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            accel: Vec3::ZERO,
            gyro: Vec3::ZERO,
            recentered: false,
        }
    }

    /// Recompute the transient edge masks from the previous frame's mask.
    pub fn set_transitions_from(&mut self, previous: Buttons) {
        let t = ButtonTransitions::between(previous, self.buttons);
        self.buttons_pressed = t.pressed;
        self.buttons_released = t.released;
    }

    /// Drop the per-cycle signals: the edge masks and the recenter request.
    /// Must run after the snapshot has been copied out, never before.
    pub fn clear_transient(&mut self) {
        self.buttons_pressed = Buttons::empty();
        self.buttons_released = Buttons::empty();
        self.recentered = false;
    }

    /// Reset everything the availability gate owns: connection, buttons,
    /// pose and derivatives. Filter history is untouched by design.
    pub fn reset_to_disconnected(&mut self) {
        self.connection = ConnectionState::Disconnected;
        self.buttons = Buttons::empty();
        self.buttons_pressed = Buttons::empty();
        self.buttons_released = Buttons::empty();
        self.orientation = Quat::IDENTITY;
        self.position = Vec3::ZERO;
        self.accel = Vec3::ZERO;
        self.gyro = Vec3::ZERO;
        self.touch_pos = NEUTRAL_TOUCH;
    }
}
