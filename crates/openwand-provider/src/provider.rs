//! The provider: locked per-cycle state fusion
//!
//! `read_state` runs the full cycle under one mutex: availability gate,
//! button/gesture state machine (touch emulation inside), pose derivative
//! engine, then copy-out into the caller's record. The transient edge
//! masks are cleared after copy-out, still inside the critical section, so
//! no reader can observe a half-cleared snapshot.

use glam::Vec2;
use openwand_filters::{
    HoldDetector, NEUTRAL_TOUCH, PoseHistory, ScrollState, derive_accel, derive_gyro, hold_update,
    sample_touch, scroll_update, world_pose,
};
use openwand_state::{ApiStatus, BatteryLevel, Buttons, ConnectionState, ControllerState};
use parking_lot::Mutex;

use crate::config::ProviderConfig;
use crate::ports::{FrameClock, JoystickInput, PoseTracker};

/// Number of logical controllers the provider drives. Indices past the
/// first receive the constant dummy state.
pub const MAX_CONTROLLER_COUNT: usize = 1;

const DUMMY_STATE: ControllerState = ControllerState::disconnected();

/// History threaded across cycles. Owned exclusively by the provider,
/// never exposed.
#[derive(Debug)]
struct CoreState {
    state: ControllerState,
    /// Last touch coordinate produced by the analog mapping.
    scaled_touch: Vec2,
    last_buttons: Buttons,
    hold: HoldDetector,
    scroll: ScrollState,
    pose: PoseHistory,
}

impl CoreState {
    fn new() -> Self {
        Self {
            state: ControllerState::disconnected(),
            scaled_touch: NEUTRAL_TOUCH,
            last_buttons: Buttons::empty(),
            hold: HoldDetector::new(),
            scroll: ScrollState::new(),
            pose: PoseHistory::new(),
        }
    }
}

/// Synthetic 6-DoF controller provider.
///
/// Generic over the platform ports so hosts and tests can supply their own
/// input layer, tracker and clock.
#[derive(Debug)]
pub struct WandProvider<J, T, C> {
    config: ProviderConfig,
    joystick: J,
    tracker: T,
    clock: C,
    core: Mutex<CoreState>,
}

impl<J, T, C> WandProvider<J, T, C>
where
    J: JoystickInput,
    T: PoseTracker,
    C: FrameClock,
{
    /// Build a provider from a configuration and the three platform ports.
    pub fn new(config: ProviderConfig, joystick: J, tracker: T, clock: C) -> Self {
        Self {
            config,
            joystick,
            tracker,
            clock,
            core: Mutex::new(CoreState::new()),
        }
    }

    /// The device reports no real battery telemetry.
    pub fn supports_battery_status(&self) -> bool {
        false
    }

    /// See [`MAX_CONTROLLER_COUNT`].
    pub fn max_controller_count(&self) -> usize {
        MAX_CONTROLLER_COUNT
    }

    /// Run one polling cycle and write the resulting snapshot into `out`.
    ///
    /// Only controller 0 carries real state; any other index receives the
    /// constant disconnected record without taking the lock.
    pub fn read_state(&self, out: &mut ControllerState, controller_index: usize) {
        if controller_index != 0 {
            *out = DUMMY_STATE;
            return;
        }

        let mut core = self.core.lock();
        self.update_state(&mut core);
        *out = core.state;
        // Copy-out first, clear second: the copy is the only place the
        // transient masks escape.
        core.state.clear_transient();
    }

    /// Availability gate: both the joystick and the tracked pose must be
    /// present for the cycle to proceed.
    pub fn is_ready(&self) -> bool {
        self.joystick.is_connected(&self.config.joystick_name) && self.tracker.is_tracked()
    }

    fn update_state(&self, core: &mut CoreState) {
        let joystick_ok = self.joystick.is_connected(&self.config.joystick_name);
        let tracker_ok = self.tracker.is_tracked();
        if !joystick_ok || !tracker_ok {
            tracing::warn!(
                joystick = %self.config.joystick_name,
                joystick_connected = joystick_ok,
                tracker_tracked = tracker_ok,
                "controller unavailable, emitting disconnected state"
            );
            // History fields stay untouched: no differentiation happens, so
            // the frame tracking resumes cannot see a velocity spike.
            core.state.reset_to_disconnected();
            return;
        }

        core.state.six_dof = true;
        core.state.connection = ConnectionState::Connected;
        core.state.api_status = ApiStatus::Ok;
        core.state.is_charging = false;
        core.state.battery_level = BatteryLevel::Full;

        let dt = self.clock.delta_seconds();
        self.update_buttons(core);
        self.update_gesture(core, dt);
        self.update_pose(core, dt);
    }

    /// Touch emulation plus button mask assembly and edge detection.
    fn update_buttons(&self, core: &mut CoreState) {
        let bindings = &self.config.bindings;
        let raw = Vec2::new(
            self.joystick.axis(&bindings.axis_x),
            self.joystick.axis(&bindings.axis_y),
        );
        let click = self.button_pressed(&bindings.touchpad_click);

        let sample = sample_touch(
            &self.config.touch_map,
            raw,
            click,
            core.scaled_touch,
            self.config.dead_zone,
            self.config.return_threshold,
        );
        core.scaled_touch = sample.pos;

        let mut buttons = Buttons::empty();
        if click {
            buttons |= Buttons::TOUCHPAD_CLICK;
        }
        if self.button_pressed(&bindings.grip) {
            buttons |= Buttons::GRIP;
        }
        if self.button_pressed(&bindings.trigger) {
            buttons |= Buttons::TRIGGER;
        }
        if self.button_pressed(&bindings.app) {
            buttons |= Buttons::APP;
        }
        if self.button_pressed(&bindings.system) {
            buttons |= Buttons::SYSTEM;
        }
        if sample.touching && !core.scroll.paused {
            buttons |= Buttons::TOUCHPAD_TOUCH;
        }

        core.state.buttons = buttons;
        core.state.set_transitions_from(core.last_buttons);
        core.last_buttons = buttons;

        if core.state.buttons_released.contains(Buttons::TOUCHPAD_TOUCH) {
            core.state.touch_pos = NEUTRAL_TOUCH;
        }
        if core.state.buttons_released.contains(Buttons::SYSTEM) {
            // The consumer owns the actual pose reset.
            tracing::debug!("system button released, requesting recenter");
            core.state.recentered = true;
        }
    }

    /// Hold detection and the scroll gesture.
    fn update_gesture(&self, core: &mut CoreState, dt: f32) {
        let held = hold_update(
            &mut core.hold,
            core.scaled_touch,
            dt,
            self.config.hold_zone,
            self.config.hold_time,
        );

        let touch_active = core.state.buttons.contains(Buttons::TOUCHPAD_TOUCH);
        if let Some(pos) = scroll_update(
            &mut core.scroll,
            held,
            touch_active,
            core.hold.anchor,
            core.scaled_touch,
            dt,
            self.config.scroll_speed,
        ) {
            core.state.touch_pos = pos;
        }
    }

    /// Pose derivative engine: world pose, acceleration, angular velocity.
    fn update_pose(&self, core: &mut CoreState, dt: f32) {
        let tracked = self.tracker.pose();
        let (position, orientation) = world_pose(
            tracked.position,
            tracked.rotation,
            self.config.local_offset,
            self.config.local_rotation,
        );
        core.state.position = position;
        core.state.orientation = orientation;
        core.state.accel = derive_accel(&mut core.pose, position, dt);
        core.state.gyro = derive_gyro(&mut core.pose, orientation, dt);
    }

    /// A button axis reads pressed at full deflection; an empty binding is
    /// permanently unpressed.
    fn button_pressed(&self, binding: &str) -> bool {
        !binding.is_empty() && self.joystick.axis(binding) == 1.0
    }
}
