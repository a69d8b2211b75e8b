//! End-to-end cycles through the provider pipeline with scripted ports.

use std::collections::HashMap;
use std::sync::Arc;

use approx::assert_relative_eq;
use glam::{Quat, Vec2, Vec3};
use openwand_provider::ports::{FrameClock, JoystickInput, PoseTracker, TrackedPose};
use openwand_provider::{ProviderConfig, WandProvider};
use openwand_state::{Buttons, ConnectionState, ControllerState, NEUTRAL_TOUCH};
use parking_lot::Mutex;

const DT: f32 = 1.0 / 60.0;

#[derive(Debug, Default)]
struct JoystickSim {
    connected: Vec<String>,
    axes: HashMap<String, f32>,
}

#[derive(Debug, Clone, Default)]
struct SharedJoystick(Arc<Mutex<JoystickSim>>);

impl SharedJoystick {
    fn connected(name: &str) -> Self {
        let sim = JoystickSim {
            connected: vec![name.to_owned()],
            axes: HashMap::new(),
        };
        Self(Arc::new(Mutex::new(sim)))
    }

    fn set_axis(&self, name: &str, value: f32) {
        self.0.lock().axes.insert(name.to_owned(), value);
    }

    fn unplug(&self) {
        self.0.lock().connected.clear();
    }
}

impl JoystickInput for SharedJoystick {
    fn joystick_names(&self) -> Vec<String> {
        self.0.lock().connected.clone()
    }

    fn axis(&self, name: &str) -> f32 {
        self.0.lock().axes.get(name).copied().unwrap_or(0.0)
    }
}

#[derive(Debug)]
struct TrackerSim {
    tracked: bool,
    pose: TrackedPose,
}

#[derive(Debug, Clone)]
struct SharedTracker(Arc<Mutex<TrackerSim>>);

impl SharedTracker {
    fn tracked() -> Self {
        Self(Arc::new(Mutex::new(TrackerSim {
            tracked: true,
            pose: TrackedPose::default(),
        })))
    }

    fn set_tracked(&self, tracked: bool) {
        self.0.lock().tracked = tracked;
    }

    fn set_position(&self, position: Vec3) {
        self.0.lock().pose.position = position;
    }
}

impl PoseTracker for SharedTracker {
    fn is_tracked(&self) -> bool {
        self.0.lock().tracked
    }

    fn pose(&self) -> TrackedPose {
        self.0.lock().pose
    }
}

#[derive(Debug, Clone, Copy)]
struct FixedClock(f32);

impl FrameClock for FixedClock {
    fn delta_seconds(&self) -> f32 {
        self.0
    }
}

type TestProvider = WandProvider<SharedJoystick, SharedTracker, FixedClock>;

fn rig(config: ProviderConfig) -> (TestProvider, SharedJoystick, SharedTracker) {
    let joystick = SharedJoystick::connected(&config.joystick_name);
    let tracker = SharedTracker::tracked();
    let provider = WandProvider::new(config, joystick.clone(), tracker.clone(), FixedClock(DT));
    (provider, joystick, tracker)
}

fn read(provider: &TestProvider) -> ControllerState {
    let mut out = ControllerState::default();
    provider.read_state(&mut out, 0);
    out
}

#[test]
fn gate_fails_without_joystick() {
    let config = ProviderConfig::default();
    let (provider, joystick, _tracker) = rig(config);
    joystick.unplug();

    assert!(!provider.is_ready());
    let out = read(&provider);
    assert_eq!(out, ControllerState::disconnected());
}

#[test]
fn gate_fails_without_tracking() {
    let (provider, _joystick, tracker) = rig(ProviderConfig::default());
    tracker.set_tracked(false);

    assert!(!provider.is_ready());
    assert_eq!(read(&provider), ControllerState::disconnected());
}

#[test]
fn gate_fails_with_both_missing() {
    let (provider, joystick, tracker) = rig(ProviderConfig::default());
    joystick.unplug();
    tracker.set_tracked(false);

    assert_eq!(read(&provider), ControllerState::disconnected());
}

#[test]
fn stick_at_rest_produces_neutral_connected_state() {
    let (provider, _joystick, _tracker) = rig(ProviderConfig::default());

    let out = read(&provider);
    assert_eq!(out.connection, ConnectionState::Connected);
    assert!(out.six_dof);
    assert_eq!(out.buttons, Buttons::empty());
    assert_eq!(out.touch_pos, NEUTRAL_TOUCH);

    // Neutral is idempotent: further zero-input cycles stay put.
    for _ in 0..5 {
        let out = read(&provider);
        assert_eq!(out.touch_pos, NEUTRAL_TOUCH);
        assert_eq!(out.buttons, Buttons::empty());
    }
}

#[test]
fn acceleration_settles_to_gravity_at_rest() {
    let (provider, _joystick, tracker) = rig(ProviderConfig::default());
    tracker.set_position(Vec3::new(0.2, 1.5, -0.3));

    // First connected cycle differentiates against the zero history.
    read(&provider);
    let out = read(&provider);
    assert_relative_eq!(out.accel.x, 0.0, epsilon = 1e-3);
    assert_relative_eq!(out.accel.y, -9.8, epsilon = 1e-3);
    assert_relative_eq!(out.accel.z, 0.0, epsilon = 1e-3);
    assert_relative_eq!(out.gyro.length(), 0.0, epsilon = 1e-3);
}

#[test]
fn world_pose_applies_local_offset() {
    let config = ProviderConfig::default();
    let offset = config.local_offset;
    let (provider, _joystick, tracker) = rig(config.clone());
    let marker = Vec3::new(1.0, 2.0, 3.0);
    tracker.set_position(marker);

    let out = read(&provider);
    // Identity marker rotation: offset adds directly.
    assert_relative_eq!(out.position.x, marker.x + offset.x, epsilon = 1e-5);
    assert_relative_eq!(out.position.y, marker.y + offset.y, epsilon = 1e-5);
    assert_relative_eq!(out.position.z, marker.z + offset.z, epsilon = 1e-5);
    let expected = Quat::IDENTITY * config.local_rotation;
    assert!(out.orientation.angle_between(expected) < 1e-4);
}

#[test]
fn held_stick_runs_the_scroll_gesture() {
    let config = ProviderConfig::default();
    let axis_x = config.bindings.axis_x.clone();
    let axis_y = config.bindings.axis_y.clone();
    let (provider, joystick, _tracker) = rig(config);
    joystick.set_axis(&axis_x, 1.0);
    joystick.set_axis(&axis_y, 1.0);

    // Cycle 1: touch-active edge; zero hold threshold means held at once,
    // which primes the gesture without publishing a coordinate.
    let out = read(&provider);
    assert!(out.buttons.contains(Buttons::TOUCHPAD_TOUCH));
    assert!(out.buttons_pressed.contains(Buttons::TOUCHPAD_TOUCH));
    assert_eq!(out.touch_pos, NEUTRAL_TOUCH);

    // Cycle 2: the armed pause gates the touch bit off for one cycle and
    // the recovery step snaps the report to neutral.
    let out = read(&provider);
    assert!(!out.buttons.contains(Buttons::TOUCHPAD_TOUCH));
    assert!(out.buttons_released.contains(Buttons::TOUCHPAD_TOUCH));
    assert_eq!(out.touch_pos, NEUTRAL_TOUCH);

    // Cycle 3 on: the cursor advances from neutral toward the anchor.
    let out = read(&provider);
    assert!(out.buttons.contains(Buttons::TOUCHPAD_TOUCH));
    let first = out.touch_pos.distance(NEUTRAL_TOUCH);
    assert!(first > 0.0);
    let out = read(&provider);
    let second = out.touch_pos.distance(NEUTRAL_TOUCH);
    assert!(second > first);
}

#[test]
fn scroll_tick_completes_and_repeats() {
    let config = ProviderConfig::default();
    let axis_x = config.bindings.axis_x.clone();
    let axis_y = config.bindings.axis_y.clone();
    let anchor_dist = Vec2::ONE.distance(NEUTRAL_TOUCH);
    let (provider, joystick, _tracker) = rig(config);
    joystick.set_axis(&axis_x, 1.0);
    joystick.set_axis(&axis_y, 1.0);

    read(&provider); // prime
    read(&provider); // recovery

    // One tick takes anchor-distance / speed seconds, bounded in cycles.
    let max_cycles = (anchor_dist / DT).ceil() as usize + 2;
    let mut completed = false;
    let mut last_dist = 0.0;
    for _ in 0..max_cycles {
        let out = read(&provider);
        let dist = out.touch_pos.distance(NEUTRAL_TOUCH);
        // Never overshoots the anchor by more than one cycle's travel.
        assert!(dist < anchor_dist + DT);
        if !out.buttons.contains(Buttons::TOUCHPAD_TOUCH) {
            completed = true;
            break;
        }
        last_dist = dist;
    }
    assert!(completed, "scroll tick never completed");
    assert!(last_dist > anchor_dist - 2.0 * DT);

    // The recovery cycle snapped the report to neutral; the next tick then
    // starts advancing from scratch.
    let out = read(&provider);
    assert!(out.buttons.contains(Buttons::TOUCHPAD_TOUCH));
    let dist = out.touch_pos.distance(NEUTRAL_TOUCH);
    assert!(dist > 0.0 && dist < 2.0 * DT);
}

#[test]
fn system_release_raises_recenter_for_one_cycle() {
    let config = ProviderConfig::default();
    let system = config.bindings.system.clone();
    let (provider, joystick, _tracker) = rig(config);

    joystick.set_axis(&system, 1.0);
    let out = read(&provider);
    assert!(out.buttons.contains(Buttons::SYSTEM));
    assert!(!out.recentered);

    joystick.set_axis(&system, 0.0);
    let out = read(&provider);
    assert!(out.buttons_released.contains(Buttons::SYSTEM));
    assert!(out.recentered);

    // Transient: gone the very next cycle.
    let out = read(&provider);
    assert!(!out.recentered);
    assert!(out.buttons_released.is_empty());
}

#[test]
fn partial_deflection_is_not_a_button_press() {
    let config = ProviderConfig::default();
    let system = config.bindings.system.clone();
    let (provider, joystick, _tracker) = rig(config);

    joystick.set_axis(&system, 0.5);
    let out = read(&provider);
    assert!(!out.buttons.contains(Buttons::SYSTEM));
}

#[test]
fn unbound_button_is_permanently_unpressed() {
    // The default bindings leave grip empty.
    let (provider, joystick, _tracker) = rig(ProviderConfig::default());
    joystick.set_axis("Grip", 1.0);

    let out = read(&provider);
    assert!(!out.buttons.contains(Buttons::GRIP));
}

#[test]
fn click_button_stands_in_for_touch_at_raw_zero() {
    let config = ProviderConfig::default();
    let click = config.bindings.touchpad_click.clone();
    let (provider, joystick, _tracker) = rig(config);

    joystick.set_axis(&click, 1.0);
    let out = read(&provider);
    assert!(out.buttons.contains(Buttons::TOUCHPAD_CLICK));
    assert!(out.buttons.contains(Buttons::TOUCHPAD_TOUCH));

    joystick.set_axis(&click, 0.0);
    let out = read(&provider);
    assert!(out.buttons_released.contains(Buttons::TOUCHPAD_CLICK));
    // Touch release resets the reported coordinate.
    assert_eq!(out.touch_pos, NEUTRAL_TOUCH);
}

#[test]
fn edge_masks_respect_previous_mask_invariant() {
    let config = ProviderConfig::default();
    let system = config.bindings.system.clone();
    let app = config.bindings.app.clone();
    let (provider, joystick, _tracker) = rig(config);

    let script: [(f32, f32); 6] = [
        (1.0, 0.0),
        (1.0, 1.0),
        (0.0, 1.0),
        (0.0, 0.0),
        (1.0, 1.0),
        (0.0, 0.0),
    ];

    let mut previous = Buttons::empty();
    for (sys, ap) in script {
        joystick.set_axis(&system, sys);
        joystick.set_axis(&app, ap);
        let out = read(&provider);
        assert_eq!(out.buttons_pressed & previous, Buttons::empty());
        assert_eq!(out.buttons_released & !previous, Buttons::empty());
        previous = out.buttons;
    }
}

#[test]
fn tracking_loss_resets_output_but_not_history() {
    let (provider, _joystick, tracker) = rig(ProviderConfig::default());
    let resting = Vec3::new(0.4, 1.1, 0.2);
    tracker.set_position(resting);

    read(&provider);
    read(&provider);

    tracker.set_tracked(false);
    let out = read(&provider);
    assert_eq!(out.connection, ConnectionState::Disconnected);
    assert_eq!(out.position, Vec3::ZERO);
    assert_eq!(out.accel, Vec3::ZERO);

    // Tracking resumes at the same spot: no differentiation happened
    // against a zeroed pose, so no acceleration spike.
    tracker.set_tracked(true);
    let out = read(&provider);
    assert_eq!(out.connection, ConnectionState::Connected);
    assert_relative_eq!(out.accel.y, -9.8, epsilon = 1e-3);
    assert_relative_eq!(out.accel.x, 0.0, epsilon = 1e-3);
}

use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_edge_masks_consistent_across_cycles(
        script in proptest::collection::vec(
            (any::<bool>(), any::<bool>(), any::<bool>(), -1.0f32..=1.0, -1.0f32..=1.0),
            1..40,
        ),
    ) {
        let config = ProviderConfig::default();
        let system = config.bindings.system.clone();
        let app = config.bindings.app.clone();
        let click = config.bindings.touchpad_click.clone();
        let axis_x = config.bindings.axis_x.clone();
        let axis_y = config.bindings.axis_y.clone();
        let (provider, joystick, _tracker) = rig(config);

        let mut previous = Buttons::empty();
        for (sys, ap, cl, rx, ry) in script {
            joystick.set_axis(&system, if sys { 1.0 } else { 0.0 });
            joystick.set_axis(&app, if ap { 1.0 } else { 0.0 });
            joystick.set_axis(&click, if cl { 1.0 } else { 0.0 });
            joystick.set_axis(&axis_x, rx);
            joystick.set_axis(&axis_y, ry);

            let out = read(&provider);
            // A bit cannot be pressed if already set, nor released if it
            // was not previously set, whatever the touch/scroll phase.
            prop_assert_eq!(out.buttons_pressed & previous, Buttons::empty());
            prop_assert_eq!(out.buttons_released & !previous, Buttons::empty());
            prop_assert_eq!(out.buttons_pressed & out.buttons_released, Buttons::empty());
            previous = out.buttons;
        }
    }
}

#[test]
fn editor_preset_dead_zone_suppresses_touch() {
    let config = ProviderConfig::editor();
    let axis_x = config.bindings.axis_x.clone();
    let axis_y = config.bindings.axis_y.clone();
    let (provider, joystick, _tracker) = rig(config);

    // Raw values whose mapped coordinate lands inside the dead zone.
    joystick.set_axis(&axis_y, 0.9952);
    joystick.set_axis(&axis_x, -0.995);
    let out = read(&provider);
    assert!(!out.buttons.contains(Buttons::TOUCHPAD_TOUCH));
}
