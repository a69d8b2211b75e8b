//! Hold detection: a touch staying put long enough to arm the scroll gesture

use glam::Vec2;
use openwand_state::NEUTRAL_TOUCH;

/// Anchor point and accumulated dwell time for hold detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldDetector {
    /// Coordinate the current dwell is measured against.
    pub anchor: Vec2,
    /// Wall-clock seconds spent within the hold zone of the anchor.
    pub elapsed: f32,
}

impl HoldDetector {
    /// Fresh detector anchored at the neutral point.
    pub const fn new() -> Self {
        Self {
            anchor: NEUTRAL_TOUCH,
            elapsed: 0.0,
        }
    }

    /// Drop any accumulated dwell and re-anchor at neutral.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for HoldDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance hold detection by one cycle.
///
/// Leaving the hold zone re-anchors at the current coordinate and restarts
/// the dwell; the touch is trivially inside the zone of its own new anchor,
/// so dwell time accumulates in the same cycle. The touch counts as held
/// once the dwell reaches `hold_time`; with a zero threshold every touching
/// cycle is held, anchored at the latest coordinate.
///
/// Driven by wall-clock `dt`, not frame count. Call exactly once per cycle.
#[inline]
pub fn hold_update(
    state: &mut HoldDetector,
    touch: Vec2,
    dt: f32,
    hold_zone: f32,
    hold_time: f32,
) -> bool {
    if touch.distance(state.anchor) >= hold_zone {
        state.elapsed = 0.0;
        state.anchor = touch;
    }
    state.elapsed += dt;
    state.elapsed >= hold_time
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_zero_threshold_holds_immediately() {
        let mut state = HoldDetector::new();
        let touch = Vec2::new(0.9, 0.9);
        // Re-anchors and starts dwelling in the same cycle.
        assert!(hold_update(&mut state, touch, DT, 0.05, 0.0));
        assert_eq!(state.anchor, touch);
        assert!(hold_update(&mut state, touch, DT, 0.05, 0.0));
    }

    #[test]
    fn test_dwell_accumulates_wall_clock_time() {
        let mut state = HoldDetector::new();
        let touch = Vec2::new(0.2, 0.5);
        let dt = 0.02;
        let hold_time = 0.099;

        let mut cycles = 0;
        loop {
            cycles += 1;
            assert!(cycles < 100, "hold never triggered");
            if hold_update(&mut state, touch, dt, 0.05, hold_time) {
                break;
            }
        }
        // Five 20 ms cycles of dwell cross the 99 ms threshold.
        assert_eq!(cycles, 5);
    }

    #[test]
    fn test_leaving_zone_resets_dwell() {
        let mut state = HoldDetector::new();
        let a = Vec2::new(0.8, 0.5);
        let b = Vec2::new(0.2, 0.5);
        let hold_time = 0.03;

        assert!(!hold_update(&mut state, a, DT, 0.05, hold_time));
        assert!(hold_update(&mut state, a, DT, 0.05, hold_time));

        // Jump outside the zone: dwell restarts at the new anchor.
        assert!(!hold_update(&mut state, b, DT, 0.05, hold_time));
        assert_eq!(state.anchor, b);
        assert!(hold_update(&mut state, b, DT, 0.05, hold_time));
    }

    #[test]
    fn test_drift_within_zone_keeps_hold() {
        let mut state = HoldDetector::new();
        let anchor = Vec2::new(0.8, 0.5);
        hold_update(&mut state, anchor, DT, 0.05, 0.0);
        let drifted = anchor + Vec2::new(0.03, 0.0);
        assert!(hold_update(&mut state, drifted, DT, 0.05, 0.0));
        // Anchor does not chase the touch while inside the zone.
        assert_eq!(state.anchor, anchor);
    }
}
