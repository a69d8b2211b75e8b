//! Scroll gesture: repeating fling ticks from a touch held away from center
//!
//! While a touch is held off-neutral, a synthetic cursor repeatedly travels
//! from the neutral point out toward the hold anchor. Each traversal is one
//! scroll tick; after a tick the gesture pauses for a cycle (dropping the
//! touch-active bit), snaps the reported coordinate back to neutral and
//! then starts over. The consumer sees the same signal a finger repeatedly
//! flicking across a real touchpad would produce.

use glam::Vec2;
use openwand_state::NEUTRAL_TOUCH;

/// Cursor position and gesture phase for the scroll emulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Synthetic cursor advanced while the gesture runs.
    pub cursor: Vec2,
    /// Set for the one cycle between a completed tick (or a fresh hold) and
    /// the recovery step. Gates the touch-active bit off for that cycle.
    pub paused: bool,
    /// Whether the touch was held on the previous cycle.
    pub was_held: bool,
}

impl ScrollState {
    /// Idle gesture, cursor at neutral.
    pub const fn new() -> Self {
        Self {
            cursor: NEUTRAL_TOUCH,
            paused: false,
            was_held: false,
        }
    }

    /// Return to the idle gesture.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the scroll gesture by one cycle.
///
/// `touch_active` must be the touch bit as assembled into this cycle's
/// button mask, i.e. already gated by the pause flag from the previous
/// cycle; the ordering is what gives the gesture its one-cycle pause
/// between ticks.
///
/// Returns the coordinate to publish as this cycle's reported touch
/// position, or `None` to leave the published coordinate unchanged.
pub fn scroll_update(
    state: &mut ScrollState,
    held: bool,
    touch_active: bool,
    anchor: Vec2,
    live_touch: Vec2,
    dt: f32,
    scroll_speed: f32,
) -> Option<Vec2> {
    // Recovery step: a held touch meeting an armed pause snaps the report
    // back to neutral and lets the next hold-and-tick round begin.
    if held && state.paused {
        state.paused = false;
        return Some(NEUTRAL_TOUCH);
    }

    if !touch_active {
        return None;
    }

    if held {
        if state.was_held {
            let direction = (anchor - NEUTRAL_TOUCH).normalize_or_zero();
            state.cursor += direction * scroll_speed * dt;

            let tick_complete = anchor.distance(NEUTRAL_TOUCH) <= state.cursor.distance(NEUTRAL_TOUCH);
            if tick_complete {
                state.cursor = NEUTRAL_TOUCH;
                state.paused = true;
                None
            } else {
                Some(state.cursor)
            }
        } else {
            // First held cycle: prime the gesture without moving anything.
            state.cursor = NEUTRAL_TOUCH;
            state.paused = true;
            state.was_held = true;
            None
        }
    } else {
        state.was_held = false;
        state.cursor = NEUTRAL_TOUCH;
        Some(live_touch)
    }
}
