//! Button bitmask and edge-transition arithmetic

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Physical and synthetic controller buttons, one bit each.
    ///
    /// `TOUCHPAD_TOUCH` is not a physical button: it is the synthetic
    /// "finger on the touch surface" signal derived from the analog stick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct Buttons: u16 {
        /// The button under the touch pad (formerly "click").
        const TOUCHPAD_CLICK = 1 << 0;
        /// Synthetic touch-active signal.
        const TOUCHPAD_TOUCH = 1 << 1;
        /// Secondary button on the underside of the controller.
        const GRIP = 1 << 2;
        /// Primary button on the underside of the controller.
        const TRIGGER = 1 << 3;
        /// General application button.
        const APP = 1 << 4;
        /// System button (formerly "home").
        const SYSTEM = 1 << 5;
    }
}

/// Edge transitions between two consecutive button masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonTransitions {
    /// Bits set now that were clear in the previous mask.
    pub pressed: Buttons,
    /// Bits clear now that were set in the previous mask.
    pub released: Buttons,
}

impl ButtonTransitions {
    /// Compare a current mask against the previous frame's mask.
    #[inline]
    pub fn between(previous: Buttons, current: Buttons) -> Self {
        Self {
            pressed: current & !previous,
            released: previous & !current,
        }
    }
}
