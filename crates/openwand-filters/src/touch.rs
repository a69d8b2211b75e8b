//! Touch emulation: affine axis mapping and suppression filters
//!
//! Maps a 2-axis analog stick into the normalized [0, 1]^2 touch frame and
//! derives the synthetic "touching" signal. Two suppressions apply on the
//! analog path: a dead zone right at the neutral point and a
//! return-to-neutral check that keeps a released, spring-centering stick
//! from reading as a touch while it travels back to center.

use glam::Vec2;
use openwand_state::NEUTRAL_TOUCH;
use serde::{Deserialize, Serialize};

/// Affine map from one raw axis value to one touch-frame axis.
///
/// `raw * scale + offset`, clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisMapping {
    /// Multiplier applied to the raw axis value.
    pub scale: f32,
    /// Offset added after scaling.
    pub offset: f32,
}

impl AxisMapping {
    /// Identity-to-unit mapping for a raw axis already in [-1, 1].
    pub const CENTERED: Self = Self {
        scale: 0.5,
        offset: 0.5,
    };

    /// Apply the mapping and clamp into the touch frame.
    #[inline]
    pub fn apply(&self, raw: f32) -> f32 {
        (raw * self.scale + self.offset).clamp(0.0, 1.0)
    }
}

/// Full 2-axis mapping from raw stick space into the touch frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TouchMapping {
    /// Mapping feeding the touch X coordinate.
    pub x: AxisMapping,
    /// Mapping feeding the touch Y coordinate.
    pub y: AxisMapping,
    /// Feed touch X from the raw Y axis and vice versa. The reference
    /// hardware mounts the stick rotated 90 degrees, so this defaults on.
    pub swap_axes: bool,
}

impl TouchMapping {
    /// Map a raw axis pair into the touch frame.
    #[inline]
    pub fn map(&self, raw: Vec2) -> Vec2 {
        let (rx, ry) = if self.swap_axes {
            (raw.y, raw.x)
        } else {
            (raw.x, raw.y)
        };
        Vec2::new(self.x.apply(rx), self.y.apply(ry))
    }
}

impl Default for TouchMapping {
    fn default() -> Self {
        Self {
            x: AxisMapping::CENTERED,
            y: AxisMapping::CENTERED,
            swap_axes: true,
        }
    }
}

/// Result of sampling the touch surface for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    /// Touch coordinate to carry as this cycle's stick position. Equal to
    /// the previous coordinate when the click-button fallback path was
    /// taken.
    pub pos: Vec2,
    /// The synthetic touch-active signal, before gesture pausing.
    pub touching: bool,
}

/// True when the touch is on its way back to the neutral point.
///
/// A touch counts as returning when its distance to neutral shrank by more
/// than `return_threshold` since the previous cycle. Pure; the caller
/// commits `current` as the new previous coordinate once per cycle.
#[inline]
pub fn returning_to_neutral(current: Vec2, previous: Vec2, return_threshold: f32) -> bool {
    current.distance(NEUTRAL_TOUCH) < previous.distance(NEUTRAL_TOUCH) - return_threshold
}

/// True when the touch sits within `dead_zone` of the neutral point.
/// A radius of zero disables the check.
#[inline]
pub fn in_dead_zone(pos: Vec2, dead_zone: f32) -> bool {
    pos.distance(NEUTRAL_TOUCH) < dead_zone
}

/// Sample the emulated touch surface.
///
/// With a deflected stick the analog path applies the mapping and both
/// suppressions. With the stick exactly at raw zero the digital click
/// button stands in for the touching signal and the coordinate holds its
/// previous value; the return-suppression history is not consulted on that
/// path.
///
/// Pure with respect to filter state: commit `sample.pos` as the previous
/// coordinate exactly once per cycle.
#[inline]
pub fn sample_touch(
    mapping: &TouchMapping,
    raw: Vec2,
    click_pressed: bool,
    previous: Vec2,
    dead_zone: f32,
    return_threshold: f32,
) -> TouchSample {
    if raw != Vec2::ZERO {
        let pos = mapping.map(raw);
        let touching =
            !returning_to_neutral(pos, previous, return_threshold) && !in_dead_zone(pos, dead_zone);
        TouchSample { pos, touching }
    } else {
        TouchSample {
            pos: previous,
            touching: click_pressed,
        }
    }
}
