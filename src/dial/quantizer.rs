//! Pointer position to duration mapping

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::state::duration_state::STEP_SECONDS;

/// Pointer input closer than this to the dial center is ignored
pub const DEAD_ZONE_RADIUS: f64 = 15.0;
/// Number of equal slices one full turn is cut into
pub const INTERVALS: u32 = 120;

/// Pixel size of the dial widget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite sizes cannot host a dial
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Map a pointer position inside `bounds` to a session length in seconds.
///
/// Returns `None` inside the dead zone and for degenerate input. The
/// angle is measured clockwise from 12 o'clock; the slice starting at 12
/// o'clock resolves to the full hour rather than to zero.
pub fn quantize(x: f64, y: f64, bounds: Bounds) -> Option<u32> {
    if bounds.is_degenerate() || !x.is_finite() || !y.is_finite() {
        return None;
    }

    let (cx, cy) = bounds.center();
    let (dx, dy) = (x - cx, y - cy);
    if dx.hypot(dy) < DEAD_ZONE_RADIUS {
        return None;
    }

    let mut angle = dy.atan2(dx) + FRAC_PI_2;
    if angle < 0.0 {
        angle += TAU;
    }

    // Rounding right below a full turn may land exactly on INTERVALS
    let interval = match ((angle / TAU) * f64::from(INTERVALS)).floor() as u32 {
        0 => INTERVALS,
        i => i.min(INTERVALS),
    };

    Some(interval * STEP_SECONDS)
}
