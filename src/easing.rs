//! Time remapping for the circle animation.

use std::f64::consts::PI;

/// Sinusoidal ease-in-out: zero rate of change at both ends, symmetric
/// about `t = 0.5`.
///
/// Input is clamped to `[0, 1]`, so the output is too.
pub fn ease_in_out_sine(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    -((PI * t).cos() - 1.0) / 2.0
}
