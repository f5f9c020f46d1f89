//! Pure mapping from timer state to what the circle looks like.
//!
//! `(phase, progress) → CircleFrame`. No terminal, no clock.

use ratatui::style::Color;

use crate::types::{Phase, MAX_RADIUS, MIN_RADIUS};

/// Sky blue.
pub const COLOR_INHALE: Color = Color::Rgb(0x80, 0xb3, 0xff);
/// Lavender.
pub const COLOR_HOLD1: Color = Color::Rgb(0xb2, 0x99, 0xff);
/// Periwinkle.
pub const COLOR_EXHALE: Color = Color::Rgb(0x99, 0xcc, 0xff);
/// Soft violet.
pub const COLOR_HOLD2: Color = Color::Rgb(0xcc, 0x99, 0xff);
/// Used when a color cannot be resolved to RGB.
pub const FALLBACK_COLOR: Color = Color::Rgb(0xff, 0xff, 0xff);

/// Everything needed to draw one frame of the circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleFrame {
    /// Radius in canvas units, always within `[MIN_RADIUS, MAX_RADIUS]`.
    pub radius: f64,
    pub color: Color,
    pub label: &'static str,
}

impl CircleFrame {
    pub fn new(phase: Phase, progress: f64) -> Self {
        CircleFrame {
            radius: radius(phase, progress),
            color: phase_color(phase),
            label: phase_label(phase),
        }
    }
}

/// Radius for `phase` at `progress`.
///
/// Inhale grows min → max, exhale shrinks max → min, hold2 sits at min and
/// hold1 at max. Progress is clamped to `[0, 1]`.
pub fn radius(phase: Phase, progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    let span = MAX_RADIUS - MIN_RADIUS;
    match phase {
        Phase::Inhale => MIN_RADIUS + span * p,
        Phase::Exhale => MAX_RADIUS - span * p,
        Phase::Hold2 => MIN_RADIUS,
        Phase::Hold1 => MAX_RADIUS,
    }
}

pub fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Inhale => COLOR_INHALE,
        Phase::Hold1 => COLOR_HOLD1,
        Phase::Exhale => COLOR_EXHALE,
        Phase::Hold2 => COLOR_HOLD2,
    }
}

/// "Hold" for both holds, otherwise the capitalized phase name.
pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Inhale => "Inhale",
        Phase::Exhale => "Exhale",
        Phase::Hold1 | Phase::Hold2 => "Hold",
    }
}
