//! TUI color semantics and style constants.
//!
//! The circle is painted at 80% opacity over a near-black background, so
//! phase colors are pre-blended here before they reach the canvas.

use ratatui::style::{Color, Modifier, Style};

use crate::circle::FALLBACK_COLOR;

/// Dark slate background behind the circle (`#111827`).
pub const BACKGROUND: Color = Color::Rgb(0x11, 0x18, 0x27);

/// Circle fill opacity.
pub const CIRCLE_OPACITY: f64 = 0.8;

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Phase label drawn over the circle.
pub const STYLE_LABEL: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Start/Stop control.
pub const STYLE_RUN_BUTTON: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Rgb(0x3b, 0x82, 0xf6))
    .add_modifier(Modifier::BOLD);

/// Mode control.
pub const STYLE_MODE_BUTTON: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Rgb(0xa8, 0x55, 0xf7))
    .add_modifier(Modifier::BOLD);

/// De-emphasized metadata (timings).
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

/// Composite `fg` over `bg` at `alpha`.
///
/// Non-RGB inputs cannot be blended and resolve to the fallback color.
pub fn blend(fg: Color, bg: Color, alpha: f64) -> Color {
    let (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) = (fg, bg) else {
        return FALLBACK_COLOR;
    };
    let a = alpha.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (f64::from(f) * a + f64::from(b) * (1.0 - a)).round() as u8;
    Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
}

/// Phase color as it appears on screen.
pub fn circle_fill(color: Color) -> Color {
    blend(color, BACKGROUND, CIRCLE_OPACITY)
}

// ============================================================================
// TESTS
// ============================================================================
