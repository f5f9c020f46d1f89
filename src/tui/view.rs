//! Pure rendering: map App state to ratatui widgets.
//!
//! The circle is drawn on a braille canvas whose coordinate space matches a
//! 300×300 viewport centered on the origin, so radii from the pacing model
//! are used unchanged.

use std::time::Duration;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Painter, Shape};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::circle::{phase_label, CircleFrame};
use crate::timer::PhaseTimer;

use super::state::App;
use super::theme;

/// Half-width of the canvas viewport, in radius units.
const VIEWPORT_HALF: f64 = 150.0;

/// Braille dots per cell, vertically. Horizontally it is 2, and a square
/// area is twice as many cells wide as tall, so both axes get `4 * height`.
const DOTS_PER_ROW: f64 = 4.0;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole screen.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // circle
        Constraint::Length(1), // phase sequence
        Constraint::Length(1), // controls
        Constraint::Length(1), // help
    ])
    .split(frame.area());

    let timer = &app.timer;
    let circle = CircleFrame::new(timer.phase(), timer.progress());

    frame.render_widget(render_title(timer), chunks[0]);
    render_circle(&circle, frame, chunks[1]);
    frame.render_widget(render_sequence(timer), chunks[2]);
    frame.render_widget(render_controls(timer), chunks[3]);
    frame.render_widget(render_help(), chunks[4]);
}

// ============================================================================
// CIRCLE
// ============================================================================

/// Solid disc centered on the origin.
struct Disc {
    radius: f64,
    color: Color,
    /// Sampling step in canvas units; at most half a dot so none is skipped.
    step: f64,
}

impl Disc {
    /// Disc sized for a square area `height` cells tall.
    fn for_height(radius: f64, color: Color, height: u16) -> Self {
        let dots = DOTS_PER_ROW * f64::from(height.max(1));
        Disc {
            radius,
            color,
            step: 2.0 * VIEWPORT_HALF / dots / 2.0,
        }
    }
}

impl Shape for Disc {
    fn draw(&self, painter: &mut Painter) {
        let r2 = self.radius * self.radius;
        let mut y = -self.radius;
        while y <= self.radius {
            let half = (r2 - y * y).max(0.0).sqrt();
            let mut x = -half;
            while x <= half {
                if let Some((px, py)) = painter.get_point(x, y) {
                    painter.paint(px, py, self.color);
                }
                x += self.step;
            }
            y += self.step;
        }
    }
}

/// Largest area inside `area` that displays as a square.
///
/// Terminal cells are roughly twice as tall as they are wide.
fn square_area(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_circle(circle: &CircleFrame, frame: &mut Frame, area: Rect) {
    let square = square_area(area);
    if square.height == 0 {
        return;
    }

    let fill = theme::circle_fill(circle.color);
    let radius = circle.radius;
    let disc = Disc::for_height(radius, fill, square.height);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(theme::BACKGROUND)
        .x_bounds([-VIEWPORT_HALF, VIEWPORT_HALF])
        .y_bounds([-VIEWPORT_HALF, VIEWPORT_HALF])
        .paint(move |ctx| {
            ctx.draw(&disc);
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius,
                color: fill,
            });
        });
    frame.render_widget(canvas, square);

    let label_area = Rect {
        y: square.y + square.height / 2,
        height: 1,
        ..square
    };
    let label = Paragraph::new(Span::styled(circle.label, theme::STYLE_LABEL))
        .alignment(Alignment::Center);
    frame.render_widget(label, label_area);
}

// ============================================================================
// CHROME
// ============================================================================

fn render_title(timer: &PhaseTimer) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled("breathing-circle", theme::STYLE_TITLE),
        Span::styled(format!("  {} breathing", timer.mode()), theme::STYLE_DIM),
    ]))
}

/// Phases of the active mode with their durations; current one emphasized.
fn render_sequence(timer: &PhaseTimer) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (i, phase) in timer.mode().sequence().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", theme::STYLE_DIM));
        }
        let text = format!(
            "{} {}",
            phase_label(*phase),
            format_seconds(timer.phase_duration(*phase))
        );
        let style = if *phase == timer.phase() {
            theme::STYLE_TITLE
        } else {
            theme::STYLE_DIM
        };
        spans.push(Span::styled(text, style));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

fn render_controls(timer: &PhaseTimer) -> Paragraph<'static> {
    let run = if timer.is_running() { " Stop " } else { " Start " };
    Paragraph::new(Line::from(vec![
        Span::styled(run, theme::STYLE_RUN_BUTTON),
        Span::raw("   "),
        Span::styled(format!(" Mode: {} ", timer.mode()), theme::STYLE_MODE_BUTTON),
    ]))
    .alignment(Alignment::Center)
}

fn render_help() -> Paragraph<'static> {
    Paragraph::new(Span::styled(
        "[Space] start/stop  [m] mode  [q] quit",
        theme::STYLE_HELP,
    ))
}

/// "4s" for whole seconds, "4.5s" otherwise.
fn format_seconds(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circle::{phase_color, COLOR_INHALE};
    use crate::types::{DurationTable, Mode, Phase};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Instant;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 30);
        Terminal::new(backend).unwrap()
    }

    fn idle_app(mode: Mode) -> App {
        App::new(DurationTable::default(), mode, Instant::now())
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn idle_screen_shows_start_and_mode() {
        let mut terminal = make_terminal();
        let app = idle_app(Mode::Normal);
        terminal.draw(|frame| render(&app, frame)).unwrap();

        let content = screen_text(&terminal);
        assert!(content.contains("Inhale"));
        assert!(content.contains("Start"));
        assert!(content.contains("Mode: Normal"));
    }

    #[test]
    fn running_screen_offers_stop() {
        let mut terminal = make_terminal();
        let mut app = idle_app(Mode::Normal);
        app.timer.set_running(true, Instant::now());
        terminal.draw(|frame| render(&app, frame)).unwrap();

        let content = screen_text(&terminal);
        assert!(content.contains("Stop"));
        assert!(!content.contains("Start"));
    }

    #[test]
    fn box_hold2_shows_hold_label() {
        let mut terminal = make_terminal();
        let mut app = idle_app(Mode::Box);
        let now = Instant::now();
        app.timer.set_running(true, now);
        app.timer.start_phase(Phase::Hold2, now);
        terminal.draw(|frame| render(&app, frame)).unwrap();

        let content = screen_text(&terminal);
        assert!(content.contains("Hold"));
        assert!(content.contains("Mode: Box"));
    }

    #[test]
    fn sequence_strip_lists_mode_durations() {
        let mut terminal = make_terminal();
        let app = idle_app(Mode::Normal);
        terminal.draw(|frame| render(&app, frame)).unwrap();

        let content = screen_text(&terminal);
        assert!(content.contains("Inhale 4s"));
        assert!(content.contains("Exhale 6s"));
    }

    #[test]
    fn circle_painted_in_blended_phase_color() {
        let mut terminal = make_terminal();
        let app = idle_app(Mode::Normal);
        terminal.draw(|frame| render(&app, frame)).unwrap();

        let expected = theme::circle_fill(COLOR_INHALE);
        let painted = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .any(|cell| cell.fg == expected);
        assert!(painted, "circle should use the blended inhale color");
        assert_eq!(phase_color(Phase::Inhale), COLOR_INHALE);
    }

    #[test]
    fn every_phase_renders_without_panic() {
        let mut terminal = make_terminal();
        let now = Instant::now();
        for phase in Mode::Box.sequence() {
            let mut app = idle_app(Mode::Box);
            app.timer.set_running(true, now);
            app.timer.start_phase(*phase, now);
            terminal
                .draw(|frame| render(&app, frame))
                .expect("every phase should render");
        }
    }

    /// Braille cells in the middle of the circle area, skipping the label row.
    fn inner_cells(terminal: &Terminal<TestBackend>, width: u16, height: u16) -> Vec<String> {
        // Same split as `render`: title row above, three rows below
        let square = square_area(Rect::new(0, 1, width, height - 4));
        let label_row = square.y + square.height / 2;
        let buffer = terminal.backend().buffer();
        let mut cells = Vec::new();
        for y in square.y + square.height * 3 / 10..square.y + square.height * 7 / 10 {
            if y == label_row {
                continue;
            }
            for x in square.x + square.width * 3 / 10..square.x + square.width * 7 / 10 {
                cells.push(buffer[(x, y)].symbol().to_string());
            }
        }
        cells
    }

    #[test]
    fn disc_is_solid_on_large_terminals() {
        let now = Instant::now();
        for (width, height) in [(80, 30), (200, 90), (300, 130)] {
            let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
            let mut app = idle_app(Mode::Normal);
            app.timer.set_running(true, now);
            app.timer.start_phase(Phase::Hold1, now);
            terminal.draw(|frame| render(&app, frame)).unwrap();

            let cells = inner_cells(&terminal, width, height);
            assert!(!cells.is_empty());
            let gaps = cells.iter().filter(|c| c.as_str() != "⣿").count();
            assert_eq!(gaps, 0, "{}x{}: {} partial cells inside the disc", width, height, gaps);
        }
    }

    #[test]
    fn fill_step_shrinks_with_height() {
        let small = Disc::for_height(100.0, COLOR_INHALE, 20);
        let large = Disc::for_height(100.0, COLOR_INHALE, 120);
        assert!(large.step < small.step);
        // Half of one dot pitch: 300 units over 480 dots
        assert!((large.step - 300.0 / 480.0 / 2.0).abs() < 1e-12);
        assert!(Disc::for_height(100.0, COLOR_INHALE, 0).step.is_finite());
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let backend = TestBackend::new(6, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = idle_app(Mode::Normal);
        terminal
            .draw(|frame| render(&app, frame))
            .expect("tiny terminal should render");
    }

    #[test]
    fn square_area_is_twice_as_wide_as_tall() {
        let sq = square_area(Rect::new(0, 0, 100, 20));
        assert_eq!(sq.height, 20);
        assert_eq!(sq.width, 40);
        assert_eq!(sq.x, 30);

        let narrow = square_area(Rect::new(0, 0, 10, 20));
        assert_eq!(narrow, Rect::new(0, 7, 10, 5));
    }

    #[test]
    fn seconds_formatting() {
        assert_eq!(format_seconds(Duration::from_millis(4000)), "4s");
        assert_eq!(format_seconds(Duration::from_millis(4500)), "4.5s");
    }
}
