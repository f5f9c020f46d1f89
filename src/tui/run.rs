//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the timer, the
//! frame scheduler and the view to the real terminal via crossterm and
//! ratatui.
//!
//! Architecture: two producer threads feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key events
//! - Frame driver thread: emits a refresh at the configured frame rate
//! The event loop drains the channel between draws, coalescing backlogged
//! refreshes into one, and is the only mutator.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info, trace};

use crate::config::PacingConfig;
use crate::error::AppError;
use crate::types::Mode;

use super::state::{Action, App, AppEvent};
use super::update::apply;
use super::view::render;

/// Startup options for the TUI.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: PacingConfig,
    pub mode: Mode,
    /// Press Start immediately.
    pub autostart: bool,
}

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('s') | KeyCode::Enter => Some(Action::ToggleRunning),
        KeyCode::Char('m') | KeyCode::Char('b') | KeyCode::Tab => Some(Action::ToggleMode),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Forward key and resize events to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                Ok(Event::Resize(..)) => tx.send(AppEvent::Resize),
                Ok(_) => Ok(()), // ignore mouse, focus, paste
                Err(_) => break,
            };
            if forwarded.is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

/// Emit a refresh every `interval` until the receiver goes away.
fn spawn_frame_driver(interval: Duration, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            thread::sleep(interval);
            if tx.send(AppEvent::Frame(Instant::now())).is_err() {
                break;
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Handle one event. Returns false when nothing visible changed.
pub fn handle_event(app: &mut App, event: AppEvent) -> bool {
    match event {
        AppEvent::Key(key) => match map_key(key) {
            Some(action) => {
                apply(app, action, Instant::now());
                true
            }
            None => false,
        },
        AppEvent::Frame(now) => {
            if app.scheduler.is_idle() {
                return false;
            }
            let report = app.scheduler.run_frame(&mut app.timer, now);
            if report.stale > 0 {
                trace!(stale = report.stale, "dropped stale frame requests");
            }
            report.applied > 0
        }
        AppEvent::Resize => true,
    }
}

/// Collapse a drained batch to at most one refresh.
///
/// Keys and resizes keep their order; only the newest `Frame` survives and
/// runs last, so a slow draw never replays a backlog of old instants.
pub fn coalesce_frames(events: Vec<AppEvent>) -> Vec<AppEvent> {
    let mut latest: Option<Instant> = None;
    let mut dropped = 0usize;
    let mut kept: Vec<AppEvent> = Vec::with_capacity(events.len());
    for event in events {
        match event {
            AppEvent::Frame(at) => {
                if latest.replace(at).is_some() {
                    dropped += 1;
                }
            }
            other => kept.push(other),
        }
    }
    if dropped > 0 {
        trace!(dropped, "coalesced backlogged frames");
    }
    kept.extend(latest.map(AppEvent::Frame));
    kept
}

/// Handle everything received since the last draw.
///
/// Returns true when a redraw is needed.
pub fn handle_batch(app: &mut App, events: Vec<AppEvent>) -> bool {
    let mut dirty = false;
    for event in coalesce_frames(events) {
        dirty |= handle_event(app, event);
    }
    dirty
}

/// Run the TUI until the user quits.
pub fn run(options: RunOptions) -> Result<(), AppError> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let now = Instant::now();
    let mut app = App::new(options.config.durations.clone(), options.mode, now);
    if options.autostart {
        apply(&mut app, Action::ToggleRunning, now);
    }

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx.clone());
    spawn_frame_driver(options.config.frame_interval(), tx);

    info!(mode = %options.mode, fps = options.config.fps, "pacer started");

    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| render(&app, frame))?;
        }

        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };
        let mut batch = vec![event];
        batch.extend(rx.try_iter());
        dirty = handle_batch(&mut app, batch);
    }

    debug!("restoring terminal");
    restore_terminal()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DurationTable, Phase};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::Quit));
    }

    #[test]
    fn space_toggles_running() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(Action::ToggleRunning));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(Action::ToggleRunning));
    }

    #[test]
    fn m_toggles_mode() {
        assert_eq!(map_key(press(KeyCode::Char('m'))), Some(Action::ToggleMode));
        assert_eq!(map_key(press(KeyCode::Tab)), Some(Action::ToggleMode));
    }

    #[test]
    fn q_and_esc_quit() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Action::Quit));
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = press(KeyCode::Char(' '));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn idle_frame_needs_no_redraw() {
        let mut app = App::new(DurationTable::default(), Mode::Normal, Instant::now());
        assert!(!handle_event(&mut app, AppEvent::Frame(Instant::now())));
    }

    #[test]
    fn frames_drive_running_timer() {
        let t0 = Instant::now();
        let mut app = App::new(DurationTable::default(), Mode::Normal, t0);
        apply(&mut app, Action::ToggleRunning, t0);

        assert!(handle_event(&mut app, AppEvent::Frame(t0 + Duration::from_millis(1000))));
        assert!(app.timer.progress() > 0.0);

        handle_event(&mut app, AppEvent::Frame(t0 + Duration::from_millis(4000)));
        assert_eq!(app.timer.phase(), Phase::Hold1);
    }

    #[test]
    fn backlog_of_frames_ticks_once_at_newest_instant() {
        let t0 = Instant::now();
        let mut app = App::new(DurationTable::default(), Mode::Normal, t0);
        apply(&mut app, Action::ToggleRunning, t0);

        let batch = vec![
            AppEvent::Frame(t0 + Duration::from_millis(3990)),
            AppEvent::Frame(t0 + Duration::from_millis(4000)),
            AppEvent::Frame(t0 + Duration::from_millis(4010)),
        ];
        assert!(handle_batch(&mut app, batch));

        // One tick at 4010 enters hold1 fresh. Replaying each frame would
        // have entered it at 4000 and already advanced it by 10ms.
        assert_eq!(app.timer.phase(), Phase::Hold1);
        assert_eq!(app.timer.progress(), 0.0);
        assert_eq!(app.scheduler.pending(), 1);
    }

    #[test]
    fn coalescing_keeps_keys_in_order_and_one_frame_last() {
        let t0 = Instant::now();
        let newest = t0 + Duration::from_millis(32);
        let events = coalesce_frames(vec![
            AppEvent::Frame(t0),
            AppEvent::Key(press(KeyCode::Char('m'))),
            AppEvent::Frame(t0 + Duration::from_millis(16)),
            AppEvent::Key(press(KeyCode::Char(' '))),
            AppEvent::Frame(newest),
        ]);

        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], AppEvent::Key(k) if k.code == KeyCode::Char('m')));
        assert!(matches!(&events[1], AppEvent::Key(k) if k.code == KeyCode::Char(' ')));
        assert!(matches!(events[2], AppEvent::Frame(at) if at == newest));
    }

    #[test]
    fn batch_without_frames_passes_through() {
        let events = coalesce_frames(vec![AppEvent::Resize]);
        assert!(matches!(events.as_slice(), [AppEvent::Resize]));
        assert!(coalesce_frames(Vec::new()).is_empty());
    }

    #[test]
    fn quit_key_sets_flag() {
        let mut app = App::new(DurationTable::default(), Mode::Normal, Instant::now());
        handle_event(&mut app, AppEvent::Key(press(KeyCode::Char('q'))));
        assert!(app.should_quit);
    }
}
