//! TUI state algebra: events, actions, transitions.
//!
//! The timer itself lives in [`crate::timer`]; this module only adds what
//! the terminal host needs around it (quit flag, pending frame queue).

use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::frame::FrameScheduler;
use crate::timer::{FrameRequest, PhaseTimer};
use crate::types::{DurationTable, Mode};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Two producers feed a single mpsc channel:
/// - A key reader thread sends `Key` variants
/// - The frame driver thread sends `Frame` once per refresh
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Display refresh at the given instant.
    Frame(Instant),
    /// Terminal was resized; redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub timer: PhaseTimer,

    /// Frame requests waiting for the next refresh.
    pub scheduler: FrameScheduler,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    /// Idle app in `mode` with the given durations.
    pub fn new(durations: DurationTable, mode: Mode, now: Instant) -> Self {
        let mut timer = PhaseTimer::new(durations);
        // Not running yet, so this never yields a request
        timer.set_mode(mode, now);
        App {
            timer,
            scheduler: FrameScheduler::new(),
            should_quit: false,
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start/Stop button.
    ToggleRunning,
    /// Mode: Normal / Box button.
    ToggleMode,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of applying an action.
///
/// The effects layer queues any frame request and honors Quit.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// State changed (or not); nothing to schedule.
    Stay,
    /// Queue this request for the next refresh.
    Schedule(FrameRequest),
    Quit,
}

impl From<Option<FrameRequest>> for Transition {
    fn from(request: Option<FrameRequest>) -> Self {
        match request {
            Some(request) => Transition::Schedule(request),
            None => Transition::Stay,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
