//! State transitions: (PhaseTimer, Action) → Transition.
//!
//! Testable without a terminal. The clock is passed in, never read here.

use std::time::Instant;

use tracing::info;

use crate::timer::PhaseTimer;

use super::state::{Action, App, Transition};

/// Apply a user action to the timer.
pub fn update(timer: &mut PhaseTimer, action: Action, now: Instant) -> Transition {
    match action {
        Action::ToggleRunning => {
            let request = timer.toggle_running(now);
            info!(running = timer.is_running(), phase = %timer.phase(), "toggled running");
            request.into()
        }
        Action::ToggleMode => {
            let request = timer.toggle_mode(now);
            info!(mode = %timer.mode(), phase = %timer.phase(), "toggled mode");
            request.into()
        }
        Action::Quit => Transition::Quit,
    }
}

/// Apply an action to the app, routing the transition to the scheduler.
pub fn apply(app: &mut App, action: Action, now: Instant) {
    match update(&mut app.timer, action, now) {
        Transition::Stay => {}
        Transition::Schedule(request) => app.scheduler.request(request),
        Transition::Quit => app.should_quit = true,
    }
}

// ============================================================================
// TESTS
// ============================================================================
