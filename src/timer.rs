//! Phase timer: drives eased progress through the breathing cycle.
//!
//! The timer never schedules anything itself. Starting a phase hands back a
//! [`FrameRequest`] stamped with the current session generation; the host
//! delivers it on the next display refresh via [`PhaseTimer::tick`]. Any
//! stop, restart, or mode switch bumps the generation, so requests issued
//! before it become no-ops instead of a second timer driving progress.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::easing::ease_in_out_sine;
use crate::types::{DurationTable, Mode, Phase};

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// Cyclic successor of `phase` within `mode`'s sequence.
///
/// A phase absent from the sequence (hold2 under normal mode) restarts the
/// cycle at its first phase.
pub fn next_phase(mode: Mode, phase: Phase) -> Phase {
    let seq = mode.sequence();
    match seq.iter().position(|p| *p == phase) {
        Some(idx) => seq[(idx + 1) % seq.len()],
        None => seq[0],
    }
}

/// Linear completion of a phase: `min(elapsed / duration, 1)`.
///
/// A zero-length phase is complete immediately.
pub fn linear_fraction(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

// ============================================================================
// SESSION
// ============================================================================

/// Ownership record for the one live timer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerSession {
    /// Incremented on every start, stop, and mode switch.
    pub generation: u64,
    /// When the current phase began. None before the first start.
    pub started_at: Option<Instant>,
    pub cancelled: bool,
}

/// Ticket for one pending per-frame update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    pub generation: u64,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Request belonged to a superseded or cancelled session. Nothing changed.
    Stale,
    /// Progress advanced within the current phase. Deliver `next` next frame.
    Progressed { progress: f64, next: FrameRequest },
    /// Phase completed and the timer moved to `phase`.
    Advanced { phase: Phase, next: FrameRequest },
}

impl TickOutcome {
    /// The request to schedule for the following frame, if any.
    pub fn next_request(&self) -> Option<FrameRequest> {
        match self {
            TickOutcome::Stale => None,
            TickOutcome::Progressed { next, .. } | TickOutcome::Advanced { next, .. } => {
                Some(*next)
            }
        }
    }
}

// ============================================================================
// TIMER
// ============================================================================

/// Breathing phase timer.
///
/// Externally observable state is `(mode, phase, progress, running)`.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    mode: Mode,
    phase: Phase,
    progress: f64,
    running: bool,
    session: TimerSession,
    durations: DurationTable,
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new(DurationTable::default())
    }
}

impl PhaseTimer {
    /// Idle timer at inhale, progress 0, normal mode.
    pub fn new(durations: DurationTable) -> Self {
        PhaseTimer {
            mode: Mode::Normal,
            phase: Phase::Inhale,
            progress: 0.0,
            running: false,
            session: TimerSession::default(),
            durations,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Eased completion of the current phase, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    /// Duration of `phase` under the active mode.
    pub fn phase_duration(&self, phase: Phase) -> Duration {
        self.durations.duration(self.mode, phase)
    }

    /// Begin `phase` at `now`, invalidating any outstanding request.
    ///
    /// A phase outside the active sequence starts the sequence's first phase.
    pub fn start_phase(&mut self, phase: Phase, now: Instant) -> FrameRequest {
        let phase = if self.mode.contains(phase) {
            phase
        } else {
            self.mode.sequence()[0]
        };
        self.session.generation += 1;
        self.session.started_at = Some(now);
        self.session.cancelled = false;
        self.phase = phase;
        self.progress = 0.0;

        debug!(
            mode = %self.mode,
            phase = %phase,
            duration_ms = self.phase_duration(phase).as_millis() as u64,
            generation = self.session.generation,
            "phase started"
        );

        FrameRequest {
            generation: self.session.generation,
        }
    }

    /// Per-frame update for `request` at time `now`.
    pub fn tick(&mut self, request: FrameRequest, now: Instant) -> TickOutcome {
        if !self.is_current(request) {
            trace!(
                request = request.generation,
                current = self.session.generation,
                "stale frame request ignored"
            );
            return TickOutcome::Stale;
        }
        let Some(started_at) = self.session.started_at else {
            return TickOutcome::Stale;
        };

        let elapsed = now.saturating_duration_since(started_at);
        let t = linear_fraction(elapsed, self.phase_duration(self.phase));
        self.progress = ease_in_out_sine(t);

        if t < 1.0 {
            TickOutcome::Progressed {
                progress: self.progress,
                next: request,
            }
        } else {
            let phase = next_phase(self.mode, self.phase);
            let next = self.start_phase(phase, now);
            TickOutcome::Advanced { phase, next }
        }
    }

    /// Start or stop. Starting restarts the current phase from zero.
    ///
    /// Returns the request to schedule when the timer was started.
    pub fn set_running(&mut self, running: bool, now: Instant) -> Option<FrameRequest> {
        if running == self.running {
            return None;
        }
        self.running = running;
        if running {
            Some(self.start_phase(self.phase, now))
        } else {
            self.cancel();
            debug!(phase = %self.phase, progress = self.progress, "timer stopped");
            None
        }
    }

    pub fn toggle_running(&mut self, now: Instant) -> Option<FrameRequest> {
        self.set_running(!self.running, now)
    }

    /// Switch mode.
    ///
    /// A phase missing from the new sequence resets to inhale. When running,
    /// the phase restarts with the new mode's duration.
    pub fn set_mode(&mut self, mode: Mode, now: Instant) -> Option<FrameRequest> {
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        self.cancel();

        if !mode.contains(self.phase) {
            debug!(from = %self.phase, %mode, "phase not in new sequence, resetting to inhale");
            self.phase = mode.sequence()[0];
            self.progress = 0.0;
        }

        if self.running {
            Some(self.start_phase(self.phase, now))
        } else {
            None
        }
    }

    pub fn toggle_mode(&mut self, now: Instant) -> Option<FrameRequest> {
        self.set_mode(self.mode.toggled(), now)
    }

    fn cancel(&mut self) {
        self.session.generation += 1;
        self.session.cancelled = true;
    }

    fn is_current(&self, request: FrameRequest) -> bool {
        self.running && !self.session.cancelled && request.generation == self.session.generation
    }
}

// ============================================================================
// TESTS
// ============================================================================
