//! Pending frame requests, serviced once per display refresh.
//!
//! Stands in for an animation-frame callback list: requests are queued
//! and the whole queue is handed to the timer on the next refresh. The
//! queue never filters anything itself; stale requests are rejected by
//! the timer's generation check.

use std::time::Instant;

use crate::timer::{FrameRequest, PhaseTimer, TickOutcome};

/// FIFO of requests waiting for the next refresh.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Vec<FrameRequest>,
}

/// Summary of one refresh.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameReport {
    /// Requests that drove the timer.
    pub applied: usize,
    /// Requests dropped by the generation check.
    pub stale: usize,
    /// Phase changes that happened during this refresh.
    pub advanced: usize,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, request: FrameRequest) {
        self.pending.push(request);
    }

    /// Queue `request` if there is one.
    pub fn request_opt(&mut self, request: Option<FrameRequest>) {
        if let Some(request) = request {
            self.request(request);
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deliver every queued request to `timer` at `now`.
    ///
    /// Follow-up requests returned by the timer are queued for the next
    /// refresh, not serviced in this one.
    pub fn run_frame(&mut self, timer: &mut PhaseTimer, now: Instant) -> FrameReport {
        let mut report = FrameReport::default();
        for request in std::mem::take(&mut self.pending) {
            let outcome = timer.tick(request, now);
            match outcome {
                TickOutcome::Stale => report.stale += 1,
                TickOutcome::Progressed { .. } => report.applied += 1,
                TickOutcome::Advanced { .. } => {
                    report.applied += 1;
                    report.advanced += 1;
                }
            }
            self.request_opt(outcome.next_request());
        }
        report
    }
}
