//! Domain types for breathing-circle.
//!
//! Modes, phases, and the per-mode duration table. Pure data; the timer
//! and renderer both program against these.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Duration used for any phase missing from the active table.
pub const DEFAULT_PHASE_MS: u64 = 4000;

/// Smallest circle radius, in canvas units (fully exhaled).
pub const MIN_RADIUS: f64 = 60.0;

/// Largest circle radius, in canvas units (fully inhaled).
pub const MAX_RADIUS: f64 = 120.0;

/// Default display refresh rate for the frame driver.
pub const DEFAULT_FPS: u32 = 60;

const NORMAL_SEQUENCE: [Phase; 3] = [Phase::Inhale, Phase::Hold1, Phase::Exhale];
const BOX_SEQUENCE: [Phase; 4] = [Phase::Inhale, Phase::Hold1, Phase::Exhale, Phase::Hold2];

// ============================================================================
// ENUMS
// ============================================================================

/// Breathing pattern: which phase sequence and durations apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Inhale, hold, exhale.
    #[default]
    Normal,
    /// Four equal sides: inhale, hold, exhale, hold.
    Box,
}

impl Mode {
    /// The cyclic phase sequence for this mode.
    pub fn sequence(self) -> &'static [Phase] {
        match self {
            Mode::Normal => &NORMAL_SEQUENCE,
            Mode::Box => &BOX_SEQUENCE,
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Normal => Mode::Box,
            Mode::Box => Mode::Normal,
        }
    }

    /// Whether `phase` belongs to this mode's sequence.
    pub fn contains(self, phase: Phase) -> bool {
        self.sequence().contains(&phase)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "Normal"),
            Mode::Box => write!(f, "Box"),
        }
    }
}

/// One named segment of the breathing cycle.
///
/// `Hold2` only appears in box mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Inhale,
    Hold1,
    Exhale,
    Hold2,
}

impl Phase {
    /// Lowercase identifier, as used in config files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Inhale => "inhale",
            Phase::Hold1 => "hold1",
            Phase::Exhale => "exhale",
            Phase::Hold2 => "hold2",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DURATION TABLE
// ============================================================================

/// Phase durations in milliseconds for one mode.
///
/// Phases missing from the map fall back to [`DEFAULT_PHASE_MS`].
pub type PhaseDurations = BTreeMap<Phase, u64>;

/// Per-mode duration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationTable {
    pub normal: PhaseDurations,
    #[serde(rename = "box")]
    pub box_: PhaseDurations,
}

impl DurationTable {
    /// Durations for `mode`.
    pub fn for_mode(&self, mode: Mode) -> &PhaseDurations {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Box => &self.box_,
        }
    }

    /// Duration of `phase` under `mode`, defaulting to 4000 ms.
    pub fn duration(&self, mode: Mode, phase: Phase) -> Duration {
        let ms = self
            .for_mode(mode)
            .get(&phase)
            .copied()
            .unwrap_or(DEFAULT_PHASE_MS);
        Duration::from_millis(ms)
    }
}

impl Default for DurationTable {
    fn default() -> Self {
        Self {
            normal: BTreeMap::from([
                (Phase::Inhale, 4000),
                (Phase::Hold1, 4000),
                (Phase::Exhale, 6000),
            ]),
            box_: BTreeMap::from([
                (Phase::Inhale, 4000),
                (Phase::Hold1, 4000),
                (Phase::Exhale, 4000),
                (Phase::Hold2, 4000),
            ]),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
