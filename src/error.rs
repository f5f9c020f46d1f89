//! Error types for breathing-circle.
//!
//! The pacing core is infallible; only the host surface (config loading,
//! log file, terminal) can fail.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Mode, Phase};

/// Errors loading or validating the pacing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A phase was configured with a zero-length duration.
    #[error("{phase} duration in {mode} mode must be greater than zero")]
    ZeroDuration { mode: Mode, phase: Phase },

    /// Frame rate outside the supported range.
    #[error("frame rate {0} out of range (1-240)")]
    FrameRate(u32),
}

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot open log file {}: {source}", path.display())]
    Logging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
