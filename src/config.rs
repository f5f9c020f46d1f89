//! Pacing configuration: phase durations and frame rate.
//!
//! Read-only JSON. Resolution order: explicit path, then the per-user
//! config file if present, then built-in defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::types::{DurationTable, Mode, DEFAULT_FPS};

const APP_DIR: &str = "breathing-circle";
const CONFIG_FILENAME: &str = "config.json";
const MAX_FPS: u32 = 240;

/// Pacing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Display refresh rate driving the animation.
    pub fps: u32,
    pub durations: DurationTable,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            durations: DurationTable::default(),
        }
    }
}

impl PacingConfig {
    /// Reject zero durations and out-of-range frame rates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_fps(self.fps)?;
        for mode in [Mode::Normal, Mode::Box] {
            for (phase, ms) in self.durations.for_mode(mode) {
                if *ms == 0 {
                    return Err(ConfigError::ZeroDuration { mode, phase: *phase });
                }
            }
        }
        Ok(())
    }

    /// Time between frame-driver refreshes.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.max(1)))
    }
}

pub fn validate_fps(fps: u32) -> Result<(), ConfigError> {
    if (1..=MAX_FPS).contains(&fps) {
        Ok(())
    } else {
        Err(ConfigError::FrameRate(fps))
    }
}

/// Per-user config location, e.g. `~/.config/breathing-circle/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Parse and validate a config file.
pub fn load_config(path: &Path) -> Result<PacingConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: PacingConfig =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    info!(path = %path.display(), fps = config.fps, "loaded pacing config");
    Ok(config)
}

/// Resolve the effective config.
///
/// An explicit path must exist. The default location is optional.
pub fn resolve_config(explicit: Option<&Path>) -> Result<PacingConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) => load_optional(&path),
        None => Ok(PacingConfig::default()),
    }
}

fn load_optional(path: &Path) -> Result<PacingConfig, ConfigError> {
    match load_config(path) {
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(PacingConfig::default())
        }
        other => other,
    }
}

// ============================================================================
// TESTS
// ============================================================================
