//! Logging setup.
//!
//! The TUI owns the terminal, so log lines go to a file or nowhere.
//! `BREATHING_CIRCLE_LOG` overrides the verbosity-derived filter.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "BREATHING_CIRCLE_LOG";

/// Maps `-v` count to a tracing directive.
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber writing to `log_file`, appending.
///
/// Without a log file nothing is installed and events are discarded.
/// Uses `try_init()`, so a second call is harmless.
pub fn init_logging(log_file: Option<&Path>, verbosity: u8) -> Result<(), AppError> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::Logging {
            path: path.to_path_buf(),
            source,
        })?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(verbosity >= 2)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn verbosity_saturates_at_trace() {
        assert_eq!(verbosity_to_directive(0), "warn");
        assert_eq!(verbosity_to_directive(1), "info");
        assert_eq!(verbosity_to_directive(2), "debug");
        assert_eq!(verbosity_to_directive(9), "trace");
    }

    #[test]
    fn no_log_file_is_noop() {
        assert!(init_logging(None, 3).is_ok());
    }

    #[test]
    fn creates_log_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pacer.log");
        init_logging(Some(&path), 1).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_location_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("pacer.log");
        assert!(matches!(
            init_logging(Some(&path), 0),
            Err(AppError::Logging { .. })
        ));
    }
}
