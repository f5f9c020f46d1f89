//! breathing-circle CLI
//!
//! Full-screen breathing pacer: a circle that grows on the inhale and
//! shrinks on the exhale.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use breathing_circle::config::{resolve_config, validate_fps};
use breathing_circle::error::AppError;
use breathing_circle::logging::init_logging;
use breathing_circle::tui::run::{run, RunOptions};
use breathing_circle::types::Mode;

#[derive(Parser)]
#[command(name = "breathing-circle")]
#[command(about = "Animated breathing pacer for the terminal")]
#[command(version)]
struct Cli {
    /// Start in box breathing mode (4-4-4-4)
    #[arg(long = "box")]
    box_mode: bool,

    /// Start pacing immediately instead of waiting for Space
    #[arg(long)]
    start: bool,

    /// Animation frame rate (overrides the config file)
    #[arg(long)]
    fps: Option<u32>,

    /// Pacing config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cmd_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_run(cli: Cli) -> Result<(), AppError> {
    init_logging(cli.log_file.as_deref(), cli.verbose)?;

    let mut config = resolve_config(cli.config.as_deref())?;
    if let Some(fps) = cli.fps {
        validate_fps(fps)?;
        config.fps = fps;
    }

    let mode = if cli.box_mode { Mode::Box } else { Mode::Normal };

    run(RunOptions {
        config,
        mode,
        autostart: cli.start,
    })
}
