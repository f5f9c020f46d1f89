//! breathing-circle: an animated breathing pacer for the terminal.

pub mod circle;
pub mod config;
pub mod easing;
pub mod error;
pub mod frame;
pub mod logging;
pub mod timer;
pub mod tui;
pub mod types;
