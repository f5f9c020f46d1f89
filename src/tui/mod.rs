//! Terminal host for the breathing circle.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: events, actions, transitions
//! - `update`: action handling against the timer
//! - `view`: pure rendering
//! - `run`: effects (terminal, threads, event loop)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
