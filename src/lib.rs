//! Baker - a two-pane terminal dashboard for build commands
//!
//! This library provides the command registry, the process executor that
//! captures command output, and the terminal UI that ties them together.

pub mod command;
pub mod ui;
