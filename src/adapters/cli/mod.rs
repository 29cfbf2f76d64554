//! CLI Adapter
//!
//! Command-line interface for the agentwatch monitor.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, RateCmd, RunCmd, ScanCmd};
