//! CLI Command Definitions
//!
//! Argument structures for the agentwatch commands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Agentwatch - fun.virtuals.io agent token monitor
#[derive(Parser, Debug)]
#[command(
    name = "agentwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Monitor for agent tokens listed on fun.virtuals.io",
    long_about = "Agentwatch polls the fun.virtuals.io listing page, extracts agent token \
                  records, detects new/updated/removed tokens between polls, and appends \
                  change reports with market summaries to an update log."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the monitoring loop
    Run(RunCmd),

    /// Fetch the page once and print the market summary
    Scan(ScanCmd),

    /// Rate a hypothetical token from market cap and age
    Rate(RateCmd),
}

/// Start monitoring loop
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// One-shot page scan
#[derive(Parser, Debug)]
pub struct ScanCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// Rate a token offline
#[derive(Parser, Debug)]
pub struct RateCmd {
    /// Market cap text as it appears on the page (e.g. "12.5k")
    #[arg(value_name = "MARKET_CAP")]
    pub market_cap: String,

    /// Age text as it appears on the page (e.g. "5 minutes ago")
    #[arg(value_name = "AGE")]
    pub age: String,
}
