//! Append-only update log.
//!
//! Persists per-cycle output to a human-readable text file: a timestamp
//! header, itemized new/updated/removed records with their analyses, and the
//! full market summary. Append only, never rewritten, no schema guarantees.
//! Selected content is mirrored to the console for the operator; the file is
//! the authoritative copy.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::{AgentToken, ChangeSet};

/// Writer for the append-only updates log.
pub struct UpdateLog {
    path: PathBuf,
}

impl UpdateLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())
    }

    fn record_block(token: &AgentToken) -> String {
        format!(
            "\n- {} ({})\n  Market Cap: {}\n  Creator: {}\n  Time: {}\n  Description: {}\n",
            token.name,
            token.symbol,
            token.market_cap,
            token.creator,
            token.age_text,
            token.description,
        )
    }

    /// Write the startup block: the given recent records plus the summary.
    pub fn log_initial(&self, recent: &[&AgentToken], summary: &str) -> io::Result<()> {
        let mut block = format!(
            "\n=== Initial State at {} ===\n",
            Local::now().to_rfc3339()
        );
        for token in recent {
            block.push_str(&Self::record_block(token));
        }
        block.push('\n');
        block.push_str(summary);
        block.push('\n');
        self.append(&block)
    }

    /// Write one change-cycle block. `new_analyses` is parallel to
    /// `changes.new`; records whose analysis is missing are still logged.
    pub fn log_changes(
        &self,
        changes: &ChangeSet,
        new_analyses: &[String],
        summary: &str,
    ) -> io::Result<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut block = format!(
            "\n=== Changes detected at {} ===\n",
            Local::now().to_rfc3339()
        );

        if !changes.new.is_empty() {
            block.push_str("\nNew Agents:\n");
            for (i, token) in changes.new.iter().enumerate() {
                block.push_str(&Self::record_block(token));
                if let Some(analysis) = new_analyses.get(i) {
                    block.push_str(&format!("  Initial Analysis:\n{}\n", analysis));
                }
                block.push_str(&format!("{}\n", "-".repeat(50)));
            }
        }

        if !changes.updated.is_empty() {
            block.push_str("\nUpdated Agents:\n");
            for token in &changes.updated {
                block.push_str(&format!(
                    "- {} ({})\n  Market Cap: {}\n  Time: {}\n",
                    token.name, token.symbol, token.market_cap, token.age_text,
                ));
            }
        }

        if !changes.removed.is_empty() {
            block.push_str("\nRemoved Agents:\n");
            for name in &changes.removed {
                block.push_str(&format!("- {}\n", name));
            }
        }

        block.push('\n');
        block.push_str(summary);
        block.push('\n');
        self.append(&block)
    }

    /// Console mirror of newly detected agents.
    pub fn print_new_agents(changes: &ChangeSet) {
        if changes.new.is_empty() {
            return;
        }
        println!("\n\u{1F195} New Agents Detected:");
        for token in &changes.new {
            println!("\n{}", "-".repeat(30));
            println!("Name: {} ({})", token.name, token.symbol);
            println!("Market Cap: {}", token.market_cap);
            println!("Creator: {}", token.creator);
            println!("Time: {}", token.age_text);
            println!("Description: {}", token.description);
        }
    }
}
