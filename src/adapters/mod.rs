//! Adapters
//!
//! Implementations of the port traits against real external systems:
//! the fun.virtuals.io listing page, the OpenAI chat-completions API,
//! the append-only update log, and the CLI surface.

pub mod cli;
pub mod openai;
pub mod update_log;
pub mod virtuals;

pub use openai::OpenAiClient;
pub use update_log::UpdateLog;
pub use virtuals::{FetchConfig, VirtualsClient, VirtualsParser};
