//! Application Layer
//!
//! Use cases built on the domain and ports: per-token AI analysis and the
//! monitoring orchestrator.

pub mod analyst;
pub mod orchestrator;

pub use analyst::TokenAnalyst;
pub use orchestrator::{MonitorOrchestrator, OrchestratorError};
