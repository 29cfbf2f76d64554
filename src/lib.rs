//! Agentwatch - fun.virtuals.io agent token monitor library
//!
//! Polls the fun.virtuals.io listing page, extracts agent token records,
//! rates them, detects changes between polls, and reports market summaries.
//!
//! # Modules
//!
//! - `domain`: Core logic (parsing, rating, snapshot diffing, summarizing)
//! - `ports`: Trait abstractions (PageSource, SnapshotExtractor, NarrativeGenerator)
//! - `adapters`: External implementations (virtuals.io, OpenAI, update log, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Orchestrator and analyst use cases

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
