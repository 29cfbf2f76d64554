//! Ports Layer - Trait seams for the monitor's external collaborators
//!
//! Following the hexagonal split, these traits abstract the three I/O edges
//! the core never touches directly:
//! - Page fetching (headless-browser-ish settled-content retrieval)
//! - HTML-to-snapshot extraction
//! - AI narrative generation

pub mod extractor;
pub mod mocks;
pub mod narrative;
pub mod page_source;

pub use extractor::SnapshotExtractor;
pub use narrative::{NarrativeError, NarrativeGenerator};
pub use page_source::{PageSource, SourceError};
