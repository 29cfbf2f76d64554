//! Domain Layer - Core logic for the agentwatch monitor
//!
//! Pure types and functions with no I/O: token records and snapshots, the
//! quantity parsers, the rating classifier, snapshot diffing and the market
//! summarizer. All external interactions happen through the ports layer.

pub mod changes;
pub mod quantity;
pub mod rating;
pub mod summary;
pub mod token;

pub use changes::{diff, ChangeSet};
pub use quantity::{parse_age_minutes, parse_market_cap, DEFAULT_AGE_MINUTES, DEFAULT_MARKET_CAP};
pub use rating::{classify, display_glyph, Rating};
pub use summary::{market_status, summarize, MarketSummary, PromisingToken, TopCapEntry};
pub use token::{AgentToken, Snapshot, NO_DESCRIPTION, UNKNOWN_CREATOR};
