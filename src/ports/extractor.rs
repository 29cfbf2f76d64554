//! Extraction port - raw HTML to a token snapshot.

use crate::domain::Snapshot;

/// Turns raw listing HTML into a [`Snapshot`].
///
/// Extraction is infallible by contract: markup with no recognizable token
/// cards yields an empty snapshot, not an error, and a single malformed card
/// is skipped without poisoning the rest.
pub trait SnapshotExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Snapshot;
}
