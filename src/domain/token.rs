//! Agent Token Records and Snapshots
//!
//! An [`AgentToken`] is one listed token as observed at a single poll of the
//! fun.virtuals.io page. A [`Snapshot`] is the full set of tokens visible at
//! that moment, keyed by name and preserving page order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel used when the creator cell cannot be extracted.
pub const UNKNOWN_CREATOR: &str = "Unknown";

/// Sentinel used when a token card carries no description.
pub const NO_DESCRIPTION: &str = "No description available";

/// One listed agent token at one snapshot time.
///
/// `name` is the identity within a snapshot - the source page has no stable
/// token ID. `market_cap` and `age_text` are kept as the raw page text; the
/// numeric interpretations live in [`crate::domain::quantity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentToken {
    /// Display name, unique key within a snapshot
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
    /// Raw market cap text, e.g. "12.5k" or "800"
    pub market_cap: String,
    /// Creator handle, `UNKNOWN_CREATOR` when absent
    pub creator: String,
    /// Relative creation-age phrase, e.g. "5 minutes ago"
    pub age_text: String,
    /// Free-form description, `NO_DESCRIPTION` when absent
    pub description: String,
}

impl AgentToken {
    /// Description capped at `max` characters with a trailing ellipsis.
    pub fn truncated_description(&self, max: usize) -> String {
        if self.description.chars().count() > max {
            let head: String = self.description.chars().take(max).collect();
            format!("{}...", head)
        } else {
            self.description.clone()
        }
    }
}

/// The full set of tokens visible on the page at one point in time.
///
/// Behaves as a name-keyed map that preserves insertion (page) order. When the
/// same name is inserted twice the later record wins in place - that is the
/// documented collision policy, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    records: Vec<AgentToken>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any existing record with the same name.
    pub fn insert(&mut self, token: AgentToken) {
        match self.index.get(&token.name) {
            Some(&pos) => self.records[pos] = token,
            None => {
                self.index.insert(token.name.clone(), self.records.len());
                self.records.push(token);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&AgentToken> {
        self.index.get(name).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentToken> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<AgentToken> for Snapshot {
    fn from_iter<I: IntoIterator<Item = AgentToken>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for token in iter {
            snapshot.insert(token);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(name: &str, cap: &str) -> AgentToken {
        AgentToken {
            name: name.to_string(),
            symbol: name.to_uppercase(),
            market_cap: cap.to_string(),
            creator: UNKNOWN_CREATOR.to_string(),
            age_text: "5 minutes ago".to_string(),
            description: NO_DESCRIPTION.to_string(),
        }
    }

    #[test]
    fn insert_preserves_order() {
        let mut snap = Snapshot::new();
        snap.insert(token("alpha", "12k"));
        snap.insert(token("beta", "3k"));
        snap.insert(token("gamma", "800"));

        let names: Vec<_> = snap.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
        assert_eq!(snap.len(), 3);
    }

    #[test]
    fn collision_is_last_write_wins_in_place() {
        let mut snap = Snapshot::new();
        snap.insert(token("alpha", "12k"));
        snap.insert(token("beta", "3k"));
        snap.insert(token("alpha", "99k"));

        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get("alpha").unwrap().market_cap, "99k");
        // Position is kept, only the record is replaced
        let names: Vec<_> = snap.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn lookup_and_contains() {
        let snap: Snapshot = vec![token("alpha", "12k")].into_iter().collect();
        assert!(snap.contains("alpha"));
        assert!(!snap.contains("beta"));
        assert!(snap.get("beta").is_none());
    }

    #[test]
    fn truncated_description() {
        let mut t = token("alpha", "12k");
        t.description = "x".repeat(150);
        let short = t.truncated_description(100);
        assert_eq!(short.chars().count(), 103);
        assert!(short.ends_with("..."));

        t.description = "short".to_string();
        assert_eq!(t.truncated_description(100), "short");
    }

    #[test]
    fn empty_snapshot() {
        let snap = Snapshot::new();
        assert!(snap.is_empty());
        assert_eq!(snap.len(), 0);
        assert_eq!(snap.iter().count(), 0);
    }
}
