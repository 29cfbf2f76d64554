//! Change Detector
//!
//! Diffs two snapshots into newly appeared, changed and disappeared tokens.
//! Pure over shared references; the orchestrator alone decides when the
//! previous snapshot is replaced.

use super::token::{AgentToken, Snapshot};

/// The three change categories derived from comparing two snapshots.
///
/// `new` and `updated` carry full current records in current-snapshot order;
/// `removed` carries only the names, in previous-snapshot order - the stale
/// records themselves are no longer interesting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    pub new: Vec<AgentToken>,
    pub updated: Vec<AgentToken>,
    pub removed: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Compute the change set between the current and previous snapshots.
///
/// A token counts as updated when any field differs under full value
/// equality - the age text alone ticking over is enough.
pub fn diff(current: &Snapshot, previous: &Snapshot) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for token in current.iter() {
        match previous.get(&token.name) {
            None => changes.new.push(token.clone()),
            Some(old) if old != token => changes.updated.push(token.clone()),
            Some(_) => {}
        }
    }

    for token in previous.iter() {
        if !current.contains(&token.name) {
            changes.removed.push(token.name.clone());
        }
    }

    changes
}
