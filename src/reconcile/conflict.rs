//! Conflict records.
//!
//! A [`Conflict`] pairs the two sides' deltas from the ancestor at a point
//! of irreconcilable divergence. Both lists are non-empty by construction,
//! and every change in either list lives at or under a single root path.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reconcile::change::Change;

/// Divergence that the selected mode refuses to merge automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Alpha's changes relative to the ancestor.
    pub alpha_changes: Vec<Change>,
    /// Beta's changes relative to the ancestor.
    pub beta_changes: Vec<Change>,
}

impl Conflict {
    /// The root of the conflict: the shortest path that is a prefix of
    /// every change on either side.
    ///
    /// The reconciler always emits at least one change at the divergence
    /// point itself, so this is simply the shortest recorded path.
    pub fn root(&self) -> &str {
        self.alpha_changes
            .iter()
            .chain(&self.beta_changes)
            .map(|change| change.path.as_str())
            .min_by_key(|path| path.len())
            .unwrap_or("")
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root();
        let root = if root.is_empty() { "<root>" } else { root };
        write!(
            f,
            "conflict at {root}: {} alpha change(s) vs {} beta change(s)",
            self.alpha_changes.len(),
            self.beta_changes.len(),
        )
    }
}
