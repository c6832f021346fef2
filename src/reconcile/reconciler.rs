//! Three-way reconciliation.
//!
//! [`reconcile`] walks the ancestor, alpha, and beta snapshots in lockstep
//! and decomposes their divergence into four lists: changes that advance the
//! ancestor, changes to apply on alpha, changes to apply on beta, and
//! conflicts the selected [`SyncMode`] refuses to merge. The walk is pure:
//! it reads only its arguments and owns everything it returns.
//!
//! At each node the classification is:
//!
//! 1. Alpha and beta agree: only the ancestor can lag; advance it.
//! 2. Both sides hold directories: recurse child by child over the union
//!    of names.
//! 3. Anything else is divergence, resolved by the mode policy: propagate
//!    the unchanged side, let alpha win, or record a conflict.
//!
//! Divergence where one side's delta from the ancestor is purely deletions
//! is resolved by overwriting that side: deletions carry no content that
//! could be lost.

use std::collections::BTreeSet;

use tracing::debug;

use crate::reconcile::change::{Change, non_deletion_changes_only};
use crate::reconcile::conflict::Conflict;
use crate::reconcile::diff::diff;
use crate::reconcile::mode::SyncMode;
use crate::reconcile::path;
use crate::snapshot::Entry;

// =============================================================================
// Reconciliation
// =============================================================================

/// The outcome of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// Changes that advance the session's ancestor snapshot.
    pub ancestor_changes: Vec<Change>,
    /// Changes to apply on the alpha endpoint.
    pub alpha_changes: Vec<Change>,
    /// Changes to apply on the beta endpoint.
    pub beta_changes: Vec<Change>,
    /// Divergence the mode refused to merge.
    pub conflicts: Vec<Conflict>,
}

impl Reconciliation {
    /// Returns true if reconciliation found nothing to do: no changes on
    /// any list and no conflicts.
    pub fn is_empty(&self) -> bool {
        self.ancestor_changes.is_empty()
            && self.alpha_changes.is_empty()
            && self.beta_changes.is_empty()
            && self.conflicts.is_empty()
    }
}

// =============================================================================
// reconcile
// =============================================================================

/// Reconcile the alpha and beta snapshots against their shared ancestor
/// under the given mode.
///
/// The result's side changes reference current values: the old value of
/// every alpha or beta change equals what that endpoint currently holds at
/// the change's path. Conflicted paths receive no side changes at all.
pub fn reconcile(
    ancestor: Option<&Entry>,
    alpha: Option<&Entry>,
    beta: Option<&Entry>,
    mode: SyncMode,
) -> Reconciliation {
    let mut reconciler = Reconciler {
        mode,
        result: Reconciliation::default(),
    };
    reconciler.reconcile_node("", ancestor, alpha, beta);
    let result = reconciler.result;
    debug!(
        %mode,
        ancestor_changes = result.ancestor_changes.len(),
        alpha_changes = result.alpha_changes.len(),
        beta_changes = result.beta_changes.len(),
        conflicts = result.conflicts.len(),
        "reconciliation complete"
    );
    result
}

// =============================================================================
// Reconciler
// =============================================================================

struct Reconciler {
    mode: SyncMode,
    result: Reconciliation,
}

impl Reconciler {
    fn reconcile_node(
        &mut self,
        node_path: &str,
        ancestor: Option<&Entry>,
        alpha: Option<&Entry>,
        beta: Option<&Entry>,
    ) {
        // Endpoints agree: only the ancestor can lag behind them.
        if alpha == beta {
            if ancestor == alpha {
                return;
            }
            if alpha.is_none() && node_path.is_empty() {
                // Both sides deleted the root. The clear signal tells the
                // session store "the agreed state is now empty", which it
                // must distinguish from "nothing happened".
                self.result.ancestor_changes.push(Change::clear(node_path));
            } else {
                self.result
                    .ancestor_changes
                    .extend(diff(node_path, ancestor, alpha));
            }
            return;
        }

        // Both sides hold directories with differing contents: reconcile
        // child by child. Divergence surfaces at the leaves.
        if let (
            Some(Entry::Directory { contents: alpha_contents }),
            Some(Entry::Directory { contents: beta_contents }),
        ) = (alpha, beta)
        {
            let ancestor_contents = ancestor.and_then(Entry::contents);
            if ancestor_contents.is_none() {
                // Both sides agree this node is a directory even though the
                // ancestor does not record one; advance the ancestor so that
                // agreed children below have somewhere to live.
                self.result.ancestor_changes.push(Change::new(
                    node_path,
                    ancestor,
                    Some(&Entry::empty_directory()),
                ));
            }
            let names: BTreeSet<&String> = ancestor_contents
                .into_iter()
                .flat_map(|contents| contents.keys())
                .chain(alpha_contents.keys())
                .chain(beta_contents.keys())
                .collect();
            for name in names {
                self.reconcile_node(
                    &path::join(node_path, name),
                    ancestor_contents.and_then(|contents| contents.get(name.as_str())),
                    alpha_contents.get(name.as_str()),
                    beta_contents.get(name.as_str()),
                );
            }
            return;
        }

        // At least one side holds a non-directory and the sides differ.
        if self.mode.is_bidirectional() {
            self.handle_divergence_bidirectional(node_path, ancestor, alpha, beta);
        } else {
            self.handle_divergence_unidirectional(node_path, ancestor, alpha, beta);
        }
    }

    /// Resolve divergence when changes flow in both directions.
    fn handle_divergence_bidirectional(
        &mut self,
        node_path: &str,
        ancestor: Option<&Entry>,
        alpha: Option<&Entry>,
        beta: Option<&Entry>,
    ) {
        // A side still equal to the ancestor has no local changes, so the
        // other side's change is unilateral and simply propagates.
        if alpha == ancestor {
            self.result
                .alpha_changes
                .push(Change::new(node_path, alpha, beta));
            return;
        }
        if beta == ancestor {
            self.result
                .beta_changes
                .push(Change::new(node_path, beta, alpha));
            return;
        }

        // Both sides changed.
        if self.mode.alpha_wins_conflicts() {
            self.result
                .beta_changes
                .push(Change::new(node_path, beta, alpha));
            return;
        }

        // A side that only deleted content can be overwritten without loss.
        let alpha_delta = diff(node_path, ancestor, alpha);
        if non_deletion_changes_only(&alpha_delta).is_empty() {
            self.result
                .alpha_changes
                .push(Change::new(node_path, alpha, beta));
            return;
        }
        let beta_delta = diff(node_path, ancestor, beta);
        if non_deletion_changes_only(&beta_delta).is_empty() {
            self.result
                .beta_changes
                .push(Change::new(node_path, beta, alpha));
            return;
        }

        self.result.conflicts.push(Conflict {
            alpha_changes: alpha_delta,
            beta_changes: beta_delta,
        });
    }

    /// Resolve divergence when alpha is authoritative.
    fn handle_divergence_unidirectional(
        &mut self,
        node_path: &str,
        ancestor: Option<&Entry>,
        alpha: Option<&Entry>,
        beta: Option<&Entry>,
    ) {
        // Exact mirroring forces beta to match alpha, whatever beta holds.
        if self.mode.alpha_wins_conflicts() {
            self.result
                .beta_changes
                .push(Change::new(node_path, beta, alpha));
            return;
        }

        // Safe mirroring. If beta is unchanged or only deleted content the
        // ancestor records, alpha's version reasserts itself without losing
        // anything of beta's.
        let beta_delta = diff(node_path, ancestor, beta);
        if non_deletion_changes_only(&beta_delta).is_empty() {
            self.result
                .beta_changes
                .push(Change::new(node_path, beta, alpha));
            return;
        }

        // Beta holds content the ancestor does not record.
        if alpha == ancestor {
            if alpha.is_some() {
                // Beta rewrote content alpha still expects; alpha reasserts.
                self.result
                    .beta_changes
                    .push(Change::new(node_path, beta, alpha));
            }
            // Otherwise beta's content is a pure creation that collides with
            // nothing; leave it in place and don't advance the ancestor.
            return;
        }
        if alpha.is_none() {
            // Alpha deleted this node while beta created or modified it.
            // Complete alpha's deletion in the ancestor but keep beta's
            // content in place as unsynchronized.
            if ancestor.is_some() {
                self.result.ancestor_changes.push(Change::clear(node_path));
            }
            return;
        }

        self.result.conflicts.push(Conflict {
            alpha_changes: diff(node_path, ancestor, alpha),
            beta_changes: beta_delta,
        });
    }
}
