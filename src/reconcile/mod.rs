//! Three-way reconciliation of snapshot trees.
//!
//! This module is the correctness core of the synchronization engine. Given
//! the last agreed ancestor snapshot and the current alpha and beta
//! snapshots, [`reconcile`] decomposes their divergence into changes for
//! each side, bookkeeping changes for the ancestor, and conflicts for
//! anything the selected [`SyncMode`] refuses to merge.
//!
//! # Key types
//!
//! - [`Change`] - a replacement of one value by another at a path
//! - [`Conflict`] - paired per-side deltas at an irreconcilable root
//! - [`SyncMode`] - the policy governing direction and conflict handling
//! - [`Reconciliation`] - the four result lists of a reconciliation pass
//!
//! # Key functions
//!
//! - [`diff`] - the minimal change list between two subtrees
//! - [`reconcile`] - the three-way walk itself
//! - [`apply`] - replay a change list against a tree
//!
//! Everything here is synchronous and free of I/O; the surrounding session
//! machinery owns scanning, transport, and persistence.

mod apply;
mod change;
mod conflict;
mod diff;
mod error;
mod mode;
pub(crate) mod path;
mod reconciler;

pub use apply::apply;
pub use change::{Change, non_deletion_changes_only};
pub use conflict::Conflict;
pub use diff::diff;
pub use error::{ApplyError, Result};
pub use mode::{ParseSyncModeError, SyncMode};
pub use reconciler::{Reconciliation, reconcile};
