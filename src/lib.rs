//! treesync - a three-way file-tree synchronization core.
//!
//! Two endpoints, conventionally **alpha** and **beta**, each hold a
//! snapshot of a filesystem tree; an **ancestor** snapshot records the last
//! state both agreed on. [`reconcile`] compares the three and produces the
//! changes to apply on each side, the changes that advance the ancestor,
//! and the conflicts that need outside resolution.
//!
//! The crate is deliberately small: it does no I/O, keeps no state, and
//! never fails. Scanners produce [`Entry`] snapshots, appliers consume
//! [`Change`] lists, and a session store persists the ancestor between
//! runs; all of that machinery lives outside this crate and talks to it
//! through the types re-exported below.

pub mod reconcile;
pub mod snapshot;

pub use reconcile::{
    Change, Conflict, Reconciliation, SyncMode, apply, diff, non_deletion_changes_only, reconcile,
};
pub use snapshot::{Digest, Entry, SnapshotError, digest_of};
