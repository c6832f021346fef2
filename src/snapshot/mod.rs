//! Immutable snapshot trees.
//!
//! A snapshot is what a scanner reports for one endpoint: either nothing at
//! all (`None`) or an [`Entry`] tree describing files, directories, and
//! symbolic links. Snapshots are immutable once built; the reconciliation
//! core only ever reads them.

mod digest;
mod entry;
mod error;

pub use digest::{Digest, digest_of};
pub use entry::Entry;
pub use error::{Result, SnapshotError};
