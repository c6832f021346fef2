//! Change records.
//!
//! A [`Change`] says: at `path`, replace `old` with `new`. Either side may
//! be absent. A change whose values are both absent is the "clear" signal
//! the reconciler emits on the ancestor list when content is gone from both
//! endpoints; appliers treat it as removal of whatever the ancestor held.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::snapshot::Entry;

/// A replacement at one path of a snapshot tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// `/`-joined path relative to the session root; empty means the root.
    pub path: String,
    /// The value currently at `path`, or `None` if nothing is there.
    pub old: Option<Entry>,
    /// The value to put at `path`, or `None` to remove.
    pub new: Option<Entry>,
}

impl Change {
    /// Create a change from optional borrowed endpoints, cloning as needed.
    pub fn new(path: impl Into<String>, old: Option<&Entry>, new: Option<&Entry>) -> Self {
        Change {
            path: path.into(),
            old: old.cloned(),
            new: new.cloned(),
        }
    }

    /// The "clear" change at `path`: both sides absent.
    pub fn clear(path: impl Into<String>) -> Self {
        Change {
            path: path.into(),
            old: None,
            new: None,
        }
    }

    /// Returns true if this change removes existing content: its new value
    /// is absent while its old value is not.
    pub fn is_deletion(&self) -> bool {
        self.new.is_none() && self.old.is_some()
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        };
        match (&self.old, &self.new) {
            (None, None) => write!(f, "{path}: cleared"),
            (None, Some(new)) => write!(f, "{path}: created {new}"),
            (Some(old), None) => write!(f, "{path}: deleted {old}"),
            (Some(old), Some(new)) => write!(f, "{path}: {old} -> {new}"),
        }
    }
}

/// Return only the changes in `changes` that are not deletions.
///
/// Callers use this to split a change list into its destructive and
/// non-destructive halves, e.g. when staging only content that has to be
/// transferred.
pub fn non_deletion_changes_only(changes: &[Change]) -> Vec<Change> {
    changes
        .iter()
        .filter(|change| !change.is_deletion())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::digest_of;

    fn make_file() -> Entry {
        Entry::file(digest_of(b"file"), false)
    }

    #[test]
    fn test_is_deletion() {
        assert!(Change::new("a", Some(&make_file()), None).is_deletion());
        assert!(!Change::new("a", None, Some(&make_file())).is_deletion());
        assert!(!Change::new("a", Some(&make_file()), Some(&make_file())).is_deletion());
        assert!(!Change::clear("a").is_deletion());
    }

    #[test]
    fn test_non_deletion_changes_only() {
        let changes = vec![
            Change::new("file", None, Some(&make_file())),
            Change::new("directory", Some(&Entry::empty_directory()), None),
        ];
        let non_deletion = non_deletion_changes_only(&changes);
        assert_eq!(non_deletion.len(), 1);
        assert_eq!(non_deletion[0].path, "file");
    }

    #[test]
    fn test_display_names_the_root() {
        let change = Change::clear("");
        assert_eq!(change.to_string(), "<root>: cleared");
    }
}
