//! The immutable snapshot tree node.
//!
//! An [`Entry`] is one node of a filesystem snapshot: a file with a content
//! digest and an executable bit, a directory mapping child names to child
//! entries, or a symbolic link carrying its target. Absence of content at a
//! location is represented by `Option<Entry>` (`None` meaning "nothing
//! here"), never by a sentinel entry.
//!
//! Entries are values: equality is structural, and all tree manipulation
//! produces new entries rather than mutating existing ones.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reconcile::path;
use crate::snapshot::digest::Digest;
use crate::snapshot::error::{Result, SnapshotError};

// =============================================================================
// Entry
// =============================================================================

/// A node in a snapshot tree.
///
/// Directory contents use a `BTreeMap` so that iteration over children is
/// always sorted by name, keeping traversal order reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    /// A regular file, identified by its content digest.
    File {
        /// Digest of the file's content.
        digest: Digest,
        /// Whether the file has the executable bit set.
        executable: bool,
    },
    /// A directory mapping child names to child entries.
    Directory {
        /// Child entries, keyed by name.
        contents: BTreeMap<String, Entry>,
    },
    /// A symbolic link.
    Symlink {
        /// The link target, compared byte-for-byte.
        target: String,
    },
}

impl Entry {
    /// Create a file entry.
    pub fn file(digest: impl Into<Digest>, executable: bool) -> Self {
        Entry::File {
            digest: digest.into(),
            executable,
        }
    }

    /// Create a directory entry from an iterator of named children.
    pub fn directory<S, I>(entries: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Entry)>,
    {
        Entry::Directory {
            contents: entries
                .into_iter()
                .map(|(name, entry)| (name.into(), entry))
                .collect(),
        }
    }

    /// Create a directory entry with no children.
    pub fn empty_directory() -> Self {
        Entry::Directory {
            contents: BTreeMap::new(),
        }
    }

    /// Create a symbolic link entry.
    pub fn symlink(target: impl Into<String>) -> Self {
        Entry::Symlink {
            target: target.into(),
        }
    }

    /// Returns true if this entry is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, Entry::Directory { .. })
    }

    /// Returns the child map if this entry is a directory.
    pub fn contents(&self) -> Option<&BTreeMap<String, Entry>> {
        match self {
            Entry::Directory { contents } => Some(contents),
            _ => None,
        }
    }

    /// Returns the child entry with the given name, if this entry is a
    /// directory and has such a child.
    pub fn child(&self, name: &str) -> Option<&Entry> {
        self.contents().and_then(|contents| contents.get(name))
    }

    /// Total number of nodes in this subtree, including this one.
    ///
    /// Callers that need to bound reconciliation work use this to size
    /// inputs before handing them to the core.
    pub fn count(&self) -> usize {
        match self {
            Entry::Directory { contents } => {
                1 + contents.values().map(Entry::count).sum::<usize>()
            }
            _ => 1,
        }
    }

    /// Validate that every directory in this subtree uses well-formed child
    /// names: non-empty, free of path separators, and not `.` or `..`.
    ///
    /// Scanners call this once at snapshot construction; the reconciler
    /// assumes it holds.
    pub fn validate(&self) -> Result<()> {
        self.validate_at("")
    }

    fn validate_at(&self, path: &str) -> Result<()> {
        let Entry::Directory { contents } = self else {
            return Ok(());
        };
        for (name, child) in contents {
            if name.is_empty() {
                return Err(SnapshotError::EmptyName {
                    path: path.to_owned(),
                });
            }
            if name.contains('/') {
                return Err(SnapshotError::NameContainsSeparator {
                    path: path.to_owned(),
                    name: name.clone(),
                });
            }
            if name == "." || name == ".." {
                return Err(SnapshotError::RelativeName {
                    path: path.to_owned(),
                    name: name.clone(),
                });
            }
            child.validate_at(&path::join(path, name))?;
        }
        Ok(())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::File { digest, executable } => {
                let short = &digest[..digest.len().min(8)];
                if *executable {
                    write!(f, "file {short} (executable)")
                } else {
                    write!(f, "file {short}")
                }
            }
            Entry::Directory { contents } => {
                write!(f, "directory ({} entries)", contents.len())
            }
            Entry::Symlink { target } => write!(f, "symlink -> {target}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::digest::digest_of;

    fn make_file() -> Entry {
        Entry::file(digest_of(b"contents"), false)
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(make_file(), make_file());
        assert_ne!(make_file(), Entry::file(digest_of(b"other"), false));
        assert_ne!(make_file(), Entry::file(digest_of(b"contents"), true));
        assert_ne!(make_file(), Entry::symlink("contents"));
    }

    #[test]
    fn test_directory_equality_ignores_insertion_order() {
        let forward = Entry::directory([("a", make_file()), ("b", Entry::empty_directory())]);
        let backward = Entry::directory([("b", Entry::empty_directory()), ("a", make_file())]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_count() {
        assert_eq!(make_file().count(), 1);
        assert_eq!(Entry::empty_directory().count(), 1);
        let tree = Entry::directory([
            ("a", make_file()),
            ("b", Entry::directory([("c", make_file())])),
        ]);
        assert_eq!(tree.count(), 4);
    }

    #[test]
    fn test_child_lookup() {
        let tree = Entry::directory([("a", make_file())]);
        assert_eq!(tree.child("a"), Some(&make_file()));
        assert_eq!(tree.child("b"), None);
        assert_eq!(make_file().child("a"), None);
    }

    #[test]
    fn test_validate_accepts_well_formed_tree() {
        let tree = Entry::directory([
            ("a", make_file()),
            ("b", Entry::directory([("c", Entry::symlink("a"))])),
        ]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_separator_in_name() {
        let tree = Entry::directory([("a/b", make_file())]);
        assert_eq!(
            tree.validate(),
            Err(SnapshotError::NameContainsSeparator {
                path: String::new(),
                name: "a/b".to_owned(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_name_in_nested_directory() {
        let tree = Entry::directory([("sub", Entry::directory([("", make_file())]))]);
        assert_eq!(
            tree.validate(),
            Err(SnapshotError::EmptyName {
                path: "sub".to_owned(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_relative_names() {
        let tree = Entry::directory([("..", Entry::empty_directory())]);
        assert!(matches!(
            tree.validate(),
            Err(SnapshotError::RelativeName { .. })
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let tree = Entry::directory([
            ("a", Entry::file(digest_of(b"a"), true)),
            ("b", Entry::symlink("a")),
        ]);
        let json = serde_json::to_string(&tree).unwrap();
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, back);
    }

    #[test]
    fn test_display() {
        let file = Entry::file("0123456789abcdef", true);
        assert_eq!(file.to_string(), "file 01234567 (executable)");
        assert_eq!(Entry::empty_directory().to_string(), "directory (0 entries)");
        assert_eq!(Entry::symlink("x").to_string(), "symlink -> x");
    }
}
