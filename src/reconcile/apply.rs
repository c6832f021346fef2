//! Apply a change list to a snapshot tree.
//!
//! Appliers on each endpoint translate changes into real filesystem
//! operations; this module is the tree-level equivalent, used by the
//! session store to advance its persisted ancestor and by tests to verify
//! reconciliation outcomes. Changes are applied in list order, so a change
//! creating a directory must precede changes inside it.

use crate::reconcile::change::Change;
use crate::reconcile::error::{ApplyError, Result};
use crate::reconcile::path;
use crate::snapshot::Entry;

/// Apply `changes` to a tree rooted at `root`, returning the new root.
///
/// A change at the empty path replaces the root wholesale; in particular
/// the clear change (`old` and `new` both absent) at the root yields an
/// empty tree. Other changes replace, insert, or remove the named child of
/// the parent directory their path designates.
pub fn apply(root: Option<&Entry>, changes: &[Change]) -> Result<Option<Entry>> {
    let mut result = root.cloned();
    for change in changes {
        apply_one(&mut result, change)?;
    }
    Ok(result)
}

fn apply_one(root: &mut Option<Entry>, change: &Change) -> Result<()> {
    // Root replacement needs no navigation.
    if change.path.is_empty() {
        *root = change.new.clone();
        return Ok(());
    }

    let Some(tree) = root.as_mut() else {
        return Err(ApplyError::MissingParent {
            path: String::new(),
        });
    };

    let (parent_path, name) = match change.path.rsplit_once('/') {
        Some((parent_path, name)) => (parent_path, name),
        None => ("", change.path.as_str()),
    };

    // Walk down to the parent directory.
    let mut node = tree;
    let mut node_path = String::new();
    if !parent_path.is_empty() {
        for component in parent_path.split('/') {
            let Entry::Directory { contents } = node else {
                return Err(ApplyError::NotADirectory { path: node_path });
            };
            let child_path = path::join(&node_path, component);
            node = contents
                .get_mut(component)
                .ok_or_else(|| ApplyError::MissingParent {
                    path: child_path.clone(),
                })?;
            node_path = child_path;
        }
    }

    let Entry::Directory { contents } = node else {
        return Err(ApplyError::NotADirectory { path: node_path });
    };
    match &change.new {
        Some(entry) => {
            contents.insert(name.to_owned(), entry.clone());
        }
        None => {
            contents.remove(name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::diff::diff;
    use crate::snapshot::digest_of;

    fn file_one() -> Entry {
        Entry::file(digest_of(b"one"), false)
    }

    fn file_two() -> Entry {
        Entry::file(digest_of(b"two"), false)
    }

    #[test]
    fn test_root_creation_and_clear() {
        let created = apply(None, &[Change::new("", None, Some(&file_one()))]).unwrap();
        assert_eq!(created, Some(file_one()));

        let cleared = apply(Some(&file_one()), &[Change::clear("")]).unwrap();
        assert_eq!(cleared, None);
    }

    #[test]
    fn test_insert_replace_and_remove_children() {
        let base = Entry::directory([("keep", file_one()), ("remove", file_one())]);
        let result = apply(
            Some(&base),
            &[
                Change::new("add", None, Some(&file_two())),
                Change::new("remove", Some(&file_one()), None),
                Change::new("keep", Some(&file_one()), Some(&file_two())),
            ],
        )
        .unwrap();
        assert_eq!(
            result,
            Some(Entry::directory([
                ("add", file_two()),
                ("keep", file_two()),
            ]))
        );
    }

    #[test]
    fn test_nested_change_walks_to_parent() {
        let base = Entry::directory([("sub", Entry::directory([("x", file_one())]))]);
        let result = apply(
            Some(&base),
            &[Change::new("sub/x", Some(&file_one()), Some(&file_two()))],
        )
        .unwrap();
        assert_eq!(
            result,
            Some(Entry::directory([(
                "sub",
                Entry::directory([("x", file_two())])
            )]))
        );
    }

    #[test]
    fn test_ordered_application_builds_through_new_directories() {
        let result = apply(
            None,
            &[
                Change::new("", None, Some(&Entry::empty_directory())),
                Change::new("sub", None, Some(&Entry::directory([("x", file_one())]))),
                Change::new("sub/x", Some(&file_one()), Some(&file_two())),
            ],
        )
        .unwrap();
        assert_eq!(
            result,
            Some(Entry::directory([(
                "sub",
                Entry::directory([("x", file_two())])
            )]))
        );
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let result = apply(None, &[Change::new("a", None, Some(&file_one()))]);
        assert_eq!(
            result,
            Err(ApplyError::MissingParent {
                path: String::new()
            })
        );
    }

    #[test]
    fn test_missing_parent_is_an_error() {
        let base = Entry::empty_directory();
        let result = apply(
            Some(&base),
            &[Change::new("sub/x", None, Some(&file_one()))],
        );
        assert_eq!(
            result,
            Err(ApplyError::MissingParent {
                path: "sub".to_owned()
            })
        );
    }

    #[test]
    fn test_parent_that_is_a_file_is_an_error() {
        let base = Entry::directory([("f", file_one())]);
        let result = apply(Some(&base), &[Change::new("f/x", None, Some(&file_two()))]);
        assert_eq!(
            result,
            Err(ApplyError::NotADirectory {
                path: "f".to_owned()
            })
        );
    }

    #[test]
    fn test_diff_then_apply_reproduces_target() {
        let cases: &[(Option<Entry>, Option<Entry>)] = &[
            (None, Some(file_one())),
            (Some(file_one()), None),
            (Some(file_one()), Some(file_two())),
            (
                Some(Entry::directory([
                    ("a", file_one()),
                    ("b", Entry::directory([("c", file_one())])),
                ])),
                Some(Entry::directory([
                    ("b", Entry::directory([("c", file_two()), ("d", file_one())])),
                    ("e", Entry::symlink("a")),
                ])),
            ),
            (
                Some(Entry::directory([("x", file_one())])),
                Some(file_two()),
            ),
        ];
        for (base, target) in cases {
            let changes = diff("", base.as_ref(), target.as_ref());
            let result = apply(base.as_ref(), &changes).unwrap();
            assert_eq!(&result, target);
        }
    }
}
