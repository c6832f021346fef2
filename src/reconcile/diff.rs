//! Minimal change list between two subtrees.

use std::collections::BTreeSet;

use crate::reconcile::change::Change;
use crate::reconcile::path;
use crate::snapshot::Entry;

/// Compute the minimal sequence of changes that transforms `base` into
/// `target` at `base_path`.
///
/// Equal subtrees produce no changes. Two directories are compared child by
/// child over the union of their child names, in name order. Any other
/// combination (creation, deletion, a differing leaf, or a replacement of
/// a directory by a leaf or vice versa) is expressed as a single change
/// carrying the whole old and new subtrees.
pub fn diff(base_path: &str, base: Option<&Entry>, target: Option<&Entry>) -> Vec<Change> {
    let mut changes = Vec::new();
    diff_node(&mut changes, base_path, base, target);
    changes
}

fn diff_node(changes: &mut Vec<Change>, path: &str, base: Option<&Entry>, target: Option<&Entry>) {
    if base == target {
        return;
    }

    // Two directories decompose; everything else is a wholesale replacement.
    if let (
        Some(Entry::Directory { contents: base_contents }),
        Some(Entry::Directory { contents: target_contents }),
    ) = (base, target)
    {
        let names: BTreeSet<&String> =
            base_contents.keys().chain(target_contents.keys()).collect();
        for name in names {
            diff_node(
                changes,
                &path::join(path, name),
                base_contents.get(name.as_str()),
                target_contents.get(name.as_str()),
            );
        }
        return;
    }

    changes.push(Change::new(path, base, target));
}
