//! Rebuilding a live tree from a snapshot.

use std::collections::BTreeMap;
use std::fmt::Debug;

use rbtree_core::types::RbNode;
use rbtree_core::{util, RbTree};

use crate::error::SnapshotError;
use crate::types::{KeyRef, Link, Snapshot};

/// Rebuilds the tree a snapshot describes, validating it in full.
///
/// The node table alone carries the structure; `links` is redundant and is
/// checked against it.  The rebuilt tree passes
/// [`RbTree::check_invariants`], so a snapshot recording an invalid
/// structure (wrong colors, broken links, unreachable entries) is rejected
/// rather than partially loaded.
pub fn restore<K, V>(snapshot: &Snapshot<K, V>) -> Result<RbTree<K, V>, SnapshotError>
where
    K: Clone + Ord + Debug,
    V: Clone,
{
    if snapshot.n != snapshot.nodes.len() {
        return Err(SnapshotError::Corrupt(format!(
            "n is {} but the node table holds {} entries",
            snapshot.n,
            snapshot.nodes.len()
        )));
    }

    let mut index_of: BTreeMap<&K, u32> = BTreeMap::new();
    for (i, node) in snapshot.nodes.iter().enumerate() {
        if index_of.insert(&node.key, i as u32).is_some() {
            return Err(SnapshotError::DuplicateKey(format!("{:?}", node.key)));
        }
    }

    let resolve = |r: &KeyRef<K>| -> Result<Option<u32>, SnapshotError> {
        match r {
            KeyRef::Nil => Ok(None),
            KeyRef::Key(k) => index_of
                .get(k)
                .copied()
                .map(Some)
                .ok_or_else(|| SnapshotError::UnknownKey(format!("{k:?}"))),
        }
    };

    let mut arena = Vec::with_capacity(snapshot.nodes.len());
    let mut root = None;
    for (i, entry) in snapshot.nodes.iter().enumerate() {
        let mut node = RbNode::new(entry.key.clone(), entry.value.clone());
        node.color = entry.color;
        node.parent = resolve(&entry.parent)?;
        node.left = resolve(&entry.left)?;
        node.right = resolve(&entry.right)?;
        if node.parent.is_none() {
            if root.is_some() {
                return Err(SnapshotError::Corrupt(
                    "node table records more than one root".to_string(),
                ));
            }
            root = Some(i as u32);
        }
        arena.push(node);
    }

    let tree = RbTree::from_parts(arena, root)
        .map_err(|e| SnapshotError::Corrupt(e.to_string()))?;

    // links are derived data; reject a snapshot whose edge list disagrees
    // with the node table
    let mut expected: Vec<Link<K>> = Vec::new();
    let arena = tree.arena();
    for i in util::level_order(arena, tree.root_index()) {
        let node = &arena[i as usize];
        for child in [node.left, node.right].into_iter().flatten() {
            expected.push(Link {
                from: node.key.clone(),
                to: arena[child as usize].key.clone(),
            });
        }
    }
    if expected != snapshot.links {
        return Err(SnapshotError::Corrupt(
            "edge list disagrees with the node table".to_string(),
        ));
    }

    Ok(tree)
}
