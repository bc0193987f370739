//! Read-only export of a live tree into a [`Snapshot`].

use rbtree_core::types::RbNode;
use rbtree_core::{util, RbTree};

use crate::types::{KeyRef, Link, Snapshot, SnapshotNode};

fn key_ref<K: Clone, V>(arena: &[RbNode<K, V>], link: Option<u32>) -> KeyRef<K> {
    match link {
        Some(i) => KeyRef::Key(arena[i as usize].key.clone()),
        None => KeyRef::Nil,
    }
}

/// Walks `tree` in level order and produces its snapshot, stamped with
/// `sequence`.
///
/// The walk never mutates: exporting an unchanged tree twice yields
/// identical `nodes` and `links` (only the stamp differs).  The empty tree
/// exports as `n = 0` with empty tables.
pub fn export<K, V, C>(tree: &RbTree<K, V, C>, sequence: u64) -> Snapshot<K, V>
where
    K: Clone,
    V: Clone,
    C: Fn(&K, &K) -> i32,
{
    let arena = tree.arena();
    let mut nodes = Vec::with_capacity(tree.size());
    let mut links = Vec::new();

    for i in util::level_order(arena, tree.root_index()) {
        let node = &arena[i as usize];
        nodes.push(SnapshotNode {
            value: node.value.clone(),
            color: node.color,
            parent: key_ref(arena, node.parent),
            left: key_ref(arena, node.left),
            right: key_ref(arena, node.right),
            key: node.key.clone(),
        });
        if let Some(l) = node.left {
            links.push(Link {
                from: node.key.clone(),
                to: arena[l as usize].key.clone(),
            });
        }
        if let Some(r) = node.right {
            links.push(Link {
                from: node.key.clone(),
                to: arena[r as usize].key.clone(),
            });
        }
    }

    Snapshot {
        timestamp: sequence.to_string(),
        n: nodes.len(),
        nodes,
        links,
    }
}

/// Hands out snapshots stamped with a monotonically increasing sequence.
///
/// The counter belongs to this exporter, not to any tree: one exporter per
/// engine lifetime gives the snapshots of that engine a total order.
pub struct Exporter {
    seq: u64,
}

impl Exporter {
    pub fn new() -> Self {
        Self { seq: 1 }
    }

    /// Next sequence value to be stamped.
    pub fn sequence(&self) -> u64 {
        self.seq
    }

    pub fn export<K, V, C>(&mut self, tree: &RbTree<K, V, C>) -> Snapshot<K, V>
    where
        K: Clone,
        V: Clone,
        C: Fn(&K, &K) -> i32,
    {
        let snapshot = export(tree, self.seq);
        self.seq += 1;
        snapshot
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}
