//! Read-only walkers over the node arena.
//!
//! Every function takes the arena as a slice plus a starting index, so they
//! compose with any owner of the node storage.  None of them mutate.

use std::collections::VecDeque;

use crate::types::RbNode;

#[inline]
fn get_p<K, V>(arena: &[RbNode<K, V>], idx: u32) -> Option<u32> {
    arena[idx as usize].parent
}

#[inline]
fn get_l<K, V>(arena: &[RbNode<K, V>], idx: u32) -> Option<u32> {
    arena[idx as usize].left
}

#[inline]
fn get_r<K, V>(arena: &[RbNode<K, V>], idx: u32) -> Option<u32> {
    arena[idx as usize].right
}

/// Leftmost node under `root`.
pub fn first<K, V>(arena: &[RbNode<K, V>], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost node under `root`.
pub fn last<K, V>(arena: &[RbNode<K, V>], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor of `node`.
pub fn next<K, V>(arena: &[RbNode<K, V>], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        return first(arena, Some(r));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor of `node`.
pub fn prev<K, V>(arena: &[RbNode<K, V>], node: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, node) {
        return last(arena, Some(l));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Finds a node by key.
pub fn find<K, V, C>(
    arena: &[RbNode<K, V>],
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Option<u32>
where
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, &arena[i as usize].key);
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// Number of nodes on the longest path from `root` down to a leaf.
/// Zero for the empty tree.
pub fn height<K, V>(arena: &[RbNode<K, V>], root: Option<u32>) -> u32 {
    root.map_or(0, |i| {
        1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)))
    })
}

/// Node indices in ascending key order.
pub fn in_order<K, V>(arena: &[RbNode<K, V>], root: Option<u32>) -> Vec<u32> {
    let mut out = Vec::new();
    let mut curr = first(arena, root);
    while let Some(i) = curr {
        out.push(i);
        curr = next(arena, i);
    }
    out
}

/// Node indices in pre-order (node, left subtree, right subtree).
pub fn pre_order<K, V>(arena: &[RbNode<K, V>], root: Option<u32>) -> Vec<u32> {
    fn walk<K, V>(arena: &[RbNode<K, V>], node: Option<u32>, out: &mut Vec<u32>) {
        if let Some(i) = node {
            out.push(i);
            walk(arena, get_l(arena, i), out);
            walk(arena, get_r(arena, i), out);
        }
    }
    let mut out = Vec::new();
    walk(arena, root, &mut out);
    out
}

/// Node indices in post-order (left subtree, right subtree, node).
pub fn post_order<K, V>(arena: &[RbNode<K, V>], root: Option<u32>) -> Vec<u32> {
    fn walk<K, V>(arena: &[RbNode<K, V>], node: Option<u32>, out: &mut Vec<u32>) {
        if let Some(i) = node {
            walk(arena, get_l(arena, i), out);
            walk(arena, get_r(arena, i), out);
            out.push(i);
        }
    }
    let mut out = Vec::new();
    walk(arena, root, &mut out);
    out
}

/// Node indices level by level, starting at the root; within a level,
/// left to right.
pub fn level_order<K, V>(arena: &[RbNode<K, V>], root: Option<u32>) -> Vec<u32> {
    let mut out = Vec::new();
    let Some(root) = root else {
        return out;
    };
    let mut queue = VecDeque::new();
    queue.push_back(root);
    while let Some(i) = queue.pop_front() {
        out.push(i);
        if let Some(l) = get_l(arena, i) {
            queue.push_back(l);
        }
        if let Some(r) = get_r(arena, i) {
            queue.push_back(r);
        }
    }
    out
}
