//! Rebalancing primitives: rotations and the insert/delete fix-up passes.
//!
//! Everything here works on `(arena, root)` pairs.  `root` is passed as
//! `&mut Option<u32>` because a rotation whose pivot is the root, or a
//! fix-up that recolors upward past it, replaces the root index.
//!
//! The fix-up passes assume the tree was valid before the mutation that
//! triggered them; mid-pass the invariants do not hold, which is why nothing
//! in this module is public outside the crate.

use crate::types::{Color, RbNode};

/// Color of a possibly-nil node.  Nil is black.
#[inline]
pub(crate) fn is_black<K, V>(arena: &[RbNode<K, V>], node: Option<u32>) -> bool {
    node.map_or(true, |i| arena[i as usize].color.is_black())
}

/// Leftmost node of the subtree at `node`.
pub(crate) fn min_child<K, V>(arena: &[RbNode<K, V>], mut node: u32) -> u32 {
    while let Some(l) = arena[node as usize].left {
        node = l;
    }
    node
}

/// Left rotation around `x`.  `x` must have a right child; that child takes
/// `x`'s place and `x` becomes its left child.  Exactly three parent
/// back-references change.
pub(crate) fn rotate_left<K, V>(arena: &mut [RbNode<K, V>], root: &mut Option<u32>, x: u32) {
    let y = arena[x as usize].right.expect("rotation pivot has a right child");
    let yl = arena[y as usize].left;
    arena[x as usize].right = yl;
    if let Some(yl) = yl {
        arena[yl as usize].parent = Some(x);
    }
    let p = arena[x as usize].parent;
    arena[y as usize].parent = p;
    match p {
        None => *root = Some(y),
        Some(p) if arena[p as usize].left == Some(x) => arena[p as usize].left = Some(y),
        Some(p) => arena[p as usize].right = Some(y),
    }
    arena[y as usize].left = Some(x);
    arena[x as usize].parent = Some(y);
}

/// Right rotation around `x`, the mirror of [`rotate_left`].
pub(crate) fn rotate_right<K, V>(arena: &mut [RbNode<K, V>], root: &mut Option<u32>, x: u32) {
    let y = arena[x as usize].left.expect("rotation pivot has a left child");
    let yr = arena[y as usize].right;
    arena[x as usize].left = yr;
    if let Some(yr) = yr {
        arena[yr as usize].parent = Some(x);
    }
    let p = arena[x as usize].parent;
    arena[y as usize].parent = p;
    match p {
        None => *root = Some(y),
        Some(p) if arena[p as usize].right == Some(x) => arena[p as usize].right = Some(y),
        Some(p) => arena[p as usize].left = Some(y),
    }
    arena[y as usize].right = Some(x);
    arena[x as usize].parent = Some(y);
}

/// Restores the red-black invariants after attaching the red leaf `n`.
///
/// Walks upward recoloring while the uncle is red, then resolves the
/// remaining red-red pair with one or two rotations around the grandparent.
pub(crate) fn insert_fixup<K, V>(arena: &mut [RbNode<K, V>], root: &mut Option<u32>, mut n: u32) {
    loop {
        let Some(p) = arena[n as usize].parent else {
            break;
        };
        if arena[p as usize].color.is_black() {
            break;
        }
        // a red parent is never the root, so the grandparent exists
        let g = arena[p as usize].parent.expect("red parent has a parent");
        if arena[g as usize].left == Some(p) {
            let u = arena[g as usize].right;
            if !is_black(arena, u) {
                let u = u.expect("red uncle exists");
                arena[p as usize].color = Color::Black;
                arena[u as usize].color = Color::Black;
                arena[g as usize].color = Color::Red;
                n = g;
            } else {
                if arena[p as usize].right == Some(n) {
                    n = p;
                    rotate_left(arena, root, n);
                }
                let p = arena[n as usize].parent.expect("pivot keeps its parent");
                let g = arena[p as usize].parent.expect("pivot keeps its grandparent");
                arena[p as usize].color = Color::Black;
                arena[g as usize].color = Color::Red;
                rotate_right(arena, root, g);
            }
        } else {
            let u = arena[g as usize].left;
            if !is_black(arena, u) {
                let u = u.expect("red uncle exists");
                arena[p as usize].color = Color::Black;
                arena[u as usize].color = Color::Black;
                arena[g as usize].color = Color::Red;
                n = g;
            } else {
                if arena[p as usize].left == Some(n) {
                    n = p;
                    rotate_right(arena, root, n);
                }
                let p = arena[n as usize].parent.expect("pivot keeps its parent");
                let g = arena[p as usize].parent.expect("pivot keeps its grandparent");
                arena[p as usize].color = Color::Black;
                arena[g as usize].color = Color::Red;
                rotate_left(arena, root, g);
            }
        }
    }
    let r = root.expect("fix-up runs on a non-empty tree");
    arena[r as usize].color = Color::Black;
}

/// Replaces the subtree at `u` with the subtree at `v` in `u`'s parent.
fn transplant<K, V>(arena: &mut [RbNode<K, V>], root: &mut Option<u32>, u: u32, v: Option<u32>) {
    let p = arena[u as usize].parent;
    match p {
        None => *root = v,
        Some(p) if arena[p as usize].left == Some(u) => arena[p as usize].left = v,
        Some(p) => arena[p as usize].right = v,
    }
    if let Some(v) = v {
        arena[v as usize].parent = p;
    }
}

/// Unlinks node `z` from the tree and restores the invariants.
///
/// A node with two children is replaced by its in-order successor, which
/// inherits `z`'s color; the successor's old position is spliced over by its
/// right child.  Removing a black node leaves a double-black deficiency that
/// [`erase_fixup`] pushes upward until absorbed.
///
/// The arena slot of `z` is left in place; the caller owns slot recycling.
pub(crate) fn remove<K, V>(arena: &mut [RbNode<K, V>], root: &mut Option<u32>, z: u32) {
    let mut removed_black = arena[z as usize].color.is_black();
    let x: Option<u32>;
    let x_parent: Option<u32>;

    match (arena[z as usize].left, arena[z as usize].right) {
        (None, r) => {
            x = r;
            x_parent = arena[z as usize].parent;
            transplant(arena, root, z, r);
        }
        (Some(l), None) => {
            x = Some(l);
            x_parent = arena[z as usize].parent;
            transplant(arena, root, z, Some(l));
        }
        (Some(zl), Some(zr)) => {
            let y = min_child(arena, zr);
            removed_black = arena[y as usize].color.is_black();
            x = arena[y as usize].right;
            if arena[y as usize].parent == Some(z) {
                x_parent = Some(y);
            } else {
                x_parent = arena[y as usize].parent;
                transplant(arena, root, y, x);
                arena[y as usize].right = Some(zr);
                arena[zr as usize].parent = Some(y);
            }
            transplant(arena, root, z, Some(y));
            arena[y as usize].left = Some(zl);
            arena[zl as usize].parent = Some(y);
            arena[y as usize].color = arena[z as usize].color;
        }
    }

    if removed_black {
        erase_fixup(arena, root, x, x_parent);
    }
}

/// Absorbs the double-black deficiency sitting on `x` (possibly nil, hence
/// the separate `parent`), moving it toward the root through the four
/// sibling cases: red sibling, black sibling with black nephews, near red
/// nephew, far red nephew.
fn erase_fixup<K, V>(
    arena: &mut [RbNode<K, V>],
    root: &mut Option<u32>,
    mut x: Option<u32>,
    mut parent: Option<u32>,
) {
    while x != *root && is_black(arena, x) {
        let p = parent.expect("non-root node has a parent");
        if arena[p as usize].left == x {
            let mut w = arena[p as usize].right.expect("double-black node has a sibling");
            if arena[w as usize].color.is_red() {
                arena[w as usize].color = Color::Black;
                arena[p as usize].color = Color::Red;
                rotate_left(arena, root, p);
                w = arena[p as usize].right.expect("double-black node has a sibling");
            }
            let wl = arena[w as usize].left;
            let wr = arena[w as usize].right;
            if is_black(arena, wl) && is_black(arena, wr) {
                arena[w as usize].color = Color::Red;
                x = Some(p);
                parent = arena[p as usize].parent;
            } else {
                if is_black(arena, wr) {
                    let wl = wl.expect("near nephew is red");
                    arena[wl as usize].color = Color::Black;
                    arena[w as usize].color = Color::Red;
                    rotate_right(arena, root, w);
                    w = arena[p as usize].right.expect("double-black node has a sibling");
                }
                arena[w as usize].color = arena[p as usize].color;
                arena[p as usize].color = Color::Black;
                let wr = arena[w as usize].right.expect("far nephew is red");
                arena[wr as usize].color = Color::Black;
                rotate_left(arena, root, p);
                x = *root;
                parent = None;
            }
        } else {
            let mut w = arena[p as usize].left.expect("double-black node has a sibling");
            if arena[w as usize].color.is_red() {
                arena[w as usize].color = Color::Black;
                arena[p as usize].color = Color::Red;
                rotate_right(arena, root, p);
                w = arena[p as usize].left.expect("double-black node has a sibling");
            }
            let wl = arena[w as usize].left;
            let wr = arena[w as usize].right;
            if is_black(arena, wr) && is_black(arena, wl) {
                arena[w as usize].color = Color::Red;
                x = Some(p);
                parent = arena[p as usize].parent;
            } else {
                if is_black(arena, wl) {
                    let wr = wr.expect("near nephew is red");
                    arena[wr as usize].color = Color::Black;
                    arena[w as usize].color = Color::Red;
                    rotate_left(arena, root, w);
                    w = arena[p as usize].left.expect("double-black node has a sibling");
                }
                arena[w as usize].color = arena[p as usize].color;
                arena[p as usize].color = Color::Black;
                let wl = arena[w as usize].left.expect("far nephew is red");
                arena[wl as usize].color = Color::Black;
                rotate_right(arena, root, p);
                x = *root;
                parent = None;
            }
        }
    }
    if let Some(x) = x {
        arena[x as usize].color = Color::Black;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::in_order;

    // Builds the arena for:
    //
    //        4
    //      /   \
    //     2     6
    //    / \   / \
    //   1   3 5   7
    //
    // Index i holds key i + 1.  Colors are irrelevant to rotation shape.
    fn seven() -> (Vec<RbNode<i32, ()>>, Option<u32>) {
        let mut arena: Vec<RbNode<i32, ()>> = (1..=7).map(|k| RbNode::new(k, ())).collect();
        let link = |arena: &mut Vec<RbNode<i32, ()>>, p: u32, l: u32, r: u32| {
            arena[p as usize].left = Some(l);
            arena[p as usize].right = Some(r);
            arena[l as usize].parent = Some(p);
            arena[r as usize].parent = Some(p);
        };
        link(&mut arena, 3, 1, 5);
        link(&mut arena, 1, 0, 2);
        link(&mut arena, 5, 4, 6);
        (arena, Some(3))
    }

    fn keys(arena: &[RbNode<i32, ()>], root: Option<u32>) -> Vec<i32> {
        in_order(arena, root)
            .into_iter()
            .map(|i| arena[i as usize].key)
            .collect()
    }

    fn assert_links_consistent(arena: &[RbNode<i32, ()>], root: Option<u32>) {
        for i in in_order(arena, root) {
            let node = &arena[i as usize];
            if let Some(l) = node.left {
                assert_eq!(arena[l as usize].parent, Some(i));
            }
            if let Some(r) = node.right {
                assert_eq!(arena[r as usize].parent, Some(i));
            }
        }
        if let Some(r) = root {
            assert_eq!(arena[r as usize].parent, None);
        }
    }

    #[test]
    fn rotate_left_preserves_in_order() {
        let (mut arena, mut root) = seven();
        rotate_left(&mut arena, &mut root, 3);
        assert_eq!(root, Some(5));
        assert_eq!(keys(&arena, root), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_links_consistent(&arena, root);
    }

    #[test]
    fn rotate_right_preserves_in_order() {
        let (mut arena, mut root) = seven();
        rotate_right(&mut arena, &mut root, 3);
        assert_eq!(root, Some(1));
        assert_eq!(keys(&arena, root), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_links_consistent(&arena, root);
    }

    #[test]
    fn rotations_are_inverses() {
        let (mut arena, mut root) = seven();
        rotate_left(&mut arena, &mut root, 3);
        rotate_right(&mut arena, &mut root, 5);
        assert_eq!(root, Some(3));
        assert_eq!(keys(&arena, root), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_links_consistent(&arena, root);
    }

    #[test]
    fn interior_rotation_keeps_root() {
        let (mut arena, mut root) = seven();
        rotate_left(&mut arena, &mut root, 1);
        assert_eq!(root, Some(3));
        assert_eq!(keys(&arena, root), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_links_consistent(&arena, root);
    }
}
