//! The tree engine: an owned arena of nodes plus a root index.
//!
//! [`RbTree`] is an ordinary value with no interior mutability and no
//! process-wide state; mutation requires `&mut self`, reads take `&self`,
//! so exclusive access during rebalancing is enforced by the borrow checker
//! rather than a lock.  Hosts that share a tree across threads wrap it in
//! their own `RwLock`.

use crate::balance;
use crate::check;
use crate::error::TreeError;
use crate::types::{Color, RbNode};
use crate::util;

fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// Red-black tree keyed by `K`, carrying one `V` per key.
///
/// Nodes live in an internal `Vec` arena; slots freed by [`delete`] are
/// recycled on the next [`insert`], so indices of live nodes stay stable
/// across unrelated mutations.  Every mutation either completes with all
/// invariants restored or returns an error leaving the tree untouched.
///
/// [`insert`]: RbTree::insert
/// [`delete`]: RbTree::delete
pub struct RbTree<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<RbNode<K, V>>,
    free: Vec<u32>,
    root: Option<u32>,
    len: usize,
    comparator: C,
}

impl<K, V> RbTree<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }

    /// Rebuilds a tree from raw node storage, e.g. a decoded snapshot.
    ///
    /// `arena` must hold exactly the live nodes and `root` the index of the
    /// one parentless node.  The structure is validated in full: link
    /// indices in range, parent/child links mutually consistent, a single
    /// root, every slot reachable, and all red-black invariants.  Any
    /// defect is reported as [`TreeError::InvariantViolation`].
    pub fn from_parts(arena: Vec<RbNode<K, V>>, root: Option<u32>) -> Result<Self, TreeError> {
        let violation = |msg: &str| TreeError::InvariantViolation(msg.to_string());
        let n = arena.len();
        let in_range = |i: Option<u32>| i.map_or(true, |i| (i as usize) < n);

        match root {
            None if n == 0 => {}
            None => return Err(violation("arena is not empty but no root was given")),
            Some(r) if (r as usize) >= n => return Err(violation("root index out of range")),
            Some(r) => {
                if arena[r as usize].parent.is_some() {
                    return Err(violation("root has a parent"));
                }
            }
        }

        let mut parentless = 0usize;
        for (i, node) in arena.iter().enumerate() {
            let i = i as u32;
            if !in_range(node.parent) || !in_range(node.left) || !in_range(node.right) {
                return Err(violation("link index out of range"));
            }
            if node.left.is_some() && node.left == node.right {
                return Err(violation("left and right point at the same node"));
            }
            if let Some(l) = node.left {
                if arena[l as usize].parent != Some(i) {
                    return Err(violation("left child does not point back at its parent"));
                }
            }
            if let Some(r) = node.right {
                if arena[r as usize].parent != Some(i) {
                    return Err(violation("right child does not point back at its parent"));
                }
            }
            match node.parent {
                Some(p) if p == i => return Err(violation("node is its own parent")),
                Some(p) => {
                    let p = &arena[p as usize];
                    if p.left != Some(i) && p.right != Some(i) {
                        return Err(violation("parent does not link back to node"));
                    }
                }
                None => parentless += 1,
            }
        }
        if root.is_some() && parentless != 1 {
            return Err(violation("arena holds more than one parentless node"));
        }

        let mut tree = Self {
            arena,
            free: Vec::new(),
            root,
            len: 0,
            comparator: default_comparator::<K>,
        };
        // the link checks above make the walk from the root finite
        tree.len = util::in_order(&tree.arena, tree.root).len();
        if tree.len != tree.arena.len() {
            return Err(violation("arena holds nodes unreachable from the root"));
        }
        tree.check_invariants()?;
        Ok(tree)
    }
}

impl<K, V> Default for RbTree<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            comparator,
        }
    }

    fn alloc(&mut self, key: K, value: V) -> u32 {
        match self.free.pop() {
            Some(i) => {
                self.arena[i as usize] = RbNode::new(key, value);
                i
            }
            None => {
                self.arena.push(RbNode::new(key, value));
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Inserts `key` with `value`.
    ///
    /// The new node enters as a red leaf at its in-order position and the
    /// fix-up pass restores the invariants.  An existing key is rejected
    /// with [`TreeError::DuplicateKey`] before anything is linked, so a
    /// failed insert leaves the tree untouched.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TreeError> {
        let mut parent = None;
        let mut curr = self.root;
        let mut went_left = false;
        while let Some(i) = curr {
            let cmp = (self.comparator)(&key, &self.arena[i as usize].key);
            if cmp == 0 {
                return Err(TreeError::DuplicateKey);
            }
            parent = Some(i);
            went_left = cmp < 0;
            curr = if went_left {
                self.arena[i as usize].left
            } else {
                self.arena[i as usize].right
            };
        }

        let n = self.alloc(key, value);
        self.arena[n as usize].parent = parent;
        match parent {
            None => self.root = Some(n),
            Some(p) if went_left => self.arena[p as usize].left = Some(n),
            Some(p) => self.arena[p as usize].right = Some(n),
        }
        balance::insert_fixup(&mut self.arena, &mut self.root, n);
        self.len += 1;
        Ok(())
    }

    /// Removes `key`, or fails with [`TreeError::KeyNotFound`] leaving the
    /// tree untouched.
    pub fn delete(&mut self, key: &K) -> Result<(), TreeError> {
        let z = util::find(&self.arena, self.root, key, &self.comparator)
            .ok_or(TreeError::KeyNotFound)?;
        balance::remove(&mut self.arena, &mut self.root, z);
        self.free.push(z);
        self.len -= 1;
        Ok(())
    }

    /// O(log n) lookup.  No side effects.
    pub fn search(&self, key: &K) -> Option<&V> {
        util::find(&self.arena, self.root, key, &self.comparator)
            .map(|i| &self.arena[i as usize].value)
    }

    pub fn search_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = util::find(&self.arena, self.root, key, &self.comparator)?;
        Some(&mut self.arena[i as usize].value)
    }

    pub fn contains(&self, key: &K) -> bool {
        util::find(&self.arena, self.root, key, &self.comparator).is_some()
    }

    /// Live node count.  Maintained incrementally, O(1).
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Longest root-to-leaf path, in nodes.  O(n) walk.
    pub fn height(&self) -> u32 {
        util::height(&self.arena, self.root)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    // ── read-only structure access ────────────────────────────────────────

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    /// The raw node storage.  Slots on the free list stay allocated; only
    /// indices reachable from [`root_index`](Self::root_index) are live.
    pub fn arena(&self) -> &[RbNode<K, V>] {
        &self.arena
    }

    pub fn node(&self, idx: u32) -> &RbNode<K, V> {
        &self.arena[idx as usize]
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.arena[idx as usize].key
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx as usize].value
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    // ── in-order iteration ────────────────────────────────────────────────

    pub fn first(&self) -> Option<u32> {
        util::first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        util::last(&self.arena, self.root)
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        util::next(&self.arena, curr)
    }

    /// Arena indices in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            tree: self,
            curr: self.first(),
        }
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|i| &self.arena[i as usize].key).collect()
    }

    pub fn for_each<G: FnMut(u32, &RbNode<K, V>)>(&self, mut f: G) {
        let mut curr = self.first();
        while let Some(i) = curr {
            f(i, &self.arena[i as usize]);
            curr = self.next(i);
        }
    }

    /// Validates the whole tree; see the crate docs for the properties
    /// checked.  A failure means a bug in this crate, not bad input.
    pub fn check_invariants(&self) -> Result<(), TreeError> {
        check::check(&self.arena, self.root, &self.comparator)
    }

    /// Root color, if the tree is non-empty.  The root of a valid tree is
    /// always black.
    pub fn root_color(&self) -> Option<Color> {
        self.root.map(|r| self.arena[r as usize].color)
    }
}

pub struct Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    tree: &'a RbTree<K, V, C>,
    curr: Option<u32>,
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.curr;
        if let Some(i) = self.curr {
            self.curr = self.tree.next(i);
        }
        out
    }
}
