//! Full-tree validation.
//!
//! Walks the whole structure and verifies, in order: root color and
//! detachment, parent back-links, no red node with a red child, equal black
//! count on every path to nil, and strictly ascending key order.  Any
//! failure is reported as [`TreeError::InvariantViolation`] with a message
//! naming the broken property; callers treat it as a defect and never try
//! to repair.

use crate::error::TreeError;
use crate::types::RbNode;
use crate::util;

fn violation(msg: &str) -> TreeError {
    TreeError::InvariantViolation(msg.to_string())
}

pub(crate) fn check<K, V, C>(
    arena: &[RbNode<K, V>],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), TreeError>
where
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena[root as usize].parent.is_some() {
        return Err(violation("root has a parent"));
    }
    if !arena[root as usize].color.is_black() {
        return Err(violation("root is not black"));
    }

    fn black_height<K, V>(arena: &[RbNode<K, V>], node: Option<u32>) -> Result<u32, TreeError> {
        let Some(i) = node else {
            return Ok(0);
        };
        let node = &arena[i as usize];

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

        if node.color.is_red() {
            let red_child = |c: Option<u32>| {
                c.map(|i| arena[i as usize].color.is_red()).unwrap_or(false)
            };
            if red_child(node.left) || red_child(node.right) {
                return Err(violation("red node has a red child"));
            }
        }

        let lh = black_height(arena, node.left)?;
        let rh = black_height(arena, node.right)?;
        if lh != rh {
            return Err(violation("black height differs between subtrees"));
        }
        Ok(lh + u32::from(node.color.is_black()))
    }

    black_height(arena, Some(root))?;

    let mut prev: Option<u32> = None;
    let mut curr = util::first(arena, Some(root));
    while let Some(i) = curr {
        if let Some(p) = prev {
            if comparator(&arena[p as usize].key, &arena[i as usize].key) >= 0 {
                return Err(violation("keys are not strictly ascending"));
            }
        }
        prev = Some(i);
        curr = util::next(arena, i);
    }

    Ok(())
}
