use std::fmt::Debug;

use crate::types::RbNode;

/// Indented rendering of the subtree at `node`, for test diagnostics.
pub fn print<K, V>(arena: &[RbNode<K, V>], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let color = if n.color.is_black() { "black" } else { "red" };
            let left = print(arena, n.left, &format!("{tab}  "));
            let right = print(arena, n.right, &format!("{tab}  "));
            format!(
                "Node[{i}] {color} {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.key, n.value
            )
        }
    }
}
