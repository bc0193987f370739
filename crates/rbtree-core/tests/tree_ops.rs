use std::collections::BTreeMap;

use rbtree_core::{Color, RbTree, TreeError};

#[test]
fn insert_and_search() {
    let mut tree = RbTree::new();
    tree.insert(10, "ten").unwrap();
    tree.insert(5, "five").unwrap();
    tree.insert(15, "fifteen").unwrap();

    assert_eq!(tree.search(&5), Some(&"five"));
    assert_eq!(tree.search(&10), Some(&"ten"));
    assert_eq!(tree.search(&15), Some(&"fifteen"));
    assert_eq!(tree.search(&7), None);
    assert!(tree.contains(&15));
    assert!(!tree.contains(&0));
    tree.check_invariants().unwrap();
}

#[test]
fn duplicate_key_is_rejected_and_tree_untouched() {
    let mut tree = RbTree::new();
    for k in [4, 2, 6, 1, 3] {
        tree.insert(k, k * 100).unwrap();
    }
    let before: Vec<i32> = tree.keys().into_iter().copied().collect();

    assert_eq!(tree.insert(4, -1), Err(TreeError::DuplicateKey));

    assert_eq!(tree.size(), 5);
    assert_eq!(tree.search(&4), Some(&400));
    let after: Vec<i32> = tree.keys().into_iter().copied().collect();
    assert_eq!(before, after);
    tree.check_invariants().unwrap();
}

#[test]
fn delete_missing_key_is_rejected_and_tree_untouched() {
    let mut tree = RbTree::new();
    for k in [4, 2, 6] {
        tree.insert(k, ()).unwrap();
    }

    assert_eq!(tree.delete(&5), Err(TreeError::KeyNotFound));
    assert_eq!(tree.size(), 3);
    tree.check_invariants().unwrap();

    let mut empty = RbTree::<i32, ()>::new();
    assert_eq!(empty.delete(&1), Err(TreeError::KeyNotFound));
}

#[test]
fn delete_root_of_single_node_tree() {
    let mut tree = RbTree::new();
    tree.insert(42, "answer").unwrap();
    assert_eq!(tree.size(), 1);

    tree.delete(&42).unwrap();

    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.root_index(), None);
    assert_eq!(tree.search(&42), None);
    tree.check_invariants().unwrap();
}

#[test]
fn ladder_insert_then_delete_every_other() {
    let mut tree = RbTree::new();
    for i in 0..200 {
        tree.insert(i, i).unwrap();
        tree.check_invariants().unwrap();
    }
    assert_eq!(tree.size(), 200);

    for i in (0..200).step_by(2) {
        tree.delete(&i).unwrap();
        tree.check_invariants().unwrap();
    }
    assert_eq!(tree.size(), 100);

    for i in 0..200 {
        if i % 2 == 0 {
            assert_eq!(tree.search(&i), None);
        } else {
            assert_eq!(tree.search(&i), Some(&i));
        }
    }
}

#[test]
fn descending_and_zigzag_inserts_stay_balanced() {
    let mut tree = RbTree::new();
    for i in (0..100).rev() {
        tree.insert(i, ()).unwrap();
        tree.check_invariants().unwrap();
    }
    // a valid red-black tree of n nodes is no taller than 2*log2(n+1)
    assert!(tree.height() <= 14);

    let mut zigzag = RbTree::new();
    for i in 0..50 {
        zigzag.insert(if i % 2 == 0 { i } else { 100 - i }, ()).unwrap();
        zigzag.check_invariants().unwrap();
    }
}

#[test]
fn deterministic_churn_against_shadow_map() {
    let mut tree = RbTree::new();
    let mut shadow = BTreeMap::new();
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;

    for step in 0..2000u64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let key = ((state >> 33) % 64) as i32;

        if state % 3 != 0 {
            let res = tree.insert(key, step);
            if shadow.contains_key(&key) {
                assert_eq!(res, Err(TreeError::DuplicateKey));
            } else {
                res.unwrap();
                shadow.insert(key, step);
            }
        } else {
            let res = tree.delete(&key);
            if shadow.remove(&key).is_some() {
                res.unwrap();
            } else {
                assert_eq!(res, Err(TreeError::KeyNotFound));
            }
        }

        tree.check_invariants().unwrap();
        assert_eq!(tree.size(), shadow.len());
    }

    for (k, v) in &shadow {
        assert_eq!(tree.search(k), Some(v));
    }
}

#[test]
fn misc_api() {
    let mut tree = RbTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.first(), None);
    assert_eq!(tree.last(), None);
    assert_eq!(tree.root_color(), None);

    tree.insert(10, 100).unwrap();
    tree.insert(5, 50).unwrap();
    tree.insert(20, 200).unwrap();

    assert!(!tree.is_empty());
    assert_eq!(tree.size(), 3);
    assert_eq!(tree.root_color(), Some(Color::Black));
    assert_eq!(tree.first().map(|i| *tree.key(i)), Some(5));
    assert_eq!(tree.last().map(|i| *tree.key(i)), Some(20));

    *tree.search_mut(&10).unwrap() = 101;
    assert_eq!(tree.search(&10), Some(&101));

    let collected: Vec<(i32, i32)> = tree.iter().map(|i| (*tree.key(i), *tree.value(i))).collect();
    assert_eq!(collected, vec![(5, 50), (10, 101), (20, 200)]);

    let mut visited = Vec::new();
    tree.for_each(|_, n| visited.push(n.key));
    assert_eq!(visited, vec![5, 10, 20]);

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.root_index(), None);
}

#[test]
fn custom_comparator_reverses_order() {
    let mut tree = RbTree::with_comparator(|a: &i32, b: &i32| b - a);
    for k in [1, 2, 3, 4, 5] {
        tree.insert(k, ()).unwrap();
        tree.check_invariants().unwrap();
    }
    let keys: Vec<i32> = tree.keys().into_iter().copied().collect();
    assert_eq!(keys, vec![5, 4, 3, 2, 1]);
}

#[test]
fn arena_slots_are_recycled() {
    let mut tree = RbTree::new();
    for k in 0..32 {
        tree.insert(k, ()).unwrap();
    }
    let slots = tree.arena().len();

    for k in 0..16 {
        tree.delete(&k).unwrap();
    }
    for k in 100..116 {
        tree.insert(k, ()).unwrap();
    }

    assert_eq!(tree.arena().len(), slots);
    assert_eq!(tree.size(), 32);
    tree.check_invariants().unwrap();
}
