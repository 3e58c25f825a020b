use algoviz::bst::{BinarySearchTree, TraversalOrder};
use algoviz::trace::Action;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn tree_of(values: &[i64]) -> BinarySearchTree<i64> {
    let mut tree = BinarySearchTree::new();
    for &v in values {
        tree.insert(v);
    }
    tree
}

// Helper: inorder output must never decrease
fn assert_non_decreasing(values: &[i64]) {
    for pair in values.windows(2) {
        assert!(pair[0] <= pair[1], "{:?} is out of order", pair);
    }
}

#[test]
fn inorder_is_sorted_for_random_inserts() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..10 {
        let values: Vec<i64> = (0..30).map(|_| rng.gen_range(0..25)).collect();
        let tree = tree_of(&values);
        let inorder = tree.inorder();
        assert_non_decreasing(&inorder);
        assert_eq!(inorder.len(), values.len());
        assert_eq!(tree.size(), values.len());
    }
}

#[test]
fn remove_then_search_misses() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut values: Vec<i64> = (0..40).collect();
    values.shuffle(&mut rng);
    let mut tree = tree_of(&values);

    values.shuffle(&mut rng);
    for (removed, v) in values.iter().enumerate() {
        assert!(tree.remove(v));
        assert!(!tree.search(v));
        assert_eq!(tree.size(), values.len() - removed - 1);
        assert_non_decreasing(&tree.inorder());
    }
    assert!(tree.is_empty());
    assert!(!tree.remove(&0));
}

#[test]
fn two_child_node_takes_its_successor() {
    let mut tree = tree_of(&[50, 30, 70, 60, 80, 65]);
    assert!(tree.remove(&50));
    assert_eq!(tree.root().map(|n| n.value), Some(60));
    assert_eq!(tree.inorder(), vec![30, 60, 65, 70, 80]);
    assert_eq!(tree.last_trace().first().map(|s| s.action), Some(Action::Compare));
    assert!(tree.last_trace().actions().contains(&Action::Update));
}

#[test]
fn traversal_orders() {
    let tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
    assert_eq!(tree.inorder(), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(tree.preorder(), vec![4, 2, 1, 3, 6, 5, 7]);
    assert_eq!(tree.postorder(), vec![1, 3, 2, 5, 7, 6, 4]);
    assert_eq!(tree.level_order(), vec![vec![4], vec![2, 6], vec![1, 3, 5, 7]]);
    assert_eq!(tree.traverse(TraversalOrder::LevelOrder), vec![4, 2, 6, 1, 3, 5, 7]);

    let traced = tree.traverse_traced(TraversalOrder::Preorder);
    assert_eq!(traced.trace.len(), 7);
    assert_eq!(traced.trace.last().map(|s| s.state.clone()), Some(traced.result.clone()));
}

#[test]
fn height_min_and_max() {
    let empty: BinarySearchTree<i64> = BinarySearchTree::new();
    assert_eq!(empty.height(), -1);
    assert_eq!(empty.min(), None);

    let single = tree_of(&[8]);
    assert_eq!(single.height(), 0);

    let tree = tree_of(&[5, 3, 8, 1, 4, 9, 10]);
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.min(), Some(&1));
    assert_eq!(tree.max(), Some(&10));
}

#[test]
fn duplicates_go_right() {
    let tree = tree_of(&[5, 5, 5]);
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.inorder(), vec![5, 5, 5]);
}

#[test]
fn traced_search_walks_the_path() {
    let tree = tree_of(&[8, 4, 12, 10]);
    let hit = tree.search_traced(&10);
    assert!(hit.result);
    assert_eq!(
        hit.trace.actions(),
        vec![Action::Compare, Action::Compare, Action::Compare, Action::Found]
    );

    let miss = tree.search_traced(&3);
    assert!(!miss.result);
    assert_eq!(miss.trace.last().map(|s| s.action), Some(Action::NotFound));
}

#[test]
fn scans_agree_with_search() {
    let tree = tree_of(&[15, 6, 20, 3, 9, 17]);
    for v in 0..25 {
        assert_eq!(tree.contains_bfs(&v), tree.search(&v), "value {}", v);
        assert_eq!(tree.contains_dfs(&v), tree.search(&v), "value {}", v);
    }
}

#[test]
fn insert_snapshots_are_independent_copies() {
    let mut tree = tree_of(&[2]);
    tree.insert(1);
    let trace = tree.take_trace();
    tree.insert(3);
    let last = trace.last().and_then(|s| s.state.as_ref()).expect("snapshot");
    assert_eq!(last.value, 2);
    assert!(last.right.is_none());
}
