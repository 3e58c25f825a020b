use algoviz::heap::MaxHeap;
use algoviz::trace::Action;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Helper: every parent is at least as large as its children
fn assert_heap_property(heap: &[i64]) {
    for i in 0..heap.len() / 2 {
        let left = 2 * i + 1;
        let right = 2 * i + 2;
        assert!(heap[i] >= heap[left], "parent {} smaller than child {}", i, left);
        if right < heap.len() {
            assert!(heap[i] >= heap[right], "parent {} smaller than child {}", i, right);
        }
    }
}

fn sorted(mut values: Vec<i64>) -> Vec<i64> {
    values.sort();
    values
}

#[test]
fn heap_property_holds_after_random_operations() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut heap = MaxHeap::new();
    let mut model = Vec::new();
    for _ in 0..300 {
        if rng.gen_bool(0.6) {
            let v = rng.gen_range(-50..50);
            heap.insert(v);
            model.push(v);
        } else {
            let max = heap.extract_max();
            let expected = model.iter().copied().max();
            assert_eq!(max, expected);
            if let Some(m) = expected {
                let pos = model.iter().position(|&x| x == m).expect("present");
                model.swap_remove(pos);
            }
        }
        assert_heap_property(heap.as_slice());
        assert_eq!(heap.size(), model.len());
    }
}

#[test]
fn build_heap_heapifies_bottom_up() {
    let mut heap = MaxHeap::new();
    heap.build_heap(vec![3, 9, 2, 1, 4, 5]);
    assert_heap_property(heap.as_slice());
    assert_eq!(heap.peek(), Some(&9));

    let trace = heap.last_trace();
    assert_eq!(trace.first().map(|s| s.action), Some(Action::Start));
    assert_eq!(trace.last().map(|s| s.action), Some(Action::Done));
    // One visit per parent index: 2, 1, 0
    let visits = trace.actions().iter().filter(|a| **a == Action::Visit).count();
    assert_eq!(visits, 3);
}

#[test]
fn heap_sort_leaves_heap_untouched() {
    let mut rng = StdRng::seed_from_u64(3);
    let values: Vec<i64> = (0..40).map(|_| rng.gen_range(0..100)).collect();
    let mut heap = MaxHeap::new();
    for &v in &values {
        heap.insert(v);
    }
    let before = heap.to_vec();

    let result = heap.heap_sort();
    assert_eq!(result, sorted(values));
    assert_eq!(heap.to_vec(), before);
    assert_eq!(heap.size(), before.len());
}

#[test]
fn extract_from_empty_heap_is_none() {
    let mut heap: MaxHeap<i64> = MaxHeap::new();
    assert_eq!(heap.extract_max(), None);
    assert_eq!(heap.peek(), None);
    assert_eq!(heap.last_trace().actions(), vec![Action::NotFound]);
    assert!(heap.heap_sort().is_empty());
}

#[test]
fn extract_returns_values_in_descending_order() {
    let mut heap = MaxHeap::new();
    heap.build_heap(vec![7, 1, 8, 3, 8]);
    let mut drained = Vec::new();
    while let Some(v) = heap.extract_max() {
        drained.push(v);
    }
    assert_eq!(drained, vec![8, 8, 7, 3, 1]);
    assert!(heap.is_empty());
}
