use algoviz::circular_linked_list::CircularLinkedList;
use algoviz::doubly_linked_list::DoublyLinkedList;
use algoviz::linked_list::SinglyLinkedList;
use algoviz::trace::Action;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Helper: following `.next` from head `size` times must land on head again
fn assert_ring_closes(list: &CircularLinkedList<i64>) {
    let Some(head) = list.head_handle() else {
        assert_eq!(list.size(), 0);
        return;
    };
    let mut current = head;
    let mut seen = Vec::new();
    for _ in 0..list.size() {
        seen.push(*list.value_at(current).expect("live handle"));
        current = list.next_handle(current).expect("live handle");
    }
    assert_eq!(current, head, "ring does not close after {} hops", list.size());
    assert_eq!(seen, list.to_vec());
}

#[test]
fn singly_list_inserts_at_both_ends() {
    let mut list = SinglyLinkedList::new();
    list.insert_at_tail(2);
    list.insert_at_head(1);
    list.insert_at_tail(3);
    assert_eq!(list.to_vec(), vec![1, 2, 3]);
    assert_eq!(list.size(), 3);
    assert_eq!(list.search(&3), Some(2));
    assert_eq!(list.search(&9), None);
}

#[test]
fn singly_list_delete_unlinks_first_match() {
    let mut list = SinglyLinkedList::new();
    for v in [5, 7, 5, 9] {
        list.insert_at_tail(v);
    }
    assert!(list.delete(&5));
    assert_eq!(list.to_vec(), vec![7, 5, 9]);
    assert!(list.delete(&9));
    assert_eq!(list.to_vec(), vec![7, 5]);
    assert!(!list.delete(&42));
    assert_eq!(list.last_trace().last().map(|s| s.action), Some(Action::NotFound));
}

#[test]
fn search_traced_compares_each_node_until_match() {
    let mut list = SinglyLinkedList::new();
    for v in [4, 8, 15] {
        list.insert_at_tail(v);
    }
    let traced = list.search_traced(&15);
    assert_eq!(traced.result, Some(2));
    assert_eq!(
        traced.trace.actions(),
        vec![Action::Compare, Action::Compare, Action::Compare, Action::Found]
    );
}

#[test]
fn doubly_list_back_links_mirror_forward_links() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut list = DoublyLinkedList::new();
    for _ in 0..50 {
        let v: i64 = rng.gen_range(0..20);
        match rng.gen_range(0..3) {
            0 => list.insert_at_head(v),
            1 => list.insert_at_tail(v),
            _ => {
                list.delete(&v);
            }
        }
        let mut reversed = list.to_vec();
        reversed.reverse();
        assert_eq!(list.to_vec_reverse(), reversed);
        assert_eq!(list.to_vec().len(), list.size());
    }
}

#[test]
fn doubly_list_head_and_tail_follow_deletes() {
    let mut list = DoublyLinkedList::new();
    for v in [1, 2, 3] {
        list.insert_at_tail(v);
    }
    assert!(list.delete(&1));
    assert_eq!(list.head(), Some(&2));
    assert!(list.delete(&3));
    assert_eq!(list.tail(), Some(&2));
    assert!(list.delete(&2));
    assert!(list.is_empty());
    assert_eq!(list.head(), None);
    assert_eq!(list.tail(), None);
}

#[test]
fn circular_list_stays_closed_under_random_edits() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut list = CircularLinkedList::new();
    for _ in 0..60 {
        let v: i64 = rng.gen_range(0..15);
        match rng.gen_range(0..3) {
            0 => list.insert_at_head(v),
            1 => list.insert_at_tail(v),
            _ => {
                list.delete(&v);
            }
        }
        assert_ring_closes(&list);
    }
}

#[test]
fn circular_list_head_insert_and_head_delete() {
    let mut list = CircularLinkedList::new();
    list.insert_at_tail(2);
    list.insert_at_tail(3);
    list.insert_at_head(1);
    assert_eq!(list.to_vec(), vec![1, 2, 3]);
    assert_ring_closes(&list);

    assert!(list.delete(&1));
    assert_eq!(list.to_vec(), vec![2, 3]);
    assert_ring_closes(&list);

    assert!(list.delete(&2));
    assert!(list.delete(&3));
    assert!(list.is_empty());
    assert_eq!(list.head_handle(), None);
}

#[test]
fn single_node_ring_points_to_itself() {
    let mut list = CircularLinkedList::new();
    list.insert_at_head(9);
    let head = list.head_handle().expect("head");
    assert_eq!(list.next_handle(head), Some(head));
    assert_eq!(list.search(&9), Some(0));
}
