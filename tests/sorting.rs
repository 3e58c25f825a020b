use algoviz::sorting::{SortAlgorithm, bubble_sort, merge_sort, quick_sort, random_array};
use algoviz::trace::{Action, TraceConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

const ALL: [SortAlgorithm; 3] = [SortAlgorithm::Bubble, SortAlgorithm::Merge, SortAlgorithm::Quick];

#[test]
fn every_sort_agrees_with_std() {
    let mut rng = StdRng::seed_from_u64(1234);
    for len in [0, 1, 2, 5, 17, 40] {
        let values = random_array(len, 50, &mut rng);
        let mut expected = values.clone();
        expected.sort();
        for algorithm in ALL {
            let traced = algorithm.sort(&values, TraceConfig::default());
            assert_eq!(traced.result, expected, "{:?} on {:?}", algorithm, values);
            assert_eq!(traced.trace.last().map(|s| s.action), Some(Action::Done));
            assert_eq!(
                traced.trace.last().map(|s| s.state.array.clone()),
                Some(expected.clone())
            );
        }
    }
}

#[test]
fn random_array_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(8);
    let values = random_array(200, 10, &mut rng);
    assert_eq!(values.len(), 200);
    assert!(values.iter().all(|v| (1..=10).contains(v)));
}

#[test]
fn bubble_sort_compares_adjacent_pairs() {
    let traced = bubble_sort(&[3, 1, 2], TraceConfig::default());
    assert_eq!(traced.result, vec![1, 2, 3]);
    assert_eq!(
        traced.trace.actions(),
        vec![
            Action::Compare,
            Action::Swap,
            Action::Compare,
            Action::Swap,
            Action::Compare,
            Action::Done
        ]
    );
    assert_eq!(traced.trace.steps()[1].state.array, vec![1, 3, 2]);
}

#[test]
fn merge_sort_is_stable() {
    #[derive(Debug, Clone)]
    struct Card(u32, char);

    impl PartialEq for Card {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl PartialOrd for Card {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            self.0.partial_cmp(&other.0)
        }
    }

    impl std::fmt::Display for Card {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}{}", self.0, self.1)
        }
    }

    let cards = vec![Card(2, 'a'), Card(1, 'b'), Card(2, 'c'), Card(1, 'd')];
    let sorted = merge_sort(&cards, TraceConfig::disabled()).result;
    let suits: String = sorted.iter().map(|c| c.1).collect();
    assert_eq!(suits, "bdac");
}

#[test]
fn quick_sort_records_pivots() {
    let traced = quick_sort(&[4, 9, 2, 7], TraceConfig::default());
    assert_eq!(traced.result, vec![2, 4, 7, 9]);
    let first_pivot = traced
        .trace
        .iter()
        .find(|s| s.action == Action::Start)
        .expect("pivot step");
    assert_eq!(first_pivot.description, "Pivot is 7");
    assert_eq!(first_pivot.state.pivot, Some(3));
}

#[test]
fn disabled_tracing_still_sorts() {
    let traced = quick_sort(&[5, -1, 3], TraceConfig::disabled());
    assert_eq!(traced.result, vec![-1, 3, 5]);
    assert!(traced.trace.is_empty());
}
