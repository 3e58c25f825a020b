use algoviz::catalog::Algorithm;
use algoviz::searching::{SearchProbe, SearchingAlgorithms};
use algoviz::trace::Action;

const SAMPLE: [i64; 10] = [3, 7, 12, 15, 18, 22, 25, 30, 35, 40];

fn searcher() -> SearchingAlgorithms<i64> {
    let mut search = SearchingAlgorithms::new();
    search.set_array(&SAMPLE);
    search
}

#[test]
fn binary_search_narrows_to_the_target() {
    let mut search = searcher();
    assert_eq!(search.binary_search(&22), Some(5));
    assert_eq!(search.last_algorithm(), Algorithm::BinarySearch);

    let mids: Vec<Option<usize>> = search
        .steps()
        .iter()
        .map(|s| match &s.state.probe {
            SearchProbe::Binary { mid, .. } => *mid,
            SearchProbe::Linear { .. } => None,
        })
        .collect();
    assert_eq!(mids, vec![Some(4), Some(7), Some(5)]);

    let bounds: Vec<(isize, isize)> = search
        .steps()
        .iter()
        .filter_map(|s| match &s.state.probe {
            SearchProbe::Binary { left, right, .. } => Some((*left, *right)),
            SearchProbe::Linear { .. } => None,
        })
        .collect();
    assert_eq!(bounds, vec![(0, 9), (5, 9), (5, 6)]);

    let last = search.steps().last().expect("steps");
    assert!(last.state.found);
    assert_eq!(last.action, Action::Found);
    assert_eq!(
        last.description,
        "Step 3: Checking middle element at index 5 (22) - Found!"
    );
    assert_eq!(
        search.steps().steps()[0].description,
        "Step 1: Checking middle element at index 4 (18) - Target 22 > 18, searching right half [5...9]"
    );
}

#[test]
fn exhausted_binary_search_adds_a_closing_step() {
    let mut search = searcher();
    assert_eq!(search.binary_search(&1), None);
    let last = search.steps().last().expect("steps");
    assert_eq!(last.action, Action::NotFound);
    assert!(last.description.ends_with("Target 1 not found in array"));
    assert!(search.steps().iter().all(|s| !s.state.found));
    assert_eq!(
        last.state.probe,
        SearchProbe::Binary {
            left: 0,
            right: -1,
            mid: None,
            mid_value: None
        }
    );
}

#[test]
fn linear_search_miss_checks_every_index() {
    let mut search = searcher();
    assert_eq!(search.linear_search(&99), None);
    assert_eq!(search.total_steps(), 10);
    assert!(search.steps().iter().all(|s| !s.state.found));
    let last = search.steps().last().expect("steps");
    assert_eq!(
        last.description,
        "Checking element at index 9: 40 - Target 99 not found in array"
    );
    assert_eq!(last.action, Action::NotFound);
}

#[test]
fn linear_search_hit_stops_early() {
    let mut search = searcher();
    assert_eq!(search.linear_search(&15), Some(3));
    assert_eq!(search.total_steps(), 4);
    assert_eq!(
        search.steps().last().map(|s| s.description.as_str()),
        Some("Checking element at index 3: 15 - Found!")
    );
}

#[test]
fn navigation_is_clamped() {
    let mut search = searcher();
    search.linear_search(&99);
    assert_eq!(search.current_step(), 0);
    assert!(search.previous_step().is_some());
    assert_eq!(search.current_step(), 0);

    search.go_to_step(50);
    assert_eq!(search.current_step(), 9);
    search.next_step();
    assert_eq!(search.current_step(), 9);

    search.go_to_step(4);
    assert_eq!(search.current_step_data().map(|s| s.step), Some(5));
    search.reset();
    assert_eq!(search.current_step(), 0);
}

#[test]
fn input_is_sorted_and_history_resets() {
    let mut search = SearchingAlgorithms::new();
    search.set_array(&[9, 1, 5]);
    assert_eq!(search.array(), &[1, 5, 9]);
    assert!(search.is_sorted());
    assert_eq!(search.array_size(), 3);

    search.binary_search(&5);
    assert_eq!(search.total_steps(), 1);
    search.set_array(&[4]);
    assert_eq!(search.total_steps(), 0);
    assert!(search.current_step_data().is_none());
}
