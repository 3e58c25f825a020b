use algoviz::catalog::{Algorithm, AlgorithmType};
use algoviz::trace::{Action, Playback, Recorder, Trace, TraceConfig};
use std::time::Duration;

fn counting_trace(len: usize) -> Trace<usize> {
    let mut rec = Recorder::new(TraceConfig::default(), Algorithm::BubbleSort);
    for i in 0..len {
        rec.record(Action::Compare, format!("step {}", i), None, || i);
    }
    rec.finish()
}

#[test]
fn steps_are_numbered_from_one() {
    let trace = counting_trace(4);
    let numbers: Vec<usize> = trace.iter().map(|s| s.step).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    assert_eq!(trace.descriptions(), vec!["step 0", "step 1", "step 2", "step 3"]);
}

#[test]
fn disabled_recorder_never_builds_snapshots() {
    let mut rec: Recorder<Vec<i64>> = Recorder::new(TraceConfig::disabled(), Algorithm::Stack);
    rec.record(Action::Push, "push", None, || panic!("snapshot taken"));
    assert!(rec.is_empty());
    assert!(rec.finish().is_empty());
}

#[test]
fn steps_carry_the_pseudocode_line() {
    let trace = counting_trace(1);
    let line = trace.first().and_then(|s| s.line).expect("line");
    assert_eq!(Some(line), Algorithm::BubbleSort.line_for(Action::Compare));
    let listing: Vec<&str> = Algorithm::BubbleSort.pseudocode().lines().collect();
    assert!(line >= 1 && line <= listing.len());
}

#[test]
fn every_mapped_line_exists_in_its_listing() {
    let actions = [
        Action::Start,
        Action::Compare,
        Action::Visit,
        Action::Enqueue,
        Action::Dequeue,
        Action::Push,
        Action::Pop,
        Action::Insert,
        Action::Remove,
        Action::Update,
        Action::Swap,
        Action::Probe,
        Action::Relax,
        Action::Found,
        Action::NotFound,
        Action::Done,
    ];
    for algorithm in Algorithm::ALL {
        let lines = algorithm.pseudocode().lines().count();
        for action in actions {
            if let Some(line) = algorithm.line_for(action) {
                assert!(
                    (1..=lines).contains(&line),
                    "{} maps {:?} to line {} of {}",
                    algorithm,
                    action,
                    line,
                    lines
                );
            }
        }
    }
}

#[test]
fn catalog_names_round_trip() {
    for algorithm in Algorithm::ALL {
        assert_eq!(Algorithm::from_name(algorithm.name()), Some(algorithm));
    }
    assert_eq!(Algorithm::from_name("bogo-sort"), None);
    assert_eq!(Algorithm::Dijkstra.algorithm_type(), AlgorithmType::Graphs);
    assert_eq!(Algorithm::TreeTraversal.algorithm_type(), AlgorithmType::Trees);
    assert_eq!(Algorithm::HashTable.algorithm_type(), AlgorithmType::DataStructures);
    assert_eq!(Algorithm::QuickSort.complexity().worst, "O(n²)");
}

#[test]
fn playback_clamps_every_move() {
    let mut playback = Playback::new(counting_trace(3));
    assert_eq!(playback.position(), 0);
    assert_eq!(playback.previous_step().map(|s| s.state), Some(0));
    assert_eq!(playback.next_step().map(|s| s.state), Some(1));
    assert_eq!(playback.next_step().map(|s| s.state), Some(2));
    assert!(playback.is_at_end());
    assert_eq!(playback.next_step().map(|s| s.state), Some(2));
    assert_eq!(playback.go_to(100).map(|s| s.state), Some(2));
    assert_eq!(playback.steps_completed(), 3);
    assert_eq!(playback.reset().map(|s| s.state), Some(0));
    assert_eq!(playback.steps_completed(), 1);
}

#[test]
fn empty_playback_has_no_current_step() {
    let mut playback: Playback<usize> = Playback::default();
    assert!(playback.current().is_none());
    assert!(playback.next_step().is_none());
    assert!(playback.go_to(3).is_none());
    assert_eq!(playback.position(), 0);
    assert_eq!(playback.steps_completed(), 0);
}

#[test]
fn map_state_keeps_metadata() {
    let trace = counting_trace(2).map_state(|n| n * 10);
    assert_eq!(trace.steps()[1].state, 10);
    assert_eq!(trace.steps()[1].step, 2);
    assert_eq!(trace.steps()[1].description, "step 1");
}

#[test]
fn trace_serializes_with_snake_case_actions() {
    let json = serde_json::to_value(counting_trace(1)).expect("serialize");
    assert_eq!(json["steps"][0]["action"], "compare");
    assert_eq!(json["steps"][0]["state"], 0);
}

#[test]
fn config_builders() {
    let config = TraceConfig::default().with_delay(Duration::from_millis(250));
    assert!(config.enabled);
    assert_eq!(config.delay, Duration::from_millis(250));
    assert!(!TraceConfig::disabled().enabled);
}
