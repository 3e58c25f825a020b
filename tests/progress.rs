use algoviz::catalog::{Algorithm, AlgorithmType};
use algoviz::hash_table::{CollisionPolicy, HashTable};
use algoviz::progress::{CompletionStatus, ExportState, ProgressDocument};
use algoviz::stack::Stack;
use algoviz::trace::Playback;
use serde_json::{Value, json};
use std::time::Duration;

#[test]
fn status_follows_the_cursor() {
    let mut stack = Stack::new();
    stack.push(1);
    stack.pop().expect("one item");
    let mut playback = stack.take_trace().into_playback();

    let doc = ProgressDocument::from_playback(&stack, &playback, Duration::from_secs(42));
    assert_eq!(doc.completion_status, CompletionStatus::InProgress);
    assert_eq!(doc.steps_completed, 1);
    assert_eq!(doc.total_steps, 2);
    assert_eq!(doc.time_spent, 42);
    assert_eq!(doc.last_step, "Pop 1 from the top");

    playback.next_step();
    let doc = ProgressDocument::from_playback(&stack, &playback, Duration::ZERO);
    assert_eq!(doc.completion_status, CompletionStatus::Completed);

    let empty: Playback<Vec<i64>> = Playback::default();
    let doc = ProgressDocument::from_playback(&stack, &empty, Duration::ZERO);
    assert_eq!(doc.completion_status, CompletionStatus::NotStarted);
    assert_eq!(doc.last_step, "");
}

#[test]
fn document_serializes_in_camel_case() {
    let mut table = HashTable::new(4, CollisionPolicy::SeparateChaining).expect("table");
    table.insert("kiwi", 3).expect("insert");
    let playback = table.take_trace().into_playback();

    let doc = ProgressDocument::from_playback(&table, &playback, Duration::from_secs(5))
        .with_notes("collisions make sense now")
        .with_status(CompletionStatus::Mastered);
    let json: Value = serde_json::from_str(&doc.to_json().expect("encode")).expect("decode");

    assert_eq!(json["algorithmType"], "data-structures");
    assert_eq!(json["algorithmName"], "hash-table");
    assert_eq!(json["completionStatus"], "mastered");
    assert_eq!(json["timeSpent"], 5);
    assert_eq!(json["notes"], "collisions make sense now");
    assert_eq!(json["progressData"]["entries"], json!([{ "key": "kiwi", "value": 3 }]));
    assert!(json["updatedAt"].is_string());

    let back: ProgressDocument = serde_json::from_value(json).expect("round trip");
    assert_eq!(back.algorithm_type, AlgorithmType::DataStructures);
}

#[test]
fn documents_can_be_refiled() {
    let stack: Stack<i64> = Stack::new();
    assert_eq!(stack.algorithm(), Algorithm::Stack);
    assert_eq!(stack.export_state(), json!({ "items": [], "size": 0 }));

    let playback: Playback<Vec<i64>> = Playback::default();
    let doc = ProgressDocument::from_playback(&stack, &playback, Duration::ZERO)
        .for_algorithm(Algorithm::QuickSort);
    assert_eq!(doc.algorithm_type, AlgorithmType::Sorting);
    assert_eq!(doc.algorithm_name, "quick-sort");
}
