use algoviz::trace::Action;
use algoviz::weighted_graph::{ShortestPath, WeightedGraph};

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn sample() -> WeightedGraph {
    WeightedGraph::from_edges(&[("A", "B", 1), ("B", "C", 2), ("A", "C", 4), ("C", "D", 1)])
}

// Helper to check both halves of a shortest path result
fn assert_path(result: &ShortestPath, path: &[&str], distance: Option<u64>) {
    assert_eq!(result.path, names(path));
    assert_eq!(result.distance, distance);
}

#[test]
fn dijkstra_prefers_the_cheaper_detour() {
    let graph = sample();
    assert_path(&graph.dijkstra("A", "D"), &["A", "B", "C", "D"], Some(4));
    assert_path(&graph.dijkstra("D", "A"), &["D", "C", "B", "A"], Some(4));
    assert_path(&graph.dijkstra("A", "A"), &["A"], Some(0));
}

#[test]
fn unreachable_or_missing_endpoints() {
    let mut graph = sample();
    graph.add_vertex("Z");
    assert_path(&graph.dijkstra("A", "Z"), &[], None);
    assert_path(&graph.dijkstra("A", "Q"), &[], None);
    assert_path(&graph.dijkstra("Q", "A"), &[], None);

    let traced = graph.dijkstra_traced("A", "Z");
    assert_eq!(traced.trace.last().map(|s| s.action), Some(Action::NotFound));
}

#[test]
fn all_shortest_paths_cover_every_vertex() {
    let mut graph = sample();
    graph.add_edge("E", "F", 3);
    let all = graph.all_shortest_paths("A");
    assert_eq!(all.distances.get("A"), Some(&Some(0)));
    assert_eq!(all.distances.get("B"), Some(&Some(1)));
    assert_eq!(all.distances.get("C"), Some(&Some(3)));
    assert_eq!(all.distances.get("D"), Some(&Some(4)));
    assert_eq!(all.distances.get("E"), Some(&None));
    assert_eq!(all.previous.get("C"), Some(&Some("B".to_string())));
    assert_eq!(all.path_to("D"), Some(names(&["A", "B", "C", "D"])));
    assert_eq!(all.path_to("F"), None);
}

#[test]
fn trace_relaxes_and_stops_at_the_target() {
    let graph = sample();
    let traced = graph.dijkstra_traced("A", "D");
    let actions = traced.trace.actions();
    assert_eq!(actions.first(), Some(&Action::Start));
    assert_eq!(actions.last(), Some(&Action::Done));
    assert!(actions.contains(&Action::Found));
    // A-B, A-C, B-C improves C, C-D
    assert_eq!(actions.iter().filter(|a| **a == Action::Relax).count(), 4);

    let found = traced
        .trace
        .iter()
        .find(|s| s.action == Action::Found)
        .expect("found step");
    assert_eq!(found.state.distances.get("D"), Some(&Some(4)));
    assert_eq!(found.state.visited, names(&["A", "B", "C"]));
}

#[test]
fn editing_the_graph() {
    let mut graph = sample();
    graph.remove_edge("B", "C");
    assert_path(&graph.dijkstra("A", "D"), &["A", "C", "D"], Some(5));
    assert!(graph.remove_vertex("C"));
    assert_path(&graph.dijkstra("A", "D"), &[], None);
    assert_eq!(graph.vertices(), names(&["A", "B", "D"]));
    assert_eq!(graph.neighbors("A").map(|n| n.len()), Some(1));
}
