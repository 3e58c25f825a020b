use algoviz::graph::Graph;
use algoviz::trace::Action;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// Helper: every vertex appears exactly once in a traversal of a connected graph
fn assert_visits_each_once(graph: &Graph, order: &[String]) {
    assert_eq!(order.len(), graph.vertex_count(), "order {:?}", order);
    let mut sorted = order.to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), order.len(), "duplicate visit in {:?}", order);
}

// A random spanning tree plus extra edges, so the graph is always connected
fn random_connected_graph(seed: u64, vertices: usize, extra: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();
    graph.add_vertex("v0");
    for i in 1..vertices {
        let parent = rng.gen_range(0..i);
        graph.add_edge(&format!("v{}", i), &format!("v{}", parent));
    }
    for _ in 0..extra {
        let a = rng.gen_range(0..vertices);
        let b = rng.gen_range(0..vertices);
        if a != b {
            graph.add_edge(&format!("v{}", a), &format!("v{}", b));
        }
    }
    graph
}

#[test]
fn traversals_reach_every_vertex_once() {
    for seed in 0..15 {
        let graph = random_connected_graph(seed, 12, 8);
        assert_visits_each_once(&graph, &graph.breadth_first_search("v0"));
        assert_visits_each_once(&graph, &graph.depth_first_search("v0"));
        assert_visits_each_once(&graph, &graph.depth_first_search_iterative("v0"));
    }
}

#[test]
fn traversal_orders_follow_insertion_order() {
    let graph = Graph::from_edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "E")]);
    assert_eq!(graph.breadth_first_search("A"), names(&["A", "B", "C", "D", "E"]));
    assert_eq!(graph.depth_first_search("A"), names(&["A", "B", "D", "C", "E"]));
    // The stack pops the last discovered neighbour first
    assert_eq!(
        graph.depth_first_search_iterative("A"),
        names(&["A", "C", "E", "B", "D"])
    );
}

#[test]
fn missing_start_vertex_gives_empty_results() {
    let graph = Graph::from_edges(&[("A", "B")]);
    assert!(graph.breadth_first_search("Z").is_empty());
    assert!(graph.depth_first_search("Z").is_empty());
    assert!(graph.depth_first_search_iterative("Z").is_empty());
    assert_eq!(graph.breadth_first_search_with_path("Z", "A"), None);

    let traced = graph.breadth_first_search_traced("Z");
    assert_eq!(traced.trace.actions(), vec![Action::NotFound]);
}

#[test]
fn paths_between_vertices() {
    let graph = Graph::from_edges(&[("A", "B"), ("B", "D"), ("A", "C"), ("C", "D"), ("E", "F")]);
    assert_eq!(
        graph.breadth_first_search_with_path("A", "D"),
        Some(names(&["A", "B", "D"]))
    );
    assert_eq!(
        graph.depth_first_search_with_path("A", "D"),
        Some(names(&["A", "B", "D"]))
    );
    assert_eq!(graph.breadth_first_search_with_path("A", "F"), None);
    assert_eq!(graph.depth_first_search_with_path("A", "F"), None);
    assert_eq!(graph.breadth_first_search_with_path("A", "A"), Some(names(&["A"])));

    let traced = graph.breadth_first_search_with_path_traced("A", "D");
    assert_eq!(traced.trace.last().map(|s| s.action), Some(Action::Found));
}

#[test]
fn bfs_trace_marks_vertices_on_discovery() {
    let graph = Graph::from_edges(&[("A", "B"), ("A", "C")]);
    let traced = graph.breadth_first_search_traced("A");
    assert_eq!(
        traced.trace.actions(),
        vec![
            Action::Start,
            Action::Dequeue,
            Action::Enqueue,
            Action::Enqueue,
            Action::Dequeue,
            Action::Dequeue,
            Action::Done
        ]
    );
    let after_discovery = &traced.trace.steps()[3].state;
    assert_eq!(after_discovery.visited, names(&["A", "B", "C"]));
    assert_eq!(after_discovery.frontier, names(&["B", "C"]));
    assert_eq!(after_discovery.order, names(&["A"]));
}

#[test]
fn cycle_detection_ignores_the_parent_edge() {
    let path = Graph::from_edges(&[("A", "B"), ("B", "C")]);
    assert!(!path.has_cycle());

    let triangle = Graph::from_edges(&[("A", "B"), ("B", "C"), ("C", "A")]);
    assert!(triangle.has_cycle());

    let mut forest = Graph::from_edges(&[("A", "B"), ("C", "D")]);
    forest.add_vertex("E");
    assert!(!forest.has_cycle());
    forest.add_edge("D", "E");
    forest.add_edge("E", "C");
    assert!(forest.has_cycle());

    assert!(!Graph::new().has_cycle());
}

#[test]
fn removing_edges_and_vertices() {
    let mut graph = Graph::from_edges(&[("A", "B"), ("B", "C"), ("C", "A")]);
    assert_eq!(graph.edge_count(), 3);
    graph.remove_edge("A", "C");
    assert!(!graph.has_cycle());
    assert_eq!(graph.neighbors("A"), Some(&names(&["B"])[..]));

    assert!(graph.remove_vertex("B"));
    assert!(!graph.remove_vertex("B"));
    assert_eq!(graph.vertices(), names(&["A", "C"]));
    assert_eq!(graph.breadth_first_search("A"), names(&["A"]));
}

#[test]
fn adjacency_round_trips_through_from_adjacency() {
    let mut adjacency = IndexMap::new();
    adjacency.insert("X".to_string(), names(&["Y"]));
    adjacency.insert("Y".to_string(), names(&["X"]));
    let graph = Graph::from_adjacency(adjacency.clone());
    assert_eq!(graph.adjacency(), &adjacency);
    assert_eq!(graph.depth_first_search("Y"), names(&["Y", "X"]));
}
