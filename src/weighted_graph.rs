//! Undirected graph with non-negative edge weights and Dijkstra's shortest paths.

use crate::catalog::Algorithm;
use crate::trace::{Action, Highlight, Recorder, TraceConfig, Traced};
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub node: String,
    pub weight: u64,
}

/// `distance` is `None` and `path` empty when `end` cannot be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPath {
    pub path: Vec<String>,
    pub distance: Option<u64>,
}

impl ShortestPath {
    fn unreachable() -> Self {
        ShortestPath {
            path: Vec::new(),
            distance: None,
        }
    }
}

/// Full single-source result: tentative distances (`None` = infinity) and predecessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllShortestPaths {
    pub distances: IndexMap<String, Option<u64>>,
    pub previous: IndexMap<String, Option<String>>,
}

impl AllShortestPaths {
    /// Vertices from the source to `target`, or `None` when `target` is unreachable.
    pub fn path_to(&self, target: &str) -> Option<Vec<String>> {
        self.distances.get(target).copied().flatten()?;
        let mut path = vec![target.to_string()];
        let mut current = target;
        while let Some(Some(prev)) = self.previous.get(current) {
            path.push(prev.clone());
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedVertex {
    pub vertex: String,
    pub priority: u64,
}

/// State shown by a Dijkstra step. `queue` lists pending entries in the order they will be
/// taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DijkstraFrame {
    pub distances: IndexMap<String, Option<u64>>,
    pub visited: Vec<String>,
    pub queue: Vec<QueuedVertex>,
}

/// Min-queue on (distance, insertion sequence): equal distances leave in insertion order.
type PendingQueue = BinaryHeap<Reverse<(u64, u64, String)>>;

fn dijkstra_frame(
    distances: &IndexMap<String, Option<u64>>,
    visited: &IndexSet<String>,
    queue: &PendingQueue,
) -> DijkstraFrame {
    let mut pending: Vec<_> = queue.iter().map(|Reverse(entry)| entry).collect();
    pending.sort();
    DijkstraFrame {
        distances: distances.clone(),
        visited: visited.iter().cloned().collect(),
        queue: pending
            .into_iter()
            .map(|(priority, _, vertex)| QueuedVertex {
                vertex: vertex.clone(),
                priority: *priority,
            })
            .collect(),
    }
}

fn show(distance: Option<u64>) -> String {
    distance.map_or_else(|| "inf".to_string(), |d| d.to_string())
}

#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    adjacency: IndexMap<String, Vec<WeightedEdge>>,
    config: TraceConfig,
}

impl WeightedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TraceConfig) -> Self {
        WeightedGraph {
            adjacency: IndexMap::new(),
            config,
        }
    }

    pub fn from_edges(edges: &[(&str, &str, u64)]) -> Self {
        let mut graph = Self::new();
        for (a, b, weight) in edges {
            graph.add_edge(a, b, *weight);
        }
        graph
    }

    pub fn add_vertex(&mut self, vertex: &str) -> bool {
        if self.adjacency.contains_key(vertex) {
            return false;
        }
        self.adjacency.insert(vertex.to_string(), Vec::new());
        true
    }

    pub fn add_edge(&mut self, a: &str, b: &str, weight: u64) {
        self.add_vertex(a);
        self.add_vertex(b);
        if let Some(list) = self.adjacency.get_mut(a) {
            list.push(WeightedEdge {
                node: b.to_string(),
                weight,
            });
        }
        if let Some(list) = self.adjacency.get_mut(b) {
            list.push(WeightedEdge {
                node: a.to_string(),
                weight,
            });
        }
    }

    pub fn remove_edge(&mut self, a: &str, b: &str) {
        if let Some(list) = self.adjacency.get_mut(a) {
            list.retain(|e| e.node != b);
        }
        if let Some(list) = self.adjacency.get_mut(b) {
            list.retain(|e| e.node != a);
        }
    }

    pub fn remove_vertex(&mut self, vertex: &str) -> bool {
        let Some(edges) = self.adjacency.get(vertex).cloned() else {
            return false;
        };
        for edge in edges.iter().rev() {
            self.remove_edge(vertex, &edge.node);
        }
        self.adjacency.shift_remove(vertex);
        true
    }

    pub fn contains_vertex(&self, vertex: &str) -> bool {
        self.adjacency.contains_key(vertex)
    }

    pub fn vertices(&self) -> Vec<String> {
        self.adjacency.keys().cloned().collect()
    }

    pub fn neighbors(&self, vertex: &str) -> Option<&[WeightedEdge]> {
        self.adjacency.get(vertex).map(Vec::as_slice)
    }

    pub fn adjacency(&self) -> &IndexMap<String, Vec<WeightedEdge>> {
        &self.adjacency
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
    }

    /// Shortest path from `start` to `end`. Stops as soon as `end` leaves the queue.
    pub fn dijkstra(&self, start: &str, end: &str) -> ShortestPath {
        self.shortest_path(start, end, &mut Recorder::disabled(Algorithm::Dijkstra))
    }

    pub fn dijkstra_traced(&self, start: &str, end: &str) -> Traced<ShortestPath, DijkstraFrame> {
        let mut rec = Recorder::new(self.config, Algorithm::Dijkstra);
        let result = self.shortest_path(start, end, &mut rec);
        Traced {
            result,
            trace: rec.finish(),
        }
    }

    fn shortest_path(
        &self,
        start: &str,
        end: &str,
        rec: &mut Recorder<DijkstraFrame>,
    ) -> ShortestPath {
        if !self.contains_vertex(start) || !self.contains_vertex(end) {
            warn!("dijkstra endpoints {} and {} must both exist", start, end);
            rec.record(
                Action::NotFound,
                format!("{} or {} is not in the graph", start, end),
                None,
                DijkstraFrame::default,
            );
            return ShortestPath::unreachable();
        }

        let paths = self.relax_from(start, Some(end), rec);
        let result = match paths.path_to(end) {
            Some(path) => ShortestPath {
                path,
                distance: paths.distances.get(end).copied().flatten(),
            },
            None => ShortestPath::unreachable(),
        };
        match result.distance {
            Some(distance) => rec.record(
                Action::Done,
                format!("Shortest path {} with distance {}", result.path.join(" -> "), distance),
                Some(Highlight::Vertex(end.to_string())),
                || DijkstraFrame {
                    distances: paths.distances.clone(),
                    ..DijkstraFrame::default()
                },
            ),
            None => rec.record(
                Action::NotFound,
                format!("{} is not reachable from {}", end, start),
                None,
                || DijkstraFrame {
                    distances: paths.distances.clone(),
                    ..DijkstraFrame::default()
                },
            ),
        }
        debug!("dijkstra {} -> {}: {:?}", start, end, result.distance);
        result
    }

    /// Distances and predecessors for every vertex, without early exit.
    pub fn all_shortest_paths(&self, start: &str) -> AllShortestPaths {
        self.all_shortest_paths_with(start, &mut Recorder::disabled(Algorithm::Dijkstra))
    }

    pub fn all_shortest_paths_traced(
        &self,
        start: &str,
    ) -> Traced<AllShortestPaths, DijkstraFrame> {
        let mut rec = Recorder::new(self.config, Algorithm::Dijkstra);
        let result = self.all_shortest_paths_with(start, &mut rec);
        Traced {
            result,
            trace: rec.finish(),
        }
    }

    fn all_shortest_paths_with(
        &self,
        start: &str,
        rec: &mut Recorder<DijkstraFrame>,
    ) -> AllShortestPaths {
        if !self.contains_vertex(start) {
            warn!("dijkstra start vertex {} does not exist", start);
            rec.record(
                Action::NotFound,
                format!("{} is not in the graph", start),
                None,
                DijkstraFrame::default,
            );
            return AllShortestPaths::default();
        }
        let paths = self.relax_from(start, None, rec);
        rec.record(
            Action::Done,
            "Queue is empty, every reachable vertex is settled",
            None,
            || DijkstraFrame {
                distances: paths.distances.clone(),
                ..DijkstraFrame::default()
            },
        );
        paths
    }

    /// Core relaxation loop shared by both entry points.
    fn relax_from(
        &self,
        start: &str,
        end: Option<&str>,
        rec: &mut Recorder<DijkstraFrame>,
    ) -> AllShortestPaths {
        let mut distances: IndexMap<String, Option<u64>> =
            self.adjacency.keys().map(|v| (v.clone(), None)).collect();
        let mut previous: IndexMap<String, Option<String>> =
            self.adjacency.keys().map(|v| (v.clone(), None)).collect();
        let mut visited = IndexSet::new();
        let mut queue = PendingQueue::new();
        let mut sequence = 0u64;

        distances.insert(start.to_string(), Some(0));
        queue.push(Reverse((0, sequence, start.to_string())));
        rec.record(
            Action::Start,
            format!("dist[{}] = 0, every other vertex starts at infinity", start),
            Some(Highlight::Vertex(start.to_string())),
            || dijkstra_frame(&distances, &visited, &queue),
        );

        while let Some(Reverse((_, _, current))) = queue.pop() {
            let settled = visited.contains(&current);
            rec.record(
                Action::Dequeue,
                if settled {
                    format!("{} was already settled, skip it", current)
                } else {
                    let distance = distances.get(&current).copied().flatten();
                    format!("Take {} with distance {}", current, show(distance))
                },
                Some(Highlight::Vertex(current.clone())),
                || dijkstra_frame(&distances, &visited, &queue),
            );
            if end == Some(current.as_str()) {
                rec.record(
                    Action::Found,
                    format!("Reached {}", current),
                    Some(Highlight::Vertex(current.clone())),
                    || dijkstra_frame(&distances, &visited, &queue),
                );
                break;
            }
            if settled {
                continue;
            }
            visited.insert(current.clone());
            rec.record(
                Action::Visit,
                format!("Settle {}", current),
                Some(Highlight::Vertex(current.clone())),
                || dijkstra_frame(&distances, &visited, &queue),
            );

            let Some(base) = distances.get(&current).copied().flatten() else {
                continue;
            };
            for edge in self.adjacency.get(&current).map_or(&[][..], Vec::as_slice) {
                if visited.contains(&edge.node) {
                    continue;
                }
                let candidate = base.saturating_add(edge.weight);
                let known = distances.get(&edge.node).copied().flatten();
                rec.record(
                    Action::Compare,
                    format!(
                        "dist[{}] + {} = {} vs dist[{}] = {}",
                        current,
                        edge.weight,
                        candidate,
                        edge.node,
                        show(known)
                    ),
                    Some(Highlight::Edge(current.clone(), edge.node.clone())),
                    || dijkstra_frame(&distances, &visited, &queue),
                );
                if known.is_none_or(|d| candidate < d) {
                    distances.insert(edge.node.clone(), Some(candidate));
                    previous.insert(edge.node.clone(), Some(current.clone()));
                    sequence += 1;
                    queue.push(Reverse((candidate, sequence, edge.node.clone())));
                    rec.record(
                        Action::Relax,
                        format!("Relax {}: distance {} via {}", edge.node, candidate, current),
                        Some(Highlight::Edge(current.clone(), edge.node.clone())),
                        || dijkstra_frame(&distances, &visited, &queue),
                    );
                }
            }
        }

        AllShortestPaths {
            distances,
            previous,
        }
    }
}
