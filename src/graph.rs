//! Undirected, unweighted graph with traced traversals.
//!
//! Vertices keep their insertion order, and so does every adjacency list, so all traversal
//! orders below are deterministic.

use crate::catalog::Algorithm;
use crate::trace::{Action, Highlight, Recorder, TraceConfig, Traced};
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// What a traversal step shows: vertices marked so far, the pending frontier (queue or stack,
/// next-out first for a queue, top last for a stack) and the visit order produced so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphFrame {
    pub visited: Vec<String>,
    pub frontier: Vec<String>,
    pub order: Vec<String>,
}

fn frame<'a>(
    visited: &IndexSet<String>,
    frontier: impl IntoIterator<Item = &'a String>,
    order: &[String],
) -> GraphFrame {
    GraphFrame {
        visited: visited.iter().cloned().collect(),
        frontier: frontier.into_iter().cloned().collect(),
        order: order.to_vec(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: IndexMap<String, Vec<String>>,
    config: TraceConfig,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TraceConfig) -> Self {
        Graph {
            adjacency: IndexMap::new(),
            config,
        }
    }

    /// Takes an adjacency description as is. Each edge should appear in both lists.
    pub fn from_adjacency(adjacency: IndexMap<String, Vec<String>>) -> Self {
        Graph {
            adjacency,
            config: TraceConfig::default(),
        }
    }

    pub fn from_edges(edges: &[(&str, &str)]) -> Self {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Returns false when the vertex already existed.
    pub fn add_vertex(&mut self, vertex: &str) -> bool {
        if self.adjacency.contains_key(vertex) {
            return false;
        }
        self.adjacency.insert(vertex.to_string(), Vec::new());
        true
    }

    /// Adds an undirected edge, creating missing endpoints.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        self.add_vertex(a);
        self.add_vertex(b);
        if let Some(list) = self.adjacency.get_mut(a) {
            list.push(b.to_string());
        }
        if let Some(list) = self.adjacency.get_mut(b) {
            list.push(a.to_string());
        }
    }

    /// Drops every `a`-`b` edge.
    pub fn remove_edge(&mut self, a: &str, b: &str) {
        if let Some(list) = self.adjacency.get_mut(a) {
            list.retain(|v| v != b);
        }
        if let Some(list) = self.adjacency.get_mut(b) {
            list.retain(|v| v != a);
        }
    }

    /// Removes all incident edges, then the vertex itself.
    pub fn remove_vertex(&mut self, vertex: &str) -> bool {
        let Some(neighbors) = self.adjacency.get(vertex).cloned() else {
            return false;
        };
        for neighbor in neighbors.iter().rev() {
            self.remove_edge(vertex, neighbor);
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

    pub fn neighbors(&self, vertex: &str) -> Option<&[String]> {
        self.adjacency.get(vertex).map(Vec::as_slice)
    }

    pub fn adjacency(&self) -> &IndexMap<String, Vec<String>> {
        &self.adjacency
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
    }

    fn edges_of(&self, vertex: &str) -> &[String] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }

    pub fn breadth_first_search(&self, start: &str) -> Vec<String> {
        self.bfs(start, &mut Recorder::disabled(Algorithm::BreadthFirstSearch))
    }

    pub fn breadth_first_search_traced(&self, start: &str) -> Traced<Vec<String>, GraphFrame> {
        let mut rec = Recorder::new(self.config, Algorithm::BreadthFirstSearch);
        let result = self.bfs(start, &mut rec);
        Traced {
            result,
            trace: rec.finish(),
        }
    }

    /// Vertices are marked when enqueued, so each is visited once.
    fn bfs(&self, start: &str, rec: &mut Recorder<GraphFrame>) -> Vec<String> {
        let mut order = Vec::new();
        if !self.contains_vertex(start) {
            warn!("bfs start vertex {} does not exist", start);
            rec.record(
                Action::NotFound,
                format!("{} is not in the graph", start),
                None,
                GraphFrame::default,
            );
            return order;
        }

        let mut visited = IndexSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start.to_string());
        queue.push_back(start.to_string());
        rec.record(
            Action::Start,
            format!("Enqueue {} and mark it visited", start),
            Some(Highlight::Vertex(start.to_string())),
            || frame(&visited, &queue, &order),
        );

        while let Some(current) = queue.pop_front() {
            order.push(current.clone());
            rec.record(
                Action::Dequeue,
                format!("Dequeue {} and visit it", current),
                Some(Highlight::Vertex(current.clone())),
                || frame(&visited, &queue, &order),
            );
            for neighbor in self.edges_of(&current) {
                if visited.insert(neighbor.clone()) {
                    queue.push_back(neighbor.clone());
                    rec.record(
                        Action::Enqueue,
                        format!("Discover {} from {}, enqueue it", neighbor, current),
                        Some(Highlight::Edge(current.clone(), neighbor.clone())),
                        || frame(&visited, &queue, &order),
                    );
                }
            }
        }

        rec.record(
            Action::Done,
            format!("Queue is empty, visited {} vertices", order.len()),
            None,
            || frame(&visited, &queue, &order),
        );
        debug!("bfs from {} reached {} vertices", start, order.len());
        order
    }

    /// First path found by breadth-first search, or `None` if `end` is unreachable.
    pub fn breadth_first_search_with_path(&self, start: &str, end: &str) -> Option<Vec<String>> {
        self.bfs_path(start, end, &mut Recorder::disabled(Algorithm::BreadthFirstSearch))
    }

    pub fn breadth_first_search_with_path_traced(
        &self,
        start: &str,
        end: &str,
    ) -> Traced<Option<Vec<String>>, GraphFrame> {
        let mut rec = Recorder::new(self.config, Algorithm::BreadthFirstSearch);
        let result = self.bfs_path(start, end, &mut rec);
        Traced {
            result,
            trace: rec.finish(),
        }
    }

    /// Queues whole paths and marks a vertex visited when it is dequeued.
    fn bfs_path(
        &self,
        start: &str,
        end: &str,
        rec: &mut Recorder<GraphFrame>,
    ) -> Option<Vec<String>> {
        if !self.contains_vertex(start) {
            warn!("path search start vertex {} does not exist", start);
            rec.record(
                Action::NotFound,
                format!("{} is not in the graph", start),
                None,
                GraphFrame::default,
            );
            return None;
        }

        let mut visited = IndexSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<(String, Vec<String>)> = VecDeque::new();
        queue.push_back((start.to_string(), vec![start.to_string()]));
        rec.record(
            Action::Start,
            format!("Enqueue the path [{}]", start),
            Some(Highlight::Vertex(start.to_string())),
            || frame(&visited, queue.iter().map(|(v, _)| v), &order),
        );

        while let Some((current, path)) = queue.pop_front() {
            if current == end {
                rec.record(
                    Action::Found,
                    format!("Reached {} via {}", end, path.join(" -> ")),
                    Some(Highlight::Vertex(current.clone())),
                    || frame(&visited, queue.iter().map(|(v, _)| v), &order),
                );
                return Some(path);
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            order.push(current.clone());
            rec.record(
                Action::Dequeue,
                format!("Dequeue {} and visit it", current),
                Some(Highlight::Vertex(current.clone())),
                || frame(&visited, queue.iter().map(|(v, _)| v), &order),
            );
            for neighbor in self.edges_of(&current) {
                if !visited.contains(neighbor) {
                    let mut extended = path.clone();
                    extended.push(neighbor.clone());
                    queue.push_back((neighbor.clone(), extended));
                    rec.record(
                        Action::Enqueue,
                        format!("Enqueue {} with a path through {}", neighbor, current),
                        Some(Highlight::Edge(current.clone(), neighbor.clone())),
                        || frame(&visited, queue.iter().map(|(v, _)| v), &order),
                    );
                }
            }
        }

        rec.record(
            Action::NotFound,
            format!("{} is not reachable from {}", end, start),
            None,
            || frame(&visited, queue.iter().map(|(v, _)| v), &order),
        );
        None
    }

    pub fn depth_first_search(&self, start: &str) -> Vec<String> {
        self.dfs(start, &mut Recorder::disabled(Algorithm::DepthFirstSearch))
    }

    pub fn depth_first_search_traced(&self, start: &str) -> Traced<Vec<String>, GraphFrame> {
        let mut rec = Recorder::new(self.config, Algorithm::DepthFirstSearch);
        let result = self.dfs(start, &mut rec);
        Traced {
            result,
            trace: rec.finish(),
        }
    }

    /// Recursive pre-order visit. The frontier in each step is the recursion stack.
    fn dfs(&self, start: &str, rec: &mut Recorder<GraphFrame>) -> Vec<String> {
        struct Walk<'g, 'r> {
            graph: &'g Graph,
            visited: IndexSet<String>,
            path: Vec<String>,
            order: Vec<String>,
            rec: &'r mut Recorder<GraphFrame>,
        }

        impl Walk<'_, '_> {
            fn visit(&mut self, vertex: &str) {
                self.visited.insert(vertex.to_string());
                self.path.push(vertex.to_string());
                self.order.push(vertex.to_string());
                self.rec.record(
                    Action::Visit,
                    format!("Visit {}", vertex),
                    Some(Highlight::Vertex(vertex.to_string())),
                    || frame(&self.visited, &self.path, &self.order),
                );
                let graph = self.graph;
                for neighbor in graph.edges_of(vertex) {
                    let seen = self.visited.contains(neighbor);
                    self.rec.record(
                        Action::Compare,
                        if seen {
                            format!("{} was already visited", neighbor)
                        } else {
                            format!("Descend from {} into {}", vertex, neighbor)
                        },
                        Some(Highlight::Edge(vertex.to_string(), neighbor.clone())),
                        || frame(&self.visited, &self.path, &self.order),
                    );
                    if !seen {
                        self.visit(neighbor);
                    }
                }
                self.path.pop();
            }
        }

        if !self.contains_vertex(start) {
            warn!("dfs start vertex {} does not exist", start);
            rec.record(
                Action::NotFound,
                format!("{} is not in the graph", start),
                None,
                GraphFrame::default,
            );
            return Vec::new();
        }
        let mut walk = Walk {
            graph: self,
            visited: IndexSet::new(),
            path: Vec::new(),
            order: Vec::new(),
            rec,
        };
        walk.visit(start);
        debug!("dfs from {} reached {} vertices", start, walk.order.len());
        walk.order
    }

    pub fn depth_first_search_iterative(&self, start: &str) -> Vec<String> {
        self.dfs_iterative(start, &mut Recorder::disabled(Algorithm::DepthFirstSearch))
    }

    pub fn depth_first_search_iterative_traced(
        &self,
        start: &str,
    ) -> Traced<Vec<String>, GraphFrame> {
        let mut rec = Recorder::new(self.config, Algorithm::DepthFirstSearch);
        let result = self.dfs_iterative(start, &mut rec);
        Traced {
            result,
            trace: rec.finish(),
        }
    }

    /// Explicit stack. Neighbours are marked when pushed, so the last neighbour of a vertex
    /// is visited first.
    fn dfs_iterative(&self, start: &str, rec: &mut Recorder<GraphFrame>) -> Vec<String> {
        let mut order = Vec::new();
        if !self.contains_vertex(start) {
            warn!("dfs start vertex {} does not exist", start);
            rec.record(
                Action::NotFound,
                format!("{} is not in the graph", start),
                None,
                GraphFrame::default,
            );
            return order;
        }

        let mut visited = IndexSet::new();
        let mut stack = vec![start.to_string()];
        visited.insert(start.to_string());
        rec.record(
            Action::Start,
            format!("Push {} and mark it visited", start),
            Some(Highlight::Vertex(start.to_string())),
            || frame(&visited, &stack, &order),
        );

        while let Some(current) = stack.pop() {
            order.push(current.clone());
            rec.record(
                Action::Pop,
                format!("Pop {} and visit it", current),
                Some(Highlight::Vertex(current.clone())),
                || frame(&visited, &stack, &order),
            );
            for neighbor in self.edges_of(&current) {
                if visited.insert(neighbor.clone()) {
                    stack.push(neighbor.clone());
                    rec.record(
                        Action::Push,
                        format!("Push {} discovered from {}", neighbor, current),
                        Some(Highlight::Edge(current.clone(), neighbor.clone())),
                        || frame(&visited, &stack, &order),
                    );
                }
            }
        }
        order
    }

    /// First path found by depth-first search, or `None` if `end` is unreachable.
    pub fn depth_first_search_with_path(&self, start: &str, end: &str) -> Option<Vec<String>> {
        self.dfs_path(start, end, &mut Recorder::disabled(Algorithm::DepthFirstSearch))
    }

    pub fn depth_first_search_with_path_traced(
        &self,
        start: &str,
        end: &str,
    ) -> Traced<Option<Vec<String>>, GraphFrame> {
        let mut rec = Recorder::new(self.config, Algorithm::DepthFirstSearch);
        let result = self.dfs_path(start, end, &mut rec);
        Traced {
            result,
            trace: rec.finish(),
        }
    }

    fn dfs_path(
        &self,
        start: &str,
        end: &str,
        rec: &mut Recorder<GraphFrame>,
    ) -> Option<Vec<String>> {
        fn descend(
            graph: &Graph,
            current: &str,
            end: &str,
            path: &mut Vec<String>,
            visited: &mut IndexSet<String>,
            rec: &mut Recorder<GraphFrame>,
        ) -> bool {
            if current == end {
                rec.record(
                    Action::Found,
                    format!("Reached {} via {}", end, path.join(" -> ")),
                    Some(Highlight::Vertex(current.to_string())),
                    || frame(visited, path.iter(), path),
                );
                return true;
            }
            if !visited.insert(current.to_string()) {
                return false;
            }
            rec.record(
                Action::Visit,
                format!("Visit {}", current),
                Some(Highlight::Vertex(current.to_string())),
                || frame(visited, path.iter(), path),
            );
            for neighbor in graph.edges_of(current) {
                path.push(neighbor.clone());
                if descend(graph, neighbor, end, path, visited, rec) {
                    return true;
                }
                path.pop();
            }
            false
        }

        if !self.contains_vertex(start) {
            warn!("path search start vertex {} does not exist", start);
            rec.record(
                Action::NotFound,
                format!("{} is not in the graph", start),
                None,
                GraphFrame::default,
            );
            return None;
        }
        let mut path = vec![start.to_string()];
        let mut visited = IndexSet::new();
        if descend(self, start, end, &mut path, &mut visited, rec) {
            Some(path)
        } else {
            rec.record(
                Action::NotFound,
                format!("{} is not reachable from {}", end, start),
                None,
                || frame(&visited, std::iter::empty(), &[]),
            );
            None
        }
    }

    /// Whether the undirected graph contains a cycle.
    ///
    /// The edge leading back to a vertex's DFS parent is skipped once, so a plain edge is not
    /// reported as a two-vertex cycle, while a doubled edge or a self-loop still is. Treating
    /// every edge as directed would report a cycle for any graph with an edge.
    pub fn has_cycle(&self) -> bool {
        struct Frame<'a> {
            vertex: &'a str,
            parent: Option<&'a str>,
            next: usize,
            parent_skipped: bool,
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut on_stack: HashSet<&str> = HashSet::new();
        for root in self.adjacency.keys() {
            if !visited.insert(root.as_str()) {
                continue;
            }
            on_stack.insert(root.as_str());
            let mut stack = vec![Frame {
                vertex: root.as_str(),
                parent: None,
                next: 0,
                parent_skipped: false,
            }];

            while let Some(top) = stack.last_mut() {
                let Some(neighbor) = self.edges_of(top.vertex).get(top.next) else {
                    on_stack.remove(top.vertex);
                    stack.pop();
                    continue;
                };
                top.next += 1;
                let neighbor = neighbor.as_str();
                if Some(neighbor) == top.parent && !top.parent_skipped {
                    top.parent_skipped = true;
                    continue;
                }
                if on_stack.contains(neighbor) {
                    debug!("back edge {} - {} closes a cycle", top.vertex, neighbor);
                    return true;
                }
                if visited.insert(neighbor) {
                    on_stack.insert(neighbor);
                    let parent = top.vertex;
                    stack.push(Frame {
                        vertex: neighbor,
                        parent: Some(parent),
                        next: 0,
                        parent_skipped: false,
                    });
                }
            }
        }
        false
    }
}
