//! Interactive session: one instance of every structure plus the playback of the last
//! recorded operation.

use crate::bst::{BinarySearchTree, TraversalOrder};
use crate::catalog::Algorithm;
use crate::circular_linked_list::CircularLinkedList;
use crate::command::{Command, HELP, ListKind, ListOp};
use crate::doubly_linked_list::DoublyLinkedList;
use crate::error::SessionError;
use crate::graph::Graph;
use crate::hash_table::{CollisionPolicy, HashTable};
use crate::heap::MaxHeap;
use crate::linked_list::SinglyLinkedList;
use crate::progress::{ExportState, ProgressDocument};
use crate::queue::Queue;
use crate::searching::SearchingAlgorithms;
use crate::sorting::SortRun;
use crate::stack::Stack;
use crate::trace::{Playback, Step, Trace, TraceConfig};
use crate::weighted_graph::WeightedGraph;
use log::info;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

const DEFAULT_HASH_CAPACITY: usize = 10;

fn to_json<S: Serialize>(trace: Trace<S>) -> Trace<Value> {
    trace.map_state(|state| serde_json::to_value(state).unwrap_or(Value::Null))
}

/// One line per step: position, action, description and pseudocode line.
pub fn render_step(step: &Step<Value>, total: usize) -> String {
    let line = step
        .line
        .map(|l| format!(" (line {})", l))
        .unwrap_or_default();
    format!(
        "[{}/{}] {:?}: {}{}\n      {}",
        step.step, total, step.action, step.description, line, step.state
    )
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct Session {
    config: TraceConfig,
    stack: Stack<i64>,
    queue: Queue<i64>,
    singly: SinglyLinkedList<i64>,
    doubly: DoublyLinkedList<i64>,
    circular: CircularLinkedList<i64>,
    heap: MaxHeap<i64>,
    hash: HashTable<i64>,
    bst: BinarySearchTree<i64>,
    graph: Graph,
    weighted: WeightedGraph,
    search: SearchingAlgorithms<i64>,
    sort: Option<SortRun<i64>>,
    playback: Playback<Value>,
    active: Option<Algorithm>,
    /// Set when the current command replaced the playback.
    fresh: bool,
    started: Instant,
}

impl Session {
    pub fn new(config: TraceConfig) -> Result<Self, SessionError> {
        Ok(Session {
            config,
            stack: Stack::with_config(config),
            queue: Queue::with_config(config),
            singly: SinglyLinkedList::with_config(config),
            doubly: DoublyLinkedList::with_config(config),
            circular: CircularLinkedList::with_config(config),
            heap: MaxHeap::with_config(config),
            hash: HashTable::with_config(
                DEFAULT_HASH_CAPACITY,
                CollisionPolicy::SeparateChaining,
                config,
            )?,
            bst: BinarySearchTree::with_config(config),
            graph: Graph::with_config(config),
            weighted: WeightedGraph::with_config(config),
            search: SearchingAlgorithms::with_config(config),
            sort: None,
            playback: Playback::default(),
            active: None,
            fresh: false,
            started: Instant::now(),
        })
    }

    pub fn config(&self) -> TraceConfig {
        self.config
    }

    pub fn playback(&self) -> &Playback<Value> {
        &self.playback
    }

    pub fn active(&self) -> Option<Algorithm> {
        self.active
    }

    pub fn run_line(&mut self, line: &str) -> Result<String, SessionError> {
        let command: Command = line.parse()?;
        self.execute(command)
    }

    fn load<S: Serialize>(&mut self, algorithm: Algorithm, trace: Trace<S>) {
        self.active = Some(algorithm);
        self.fresh = true;
        self.playback = to_json(trace).into_playback();
    }

    fn current(&self) -> Result<String, SessionError> {
        self.playback
            .current()
            .map(|step| render_step(step, self.playback.total()))
            .ok_or(SessionError::NothingRecorded)
    }

    fn exporter(&self) -> Option<&dyn ExportState> {
        let structure: &dyn ExportState = match self.active? {
            Algorithm::Stack => &self.stack,
            Algorithm::Queue => &self.queue,
            Algorithm::SinglyLinkedList => &self.singly,
            Algorithm::DoublyLinkedList => &self.doubly,
            Algorithm::CircularLinkedList => &self.circular,
            Algorithm::MaxHeap => &self.heap,
            Algorithm::HashTable => &self.hash,
            Algorithm::BinarySearchTree | Algorithm::TreeTraversal => &self.bst,
            Algorithm::BreadthFirstSearch | Algorithm::DepthFirstSearch => &self.graph,
            Algorithm::Dijkstra => &self.weighted,
            Algorithm::LinearSearch | Algorithm::BinarySearch => &self.search,
            Algorithm::BubbleSort | Algorithm::MergeSort | Algorithm::QuickSort => {
                self.sort.as_ref()?
            }
        };
        Some(structure)
    }

    /// Progress document for the structure behind the current playback.
    pub fn export(&self) -> Result<ProgressDocument, SessionError> {
        let (Some(algorithm), Some(structure)) = (self.active, self.exporter()) else {
            return Err(SessionError::NothingRecorded);
        };
        Ok(
            ProgressDocument::from_playback(structure, &self.playback, self.started.elapsed())
                .for_algorithm(algorithm),
        )
    }

    pub fn execute(&mut self, command: Command) -> Result<String, SessionError> {
        self.fresh = false;
        let message = match command {
            Command::StackPush(n) => {
                self.stack.push(n);
                let trace = self.stack.take_trace();
                self.load(Algorithm::Stack, trace);
                format!("pushed {} (size {})", n, self.stack.size())
            }
            Command::StackPop => {
                let popped = self.stack.pop();
                let trace = self.stack.take_trace();
                self.load(Algorithm::Stack, trace);
                format!("popped {}", popped?)
            }
            Command::StackPeek => format!("top is {}", self.stack.peek()?),

            Command::QueueEnqueue(n) => {
                self.queue.enqueue(n);
                let trace = self.queue.take_trace();
                self.load(Algorithm::Queue, trace);
                format!("enqueued {} (size {})", n, self.queue.size())
            }
            Command::QueueDequeue => {
                let dequeued = self.queue.dequeue();
                let trace = self.queue.take_trace();
                self.load(Algorithm::Queue, trace);
                format!("dequeued {}", dequeued?)
            }
            Command::QueueFront => format!("front is {}", self.queue.front()?),

            Command::List(kind, op) => self.list(kind, op),

            Command::HeapInsert(n) => {
                self.heap.insert(n);
                let trace = self.heap.take_trace();
                self.load(Algorithm::MaxHeap, trace);
                format!("heap: [{}]", join(self.heap.as_slice()))
            }
            Command::HeapExtract => {
                let max = self.heap.extract_max();
                let trace = self.heap.take_trace();
                self.load(Algorithm::MaxHeap, trace);
                match max {
                    Some(max) => format!("extracted {}", max),
                    None => "heap is empty".to_string(),
                }
            }
            Command::HeapBuild(values) => {
                self.heap.build_heap(values);
                let trace = self.heap.take_trace();
                self.load(Algorithm::MaxHeap, trace);
                format!("heap: [{}]", join(self.heap.as_slice()))
            }
            Command::HeapSort => {
                let sorted = self.heap.heap_sort();
                let trace = self.heap.take_trace();
                self.load(Algorithm::MaxHeap, trace);
                format!("sorted: [{}]", join(&sorted))
            }

            Command::HashNew(capacity, policy) => {
                self.hash = HashTable::with_config(capacity, policy, self.config)?;
                format!("new {:?} table with {} buckets", policy, capacity)
            }
            Command::HashInsert(key, value) => {
                let inserted = self.hash.insert(key.clone(), value);
                let trace = self.hash.take_trace();
                self.load(Algorithm::HashTable, trace);
                inserted?;
                format!(
                    "{} -> {} (load factor {:.2}, {} collisions)",
                    key,
                    value,
                    self.hash.load_factor(),
                    self.hash.collision_count()
                )
            }
            Command::HashSearch(key) => {
                let (found, trace) = self.hash.search_traced(&key).into_parts();
                self.load(Algorithm::HashTable, trace);
                match found {
                    Some(value) => format!("{} -> {}", key, value),
                    None => format!("{} not found", key),
                }
            }
            Command::HashDelete(key) => {
                let removed = self.hash.delete(&key);
                let trace = self.hash.take_trace();
                self.load(Algorithm::HashTable, trace);
                if removed {
                    format!("deleted {}", key)
                } else {
                    format!("{} not found", key)
                }
            }
            Command::HashResize(capacity) => {
                self.hash.resize(capacity)?;
                let trace = self.hash.take_trace();
                self.load(Algorithm::HashTable, trace);
                format!("resized to {} buckets", capacity)
            }

            Command::BstInsert(n) => {
                self.bst.insert(n);
                let trace = self.bst.take_trace();
                self.load(Algorithm::BinarySearchTree, trace);
                format!("inorder: [{}]", join(&self.bst.inorder()))
            }
            Command::BstSearch(n) => {
                let (found, trace) = self.bst.search_traced(&n).into_parts();
                self.load(Algorithm::BinarySearchTree, trace);
                format!("{} {}", n, if found { "found" } else { "not found" })
            }
            Command::BstRemove(n) => {
                let removed = self.bst.remove(&n);
                let trace = self.bst.take_trace();
                self.load(Algorithm::BinarySearchTree, trace);
                if removed {
                    format!("removed {}, height {}", n, self.bst.height())
                } else {
                    format!("{} not found", n)
                }
            }
            Command::BstTraverse(order) => {
                let (values, trace) = self.bst.traverse_traced(order).into_parts();
                self.load(Algorithm::TreeTraversal, trace);
                if order == TraversalOrder::LevelOrder {
                    let levels: Vec<String> = self
                        .bst
                        .level_order()
                        .iter()
                        .map(|level| format!("[{}]", join(level)))
                        .collect();
                    levels.join(" ")
                } else {
                    format!("[{}]", join(&values))
                }
            }

            Command::GraphEdge(a, b) => {
                self.graph.add_edge(&a, &b);
                format!("edge {} - {} ({} vertices)", a, b, self.graph.vertex_count())
            }
            Command::GraphRemoveEdge(a, b) => {
                self.graph.remove_edge(&a, &b);
                format!("removed edge {} - {}", a, b)
            }
            Command::GraphRemoveVertex(v) => {
                if self.graph.remove_vertex(&v) {
                    format!("removed vertex {}", v)
                } else {
                    format!("{} not found", v)
                }
            }
            Command::GraphBfs(start) => {
                let (order, trace) = self.graph.breadth_first_search_traced(&start).into_parts();
                self.load(Algorithm::BreadthFirstSearch, trace);
                format!("bfs: [{}]", order.join(", "))
            }
            Command::GraphDfs(start) => {
                let (order, trace) = self.graph.depth_first_search_traced(&start).into_parts();
                self.load(Algorithm::DepthFirstSearch, trace);
                format!("dfs: [{}]", order.join(", "))
            }
            Command::GraphDfsIterative(start) => {
                let (order, trace) = self
                    .graph
                    .depth_first_search_iterative_traced(&start)
                    .into_parts();
                self.load(Algorithm::DepthFirstSearch, trace);
                format!("dfs (stack): [{}]", order.join(", "))
            }
            Command::GraphPath {
                start,
                end,
                breadth_first,
            } => {
                let (path, trace, algorithm) = if breadth_first {
                    let (path, trace) = self
                        .graph
                        .breadth_first_search_with_path_traced(&start, &end)
                        .into_parts();
                    (path, trace, Algorithm::BreadthFirstSearch)
                } else {
                    let (path, trace) = self
                        .graph
                        .depth_first_search_with_path_traced(&start, &end)
                        .into_parts();
                    (path, trace, Algorithm::DepthFirstSearch)
                };
                self.load(algorithm, trace);
                match path {
                    Some(path) => format!("path: {}", path.join(" -> ")),
                    None => format!("no path from {} to {}", start, end),
                }
            }
            Command::GraphCycle => {
                if self.graph.has_cycle() {
                    "the graph has a cycle".to_string()
                } else {
                    "the graph is acyclic".to_string()
                }
            }

            Command::WeightedEdge(a, b, weight) => {
                self.weighted.add_edge(&a, &b, weight);
                format!("edge {} - {} weight {}", a, b, weight)
            }
            Command::Dijkstra(start, end) => {
                let (result, trace) = self.weighted.dijkstra_traced(&start, &end).into_parts();
                self.load(Algorithm::Dijkstra, trace);
                match result.distance {
                    Some(distance) => {
                        format!("path: {} (distance {})", result.path.join(" -> "), distance)
                    }
                    None => format!("{} is unreachable from {}", end, start),
                }
            }

            Command::SearchArray(values) => {
                self.search.set_array(&values);
                format!("array: [{}]", join(self.search.array()))
            }
            Command::LinearSearch(target) => {
                let found = self.search.linear_search(&target);
                let trace = self.search.steps().clone();
                self.load(Algorithm::LinearSearch, trace);
                match found {
                    Some(index) => format!("{} found at index {}", target, index),
                    None => format!("{} not found", target),
                }
            }
            Command::BinarySearch(target) => {
                let found = self.search.binary_search(&target);
                let trace = self.search.steps().clone();
                self.load(Algorithm::BinarySearch, trace);
                match found {
                    Some(index) => format!("{} found at index {}", target, index),
                    None => format!("{} not found", target),
                }
            }

            Command::Sort(algorithm, values) => {
                let (output, trace) = algorithm.sort(&values, self.config).into_parts();
                self.load(algorithm.algorithm(), trace);
                let message = format!("sorted: [{}]", join(&output));
                self.sort = Some(SortRun {
                    algorithm,
                    input: values,
                    output,
                });
                message
            }

            Command::Next => {
                self.playback.next_step();
                return self.current();
            }
            Command::Prev => {
                self.playback.previous_step();
                return self.current();
            }
            Command::Goto(step) => {
                self.playback.go_to(step);
                return self.current();
            }
            Command::Reset => {
                self.playback.reset();
                return self.current();
            }
            Command::Show => return self.current(),
            Command::Play => {
                let mut lines = vec![self.current()?];
                while !self.playback.is_at_end() {
                    self.playback.next_step();
                    lines.push(self.current()?);
                }
                return Ok(lines.join("\n"));
            }
            Command::Steps => {
                let total = self.playback.total();
                if total == 0 {
                    return Err(SessionError::NothingRecorded);
                }
                let position = self.playback.position();
                let lines: Vec<String> = self
                    .playback
                    .trace()
                    .iter()
                    .enumerate()
                    .map(|(index, step)| {
                        let marker = if index == position { ">" } else { " " };
                        format!("{} {:>3}. {}", marker, index, step.description)
                    })
                    .collect();
                return Ok(lines.join("\n"));
            }
            Command::Export => return Ok(self.export()?.to_json()?),
            Command::Help => return Ok(HELP.to_string()),
            Command::Quit => return Ok("bye".to_string()),
        };
        info!("{:?} -> {}", self.active, message);
        if self.fresh && self.playback.total() > 0 {
            Ok(format!("{} ({} steps recorded)", message, self.playback.total()))
        } else {
            Ok(message)
        }
    }

    fn list(&mut self, kind: ListKind, op: ListOp) -> String {
        macro_rules! run {
            ($list:expr) => {{
                match op {
                    ListOp::InsertHead(n) => {
                        $list.insert_at_head(n);
                        let values = join(&$list.to_vec());
                        let message = format!("inserted {} at head: [{}]", n, values);
                        (message, $list.take_trace())
                    }
                    ListOp::InsertTail(n) => {
                        $list.insert_at_tail(n);
                        let values = join(&$list.to_vec());
                        let message = format!("inserted {} at tail: [{}]", n, values);
                        (message, $list.take_trace())
                    }
                    ListOp::Delete(n) => {
                        let message = if $list.delete(&n) {
                            format!("deleted {}: [{}]", n, join(&$list.to_vec()))
                        } else {
                            format!("{} not found", n)
                        };
                        (message, $list.take_trace())
                    }
                    ListOp::Search(n) => {
                        let (found, trace) = $list.search_traced(&n).into_parts();
                        let message = match found {
                            Some(index) => format!("{} found at index {}", n, index),
                            None => format!("{} not found", n),
                        };
                        (message, trace)
                    }
                }
            }};
        }

        let (message, trace) = match kind {
            ListKind::Singly => run!(self.singly),
            ListKind::Doubly => run!(self.doubly),
            ListKind::Circular => run!(self.circular),
        };
        let algorithm = match kind {
            ListKind::Singly => Algorithm::SinglyLinkedList,
            ListKind::Doubly => Algorithm::DoublyLinkedList,
            ListKind::Circular => Algorithm::CircularLinkedList,
        };
        self.load(algorithm, trace);
        message
    }
}
