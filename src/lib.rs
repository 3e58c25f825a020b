/*!
# algoviz

Classic data structures and algorithms that can explain themselves one step at a time.

## Overview

Every structure in this crate performs its operation normally and, alongside it, records an
ordered trace of [`Step`]s. A step carries the action taken, a human readable description,
the pseudocode line it corresponds to, what to highlight, and a full snapshot of the
visible state. A front end replays the trace with a [`Playback`] cursor.

## Modules

- **trace**: steps, recorders, traces and the playback cursor
- **catalog**: algorithm identifiers, pseudocode listings and complexity notes
- **stack**, **queue**: linear containers
- **linked_list**, **doubly_linked_list**, **circular_linked_list**: linked sequences over an arena
- **heap**: array-backed max heap with heap sort
- **hash_table**: separate chaining or linear probing
- **bst**: binary search tree with the four traversals
- **graph**: unweighted undirected graph with BFS, DFS and path finding
- **weighted_graph**: Dijkstra's shortest paths
- **searching**: linear and binary search with built-in playback
- **sorting**: bubble, merge and quick sort
- **progress**: plain-data progress documents for persistence
- **command**, **session**: the line-oriented interactive front end used by `algoviz-cli`

## Tracing

Tracing is configured per instance through [`TraceConfig`]. With tracing disabled no
snapshots are taken and every trace is empty; results are unaffected.
*/

pub mod arena;
pub mod bst;
pub mod catalog;
pub mod circular_linked_list;
pub mod command;
pub mod doubly_linked_list;
pub mod error;
pub mod graph;
pub mod hash_table;
pub mod heap;
pub mod linked_list;
pub mod progress;
pub mod queue;
pub mod searching;
pub mod session;
pub mod sorting;
pub mod stack;
pub mod trace;
pub mod weighted_graph;

pub use bst::{BinarySearchTree, TraversalOrder, TreeNode};
pub use catalog::{Algorithm, AlgorithmType, Complexity};
pub use circular_linked_list::CircularLinkedList;
pub use command::Command;
pub use doubly_linked_list::DoublyLinkedList;
pub use error::{CommandError, HashTableError, SessionError, StructureError};
pub use graph::Graph;
pub use hash_table::{CollisionPolicy, HashKey, HashTable, ProbeDeletion};
pub use heap::MaxHeap;
pub use linked_list::SinglyLinkedList;
pub use progress::{CompletionStatus, ExportState, ProgressDocument};
pub use queue::Queue;
pub use searching::SearchingAlgorithms;
pub use session::Session;
pub use sorting::{SortAlgorithm, bubble_sort, merge_sort, quick_sort};
pub use stack::Stack;
pub use trace::{Action, Highlight, Playback, Step, Trace, TraceConfig, Traced};
pub use weighted_graph::{ShortestPath, WeightedGraph};
