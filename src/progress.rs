//! Progress documents handed to the persistence layer.
//!
//! A document pairs the final state of a structure (as plain JSON) with how far the user
//! got through the last playback. Nothing here talks to storage.

use crate::bst::BinarySearchTree;
use crate::catalog::{Algorithm, AlgorithmType};
use crate::circular_linked_list::CircularLinkedList;
use crate::doubly_linked_list::DoublyLinkedList;
use crate::graph::Graph;
use crate::hash_table::HashTable;
use crate::heap::MaxHeap;
use crate::linked_list::SinglyLinkedList;
use crate::queue::Queue;
use crate::searching::SearchingAlgorithms;
use crate::sorting::SortRun;
use crate::stack::Stack;
use crate::trace::Playback;
use crate::weighted_graph::WeightedGraph;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt::Display;
use std::time::Duration;

/// Plain-data view of a structure's final state.
pub trait ExportState {
    fn algorithm(&self) -> Algorithm;

    fn export_state(&self) -> Value;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Mastered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDocument {
    pub algorithm_type: AlgorithmType,
    pub algorithm_name: String,
    pub progress_data: Value,
    pub completion_status: CompletionStatus,
    pub steps_completed: usize,
    pub total_steps: usize,
    /// Seconds.
    pub time_spent: u64,
    /// Description of the step the user stopped on.
    pub last_step: String,
    pub notes: String,
    pub updated_at: DateTime<Utc>,
}

impl ProgressDocument {
    /// Builds a document from a structure and the playback the user was stepping through.
    /// The status is derived from the cursor: nothing recorded, partway, or at the end.
    pub fn from_playback<E: ExportState + ?Sized, S>(
        structure: &E,
        playback: &Playback<S>,
        time_spent: Duration,
    ) -> Self {
        let algorithm = structure.algorithm();
        let completion_status = if playback.total() == 0 {
            CompletionStatus::NotStarted
        } else if playback.is_at_end() {
            CompletionStatus::Completed
        } else {
            CompletionStatus::InProgress
        };
        ProgressDocument {
            algorithm_type: algorithm.algorithm_type(),
            algorithm_name: algorithm.name().to_string(),
            progress_data: structure.export_state(),
            completion_status,
            steps_completed: playback.steps_completed(),
            total_steps: playback.total(),
            time_spent: time_spent.as_secs(),
            last_step: playback
                .current()
                .map(|s| s.description.clone())
                .unwrap_or_default(),
            notes: String::new(),
            updated_at: Utc::now(),
        }
    }

    /// Files the document under `algorithm` instead of the structure's default.
    pub fn for_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm_type = algorithm.algorithm_type();
        self.algorithm_name = algorithm.name().to_string();
        self
    }

    pub fn with_status(mut self, status: CompletionStatus) -> Self {
        self.completion_status = status;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<T: Clone + Display + Serialize> ExportState for Stack<T> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Stack
    }

    fn export_state(&self) -> Value {
        json!({ "items": self.items(), "size": self.size() })
    }
}

impl<T: Clone + Display + Serialize> ExportState for Queue<T> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Queue
    }

    fn export_state(&self) -> Value {
        json!({ "items": self.items(), "size": self.size() })
    }
}

impl<T: Clone + Display + PartialEq + Serialize> ExportState for SinglyLinkedList<T> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::SinglyLinkedList
    }

    fn export_state(&self) -> Value {
        json!({ "values": self.to_vec(), "size": self.size() })
    }
}

impl<T: Clone + Display + PartialEq + Serialize> ExportState for DoublyLinkedList<T> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::DoublyLinkedList
    }

    fn export_state(&self) -> Value {
        json!({ "values": self.to_vec(), "size": self.size() })
    }
}

impl<T: Clone + Display + PartialEq + Serialize> ExportState for CircularLinkedList<T> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::CircularLinkedList
    }

    fn export_state(&self) -> Value {
        json!({ "values": self.to_vec(), "size": self.size() })
    }
}

impl<T: Clone + Display + PartialOrd + Serialize> ExportState for MaxHeap<T> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::MaxHeap
    }

    fn export_state(&self) -> Value {
        json!({ "heap": self.as_slice(), "size": self.size() })
    }
}

impl<V: Clone + Display + Serialize> ExportState for HashTable<V> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::HashTable
    }

    fn export_state(&self) -> Value {
        json!({
            "capacity": self.capacity(),
            "policy": self.policy(),
            "entries": self.entries(),
            "loadFactor": self.load_factor(),
            "collisions": self.collision_count(),
        })
    }
}

impl<T: Clone + Display + PartialOrd + Serialize> ExportState for BinarySearchTree<T> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BinarySearchTree
    }

    fn export_state(&self) -> Value {
        json!({
            "root": self.root(),
            "inorder": self.inorder(),
            "height": self.height(),
        })
    }
}

impl ExportState for Graph {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BreadthFirstSearch
    }

    fn export_state(&self) -> Value {
        json!({ "adjacencyList": self.adjacency() })
    }
}

impl ExportState for WeightedGraph {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn export_state(&self) -> Value {
        json!({ "adjacencyList": self.adjacency() })
    }
}

impl<T: Clone + Display + PartialOrd + Serialize> ExportState for SearchingAlgorithms<T> {
    fn algorithm(&self) -> Algorithm {
        self.last_algorithm()
    }

    fn export_state(&self) -> Value {
        json!({ "array": self.array(), "currentStep": self.current_step() })
    }
}

impl<T: Serialize> ExportState for SortRun<T> {
    fn algorithm(&self) -> Algorithm {
        self.algorithm.algorithm()
    }

    fn export_state(&self) -> Value {
        json!({ "input": self.input, "output": self.output })
    }
}
