//! Slot storage for the index-linked lists.
//!
//! The arena owns every node; links between nodes are plain slot indices, so a back-link
//! never owns anything and removing a node is a single `release`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a node inside a list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeHandle(usize);

impl NodeHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Arena<N> {
    slots: Vec<Option<N>>,
    free: Vec<usize>,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<N> Arena<N> {
    /// Stores `node`, reusing a freed slot when one is available.
    pub(crate) fn alloc(&mut self, node: N) -> NodeHandle {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeHandle(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeHandle(self.slots.len() - 1)
            }
        }
    }

    pub(crate) fn release(&mut self, handle: NodeHandle) -> Option<N> {
        let node = self.slots.get_mut(handle.0)?.take()?;
        self.free.push(handle.0);
        Some(node)
    }

    pub(crate) fn get(&self, handle: NodeHandle) -> Option<&N> {
        self.slots.get(handle.0)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut N> {
        self.slots.get_mut(handle.0)?.as_mut()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Number of live nodes.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
