use crate::arena::{Arena, NodeHandle};
use crate::catalog::Algorithm;
use crate::trace::{Action, Highlight, Recorder, Trace, TraceConfig, Traced};
use std::fmt::Display;

#[derive(Debug, Clone)]
struct CircularNode<T> {
    value: T,
    next: NodeHandle,
}

/// Singly linked ring: the last node always links back to `head`.
///
/// A single node links to itself. Inserts walk to the last node the way the animation
/// does, so both ends cost O(n).
#[derive(Debug, Clone)]
pub struct CircularLinkedList<T> {
    nodes: Arena<CircularNode<T>>,
    head: Option<NodeHandle>,
    size: usize,
    config: TraceConfig,
    last_trace: Trace<Vec<T>>,
}

impl<T: Clone + Display + PartialEq> Default for CircularLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Display + PartialEq> CircularLinkedList<T> {
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    pub fn with_config(config: TraceConfig) -> Self {
        CircularLinkedList {
            nodes: Arena::default(),
            head: None,
            size: 0,
            config,
            last_trace: Trace::default(),
        }
    }

    pub fn insert_at_head(&mut self, value: T) {
        self.insert(value, true);
    }

    pub fn insert_at_tail(&mut self, value: T) {
        self.insert(value, false);
    }

    fn insert(&mut self, value: T, at_head: bool) {
        let mut rec = Recorder::new(self.config, Algorithm::CircularLinkedList);
        rec.record(
            Action::Start,
            format!("Create node {}", value),
            None,
            || self.to_vec(),
        );

        match self.head {
            None => {
                let handle = self.nodes.alloc(CircularNode {
                    value,
                    next: NodeHandle::default(),
                });
                if let Some(node) = self.nodes.get_mut(handle) {
                    node.next = handle;
                }
                self.head = Some(handle);
                self.size = 1;
                rec.record(
                    Action::Insert,
                    "First node links to itself",
                    Some(Highlight::Index(0)),
                    || self.to_vec(),
                );
            }
            Some(head) => {
                let last = self.last_handle(&mut rec);
                let handle = self.nodes.alloc(CircularNode { value, next: head });
                if let Some(node) = self.nodes.get_mut(last) {
                    node.next = handle;
                }
                if at_head {
                    self.head = Some(handle);
                }
                self.size += 1;
                let (description, index) = if at_head {
                    ("New node becomes the head, last node points to it", 0)
                } else {
                    ("New node becomes the last node, pointing back to head", self.size - 1)
                };
                rec.record(
                    Action::Insert,
                    description,
                    Some(Highlight::Index(index)),
                    || self.to_vec(),
                );
            }
        }
        self.last_trace = rec.finish();
    }

    /// Walks from head to the node whose `next` is head.
    fn last_handle(&self, rec: &mut Recorder<Vec<T>>) -> NodeHandle {
        let Some(head) = self.head else {
            return NodeHandle::default();
        };
        let mut current = head;
        let mut index = 0;
        while let Some(node) = self.nodes.get(current) {
            rec.record(
                Action::Visit,
                format!("Walk past node {} at index {}", node.value, index),
                Some(Highlight::Index(index)),
                || self.to_vec(),
            );
            if node.next == head {
                break;
            }
            current = node.next;
            index += 1;
        }
        current
    }

    /// Removes the first node holding `value`, keeping the ring closed.
    pub fn delete(&mut self, value: &T) -> bool {
        let mut rec = Recorder::new(self.config, Algorithm::CircularLinkedList);
        let removed = match self.locate(value, &mut rec) {
            Some((index, handle, prev)) => {
                rec.record(
                    Action::Remove,
                    format!("Unlink node {} at index {}", value, index),
                    Some(Highlight::Index(index)),
                    || self.to_vec(),
                );
                self.unlink(handle, prev);
                rec.record(Action::Done, "Node removed", None, || self.to_vec());
                true
            }
            None => {
                rec.record(
                    Action::NotFound,
                    format!("{} is not in the list", value),
                    None,
                    || self.to_vec(),
                );
                false
            }
        };
        self.last_trace = rec.finish();
        removed
    }

    fn unlink(&mut self, handle: NodeHandle, prev: Option<NodeHandle>) {
        let Some(next) = self.nodes.get(handle).map(|n| n.next) else {
            return;
        };
        if self.size == 1 {
            self.head = None;
        } else if Some(handle) == self.head {
            let last = self.last_handle(&mut Recorder::disabled(Algorithm::CircularLinkedList));
            if let Some(node) = self.nodes.get_mut(last) {
                node.next = next;
            }
            self.head = Some(next);
        } else if let Some(node) = prev.and_then(|p| self.nodes.get_mut(p)) {
            node.next = next;
        }
        self.nodes.release(handle);
        self.size -= 1;
        debug_assert_eq!(self.nodes.live(), self.size);
    }

    pub fn search(&self, value: &T) -> Option<usize> {
        let mut rec = Recorder::disabled(Algorithm::CircularLinkedList);
        self.locate(value, &mut rec).map(|(index, _, _)| index)
    }

    pub fn search_traced(&self, value: &T) -> Traced<Option<usize>, Vec<T>> {
        let mut rec = Recorder::new(self.config, Algorithm::CircularLinkedList);
        let result = self.locate(value, &mut rec).map(|(index, _, _)| index);
        match result {
            Some(index) => rec.record(
                Action::Found,
                format!("Found {} at index {}", value, index),
                Some(Highlight::Index(index)),
                || self.to_vec(),
            ),
            None => rec.record(
                Action::NotFound,
                format!("{} is not in the list", value),
                None,
                || self.to_vec(),
            ),
        }
        Traced {
            result,
            trace: rec.finish(),
        }
    }

    /// One lap around the ring. Yields index, handle and predecessor of the match.
    fn locate(
        &self,
        value: &T,
        rec: &mut Recorder<Vec<T>>,
    ) -> Option<(usize, NodeHandle, Option<NodeHandle>)> {
        let head = self.head?;
        let mut prev = None;
        let mut current = head;
        for index in 0..self.size {
            let node = self.nodes.get(current)?;
            rec.record(
                Action::Compare,
                format!("Compare {} with {}", node.value, value),
                Some(Highlight::Index(index)),
                || self.to_vec(),
            );
            if node.value == *value {
                return Some((index, current, prev));
            }
            prev = Some(current);
            current = node.next;
            if current == head {
                break;
            }
        }
        None
    }

    /// Values in link order, one lap starting at head.
    pub fn to_vec(&self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.size);
        let Some(head) = self.head else {
            return values;
        };
        let mut current = head;
        while let Some(node) = self.nodes.get(current) {
            values.push(node.value.clone());
            current = node.next;
            if current == head || values.len() == self.size {
                break;
            }
        }
        values
    }

    pub fn head_handle(&self) -> Option<NodeHandle> {
        self.head
    }

    pub fn next_handle(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(handle).map(|n| n.next)
    }

    pub fn value_at(&self, handle: NodeHandle) -> Option<&T> {
        self.nodes.get(handle).map(|n| &n.value)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.size = 0;
        self.last_trace = Trace::default();
    }

    pub fn last_trace(&self) -> &Trace<Vec<T>> {
        &self.last_trace
    }

    pub fn take_trace(&mut self) -> Trace<Vec<T>> {
        std::mem::take(&mut self.last_trace)
    }
}
