use crate::arena::{Arena, NodeHandle};
use crate::catalog::Algorithm;
use crate::trace::{Action, Highlight, Recorder, Trace, TraceConfig, Traced};
use std::fmt::Display;

#[derive(Debug, Clone)]
struct DoublyNode<T> {
    value: T,
    prev: Option<NodeHandle>,
    next: Option<NodeHandle>,
}

/// Doubly linked list with head and tail references.
///
/// Nodes live in an arena; `prev` is a back-link used for reverse walks only.
#[derive(Debug, Clone)]
pub struct DoublyLinkedList<T> {
    nodes: Arena<DoublyNode<T>>,
    head: Option<NodeHandle>,
    tail: Option<NodeHandle>,
    size: usize,
    config: TraceConfig,
    last_trace: Trace<Vec<T>>,
}

impl<T: Clone + Display + PartialEq> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Display + PartialEq> DoublyLinkedList<T> {
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    pub fn with_config(config: TraceConfig) -> Self {
        DoublyLinkedList {
            nodes: Arena::default(),
            head: None,
            tail: None,
            size: 0,
            config,
            last_trace: Trace::default(),
        }
    }

    pub fn insert_at_head(&mut self, value: T) {
        let mut rec = Recorder::new(self.config, Algorithm::DoublyLinkedList);
        rec.record(
            Action::Start,
            format!("Create node {}", value),
            None,
            || self.to_vec(),
        );
        let handle = self.nodes.alloc(DoublyNode {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => {
                if let Some(node) = self.nodes.get_mut(old_head) {
                    node.prev = Some(handle);
                }
            }
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
        self.size += 1;
        rec.record(
            Action::Insert,
            "New node becomes the head",
            Some(Highlight::Index(0)),
            || self.to_vec(),
        );
        self.last_trace = rec.finish();
    }

    pub fn insert_at_tail(&mut self, value: T) {
        let mut rec = Recorder::new(self.config, Algorithm::DoublyLinkedList);
        rec.record(
            Action::Start,
            format!("Create node {}", value),
            None,
            || self.to_vec(),
        );
        let handle = self.nodes.alloc(DoublyNode {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old_tail) => {
                if let Some(node) = self.nodes.get_mut(old_tail) {
                    node.next = Some(handle);
                }
            }
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
        self.size += 1;
        rec.record(
            Action::Insert,
            "New node becomes the tail",
            Some(Highlight::Index(self.size - 1)),
            || self.to_vec(),
        );
        self.last_trace = rec.finish();
    }

    /// Removes the first node holding `value`, relinking both neighbours.
    pub fn delete(&mut self, value: &T) -> bool {
        let mut rec = Recorder::new(self.config, Algorithm::DoublyLinkedList);
        let removed = match self.locate(value, &mut rec) {
            Some((index, handle)) => {
                rec.record(
                    Action::Remove,
                    format!("Unlink node {} at index {}", value, index),
                    Some(Highlight::Index(index)),
                    || self.to_vec(),
                );
                self.unlink(handle);
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

    fn unlink(&mut self, handle: NodeHandle) {
        let Some(node) = self.nodes.release(handle) else {
            return;
        };
        match node.prev {
            Some(prev) => {
                if let Some(p) = self.nodes.get_mut(prev) {
                    p.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(n) = self.nodes.get_mut(next) {
                    n.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }
        self.size -= 1;
    }

    pub fn search(&self, value: &T) -> Option<usize> {
        let mut rec = Recorder::disabled(Algorithm::DoublyLinkedList);
        self.locate(value, &mut rec).map(|(index, _)| index)
    }

    pub fn search_traced(&self, value: &T) -> Traced<Option<usize>, Vec<T>> {
        let mut rec = Recorder::new(self.config, Algorithm::DoublyLinkedList);
        let result = self.locate(value, &mut rec).map(|(index, _)| index);
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

    fn locate(&self, value: &T, rec: &mut Recorder<Vec<T>>) -> Option<(usize, NodeHandle)> {
        let mut current = self.head;
        let mut index = 0;
        while let Some(handle) = current {
            let node = self.nodes.get(handle)?;
            rec.record(
                Action::Compare,
                format!("Compare {} with {}", node.value, value),
                Some(Highlight::Index(index)),
                || self.to_vec(),
            );
            if node.value == *value {
                return Some((index, handle));
            }
            current = node.next;
            index += 1;
        }
        None
    }

    fn walk(&self, start: Option<NodeHandle>, forward: bool) -> Vec<T> {
        let mut values = Vec::with_capacity(self.size);
        let mut current = start;
        while let Some(node) = current.and_then(|h| self.nodes.get(h)) {
            values.push(node.value.clone());
            current = if forward { node.next } else { node.prev };
        }
        values
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.walk(self.head, true)
    }

    /// Values from tail to head, following back-links.
    pub fn to_vec_reverse(&self) -> Vec<T> {
        self.walk(self.tail, false)
    }

    pub fn head(&self) -> Option<&T> {
        self.head.and_then(|h| self.nodes.get(h)).map(|n| &n.value)
    }

    pub fn tail(&self) -> Option<&T> {
        self.tail.and_then(|h| self.nodes.get(h)).map(|n| &n.value)
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
        self.tail = None;
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
