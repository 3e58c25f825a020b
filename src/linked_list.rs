use crate::catalog::Algorithm;
use crate::trace::{Action, Highlight, Recorder, Trace, TraceConfig, Traced};
use std::fmt::Display;

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// Singly linked list. Each node is owned by its predecessor, the first one by `head`.
#[derive(Debug)]
pub struct SinglyLinkedList<T> {
    head: Option<Box<Node<T>>>,
    size: usize,
    config: TraceConfig,
    last_trace: Trace<Vec<T>>,
}

/// Borrowing iterator in link order.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

impl<T: Clone + Display + PartialEq> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Display + PartialEq> SinglyLinkedList<T> {
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    pub fn with_config(config: TraceConfig) -> Self {
        SinglyLinkedList {
            head: None,
            size: 0,
            config,
            last_trace: Trace::default(),
        }
    }

    pub fn insert_at_head(&mut self, value: T) {
        let mut rec = Recorder::new(self.config, Algorithm::SinglyLinkedList);
        rec.record(
            Action::Start,
            format!("Create node {}", value),
            None,
            || self.to_vec(),
        );
        let old_head = self.head.take();
        self.head = Some(Box::new(Node {
            value,
            next: old_head,
        }));
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
        let mut rec = Recorder::new(self.config, Algorithm::SinglyLinkedList);
        rec.record(
            Action::Start,
            format!("Create node {}", value),
            None,
            || self.to_vec(),
        );
        if rec.is_enabled() {
            for (index, current) in self.iter().enumerate() {
                rec.record(
                    Action::Visit,
                    format!("Walk past node {} at index {}", current, index),
                    Some(Highlight::Index(index)),
                    || self.to_vec(),
                );
            }
        }

        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { value, next: None }));
        self.size += 1;

        rec.record(
            Action::Insert,
            "Link the new node after the last node",
            Some(Highlight::Index(self.size - 1)),
            || self.to_vec(),
        );
        self.last_trace = rec.finish();
    }

    /// Removes the first node holding `value`. Returns false when nothing matched.
    pub fn delete(&mut self, value: &T) -> bool {
        let mut rec = Recorder::new(self.config, Algorithm::SinglyLinkedList);
        let found = self.locate(value, &mut rec);
        let removed = match found {
            Some(index) => {
                rec.record(
                    Action::Remove,
                    format!("Unlink node {} at index {}", value, index),
                    Some(Highlight::Index(index)),
                    || self.to_vec(),
                );
                let removed = self.unlink_at(index).is_some();
                rec.record(Action::Done, "Node removed", None, || self.to_vec());
                removed
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

    /// Index of the first node holding `value`.
    pub fn search(&self, value: &T) -> Option<usize> {
        let mut rec = Recorder::disabled(Algorithm::SinglyLinkedList);
        self.locate(value, &mut rec)
    }

    pub fn search_traced(&self, value: &T) -> Traced<Option<usize>, Vec<T>> {
        let mut rec = Recorder::new(self.config, Algorithm::SinglyLinkedList);
        let result = self.locate(value, &mut rec);
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

    fn locate(&self, value: &T, rec: &mut Recorder<Vec<T>>) -> Option<usize> {
        for (index, current) in self.iter().enumerate() {
            rec.record(
                Action::Compare,
                format!("Compare {} with {}", current, value),
                Some(Highlight::Index(index)),
                || self.to_vec(),
            );
            if current == value {
                return Some(index);
            }
        }
        None
    }

    fn unlink_at(&mut self, index: usize) -> Option<T> {
        let mut cursor = &mut self.head;
        for _ in 0..index {
            cursor = &mut cursor.as_mut()?.next;
        }
        let mut node = cursor.take()?;
        *cursor = node.next.take();
        self.size -= 1;
        Some(node.value)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
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

impl<T> Drop for SinglyLinkedList<T> {
    // Unlinks iteratively so long lists don't recurse on drop.
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}
