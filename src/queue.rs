use crate::catalog::Algorithm;
use crate::error::StructureError;
use crate::trace::{Action, Highlight, Recorder, Trace, TraceConfig};
use std::collections::VecDeque;
use std::fmt::Display;

/// FIFO queue.
///
/// Backed by a `VecDeque` so `dequeue` is O(1); order is the same as the shift-based array
/// queue the visualizer animates. Steps hold the items front to rear.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
    config: TraceConfig,
    last_trace: Trace<Vec<T>>,
}

impl<T: Clone + Display> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Display> Queue<T> {
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    pub fn with_config(config: TraceConfig) -> Self {
        Queue {
            items: VecDeque::new(),
            config,
            last_trace: Trace::default(),
        }
    }

    fn snapshot(items: &VecDeque<T>) -> Vec<T> {
        items.iter().cloned().collect()
    }

    pub fn enqueue(&mut self, item: T) {
        let mut rec = Recorder::new(self.config, Algorithm::Queue);
        let description = format!("Enqueue {} at the rear", item);
        self.items.push_back(item);
        rec.record(
            Action::Enqueue,
            description,
            Some(Highlight::Index(self.items.len() - 1)),
            || Self::snapshot(&self.items),
        );
        self.last_trace = rec.finish();
    }

    /// Removes the front item, or `Err(Underflow)` when the queue is empty.
    pub fn dequeue(&mut self) -> Result<T, StructureError> {
        let mut rec = Recorder::new(self.config, Algorithm::Queue);
        let result = match self.items.front() {
            None => {
                rec.record(Action::NotFound, "Queue is empty: underflow", None, || {
                    Self::snapshot(&self.items)
                });
                Err(StructureError::Underflow)
            }
            Some(front) => {
                rec.record(
                    Action::Dequeue,
                    format!("Dequeue {} from the front", front),
                    Some(Highlight::Index(0)),
                    || Self::snapshot(&self.items),
                );
                let front = self.items.pop_front().ok_or(StructureError::Underflow)?;
                rec.record(
                    Action::Done,
                    format!("Removed {}, {} left", front, self.items.len()),
                    None,
                    || Self::snapshot(&self.items),
                );
                Ok(front)
            }
        };
        self.last_trace = rec.finish();
        result
    }

    pub fn front(&self) -> Result<&T, StructureError> {
        self.items.front().ok_or(StructureError::Empty("Queue"))
    }

    pub fn rear(&self) -> Result<&T, StructureError> {
        self.items.back().ok_or(StructureError::Empty("Queue"))
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.last_trace = Trace::default();
    }

    /// Items from front to rear.
    pub fn items(&self) -> Vec<T> {
        Self::snapshot(&self.items)
    }

    pub fn last_trace(&self) -> &Trace<Vec<T>> {
        &self.last_trace
    }

    pub fn take_trace(&mut self) -> Trace<Vec<T>> {
        std::mem::take(&mut self.last_trace)
    }
}
