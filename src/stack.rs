use crate::catalog::Algorithm;
use crate::error::StructureError;
use crate::trace::{Action, Highlight, Recorder, Trace, TraceConfig};
use std::fmt::Display;

/// LIFO stack backed by a `Vec`.
///
/// Every push and pop leaves its trace in [`Stack::last_trace`]; each step holds a copy of
/// the items bottom to top.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Vec<T>,
    config: TraceConfig,
    last_trace: Trace<Vec<T>>,
}

impl<T: Clone + Display> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Display> Stack<T> {
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    pub fn with_config(config: TraceConfig) -> Self {
        Stack {
            items: Vec::new(),
            config,
            last_trace: Trace::default(),
        }
    }

    pub fn push(&mut self, item: T) {
        let mut rec = Recorder::new(self.config, Algorithm::Stack);
        let description = format!("Push {} onto the top", item);
        self.items.push(item);
        rec.record(
            Action::Push,
            description,
            Some(Highlight::Index(self.items.len() - 1)),
            || self.items.clone(),
        );
        self.last_trace = rec.finish();
    }

    /// Removes the top item, or `Err(Underflow)` when the stack is empty.
    pub fn pop(&mut self) -> Result<T, StructureError> {
        let mut rec = Recorder::new(self.config, Algorithm::Stack);
        let result = match self.items.last() {
            None => {
                rec.record(Action::NotFound, "Stack is empty: underflow", None, || {
                    self.items.clone()
                });
                Err(StructureError::Underflow)
            }
            Some(top) => {
                rec.record(
                    Action::Pop,
                    format!("Pop {} from the top", top),
                    Some(Highlight::Index(self.items.len() - 1)),
                    || self.items.clone(),
                );
                let top = self.items.pop().ok_or(StructureError::Underflow)?;
                rec.record(
                    Action::Done,
                    format!("Removed {}, {} left", top, self.items.len()),
                    None,
                    || self.items.clone(),
                );
                Ok(top)
            }
        };
        self.last_trace = rec.finish();
        result
    }

    pub fn peek(&self) -> Result<&T, StructureError> {
        self.items.last().ok_or(StructureError::Empty("Stack"))
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

    /// Items from bottom to top.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn last_trace(&self) -> &Trace<Vec<T>> {
        &self.last_trace
    }

    pub fn take_trace(&mut self) -> Trace<Vec<T>> {
        std::mem::take(&mut self.last_trace)
    }
}
