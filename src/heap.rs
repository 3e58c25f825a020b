use crate::catalog::Algorithm;
use crate::trace::{Action, Highlight, Recorder, Trace, TraceConfig};
use log::debug;
use std::fmt::Display;

/// Array-backed binary max-heap.
///
/// Uses 0-indexed storage with parent = (i-1)/2, children = 2i+1, 2i+2. After every public
/// call each element is >= both of its children. Steps hold a copy of the array.
#[derive(Debug, Clone)]
pub struct MaxHeap<T> {
    heap: Vec<T>,
    config: TraceConfig,
    last_trace: Trace<Vec<T>>,
}

fn parent(index: usize) -> usize {
    (index - 1) / 2
}

fn left_child(index: usize) -> usize {
    2 * index + 1
}

fn right_child(index: usize) -> usize {
    2 * index + 2
}

impl<T: Clone + Display + PartialOrd> Default for MaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Display + PartialOrd> MaxHeap<T> {
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    pub fn with_config(config: TraceConfig) -> Self {
        MaxHeap {
            heap: Vec::new(),
            config,
            last_trace: Trace::default(),
        }
    }

    pub fn insert(&mut self, value: T) {
        let mut rec = Recorder::new(self.config, Algorithm::MaxHeap);
        let description = format!("Append {} at index {}", value, self.heap.len());
        self.heap.push(value);
        rec.record(
            Action::Insert,
            description,
            Some(Highlight::Index(self.heap.len() - 1)),
            || self.heap.clone(),
        );
        Self::sift_up(&mut self.heap, &mut rec);
        rec.record(Action::Done, "Heap property restored", None, || {
            self.heap.clone()
        });
        self.last_trace = rec.finish();
    }

    fn sift_up(heap: &mut [T], rec: &mut Recorder<Vec<T>>) {
        let Some(mut current) = heap.len().checked_sub(1) else {
            return;
        };
        while current > 0 {
            let up = parent(current);
            rec.record(
                Action::Compare,
                format!("Compare {} with parent {}", heap[current], heap[up]),
                Some(Highlight::Pair(up, current)),
                || heap.to_vec(),
            );
            if heap[up] >= heap[current] {
                break;
            }
            heap.swap(up, current);
            rec.record(
                Action::Swap,
                format!("Swap {} up to index {}", heap[up], up),
                Some(Highlight::Pair(up, current)),
                || heap.to_vec(),
            );
            current = up;
        }
    }

    /// Moves the element at `start` down until it is no smaller than its larger child.
    fn sift_down(heap: &mut [T], start: usize, rec: &mut Recorder<Vec<T>>) {
        let mut current = start;
        while left_child(current) < heap.len() {
            let left = left_child(current);
            let right = right_child(current);
            let mut larger = left;
            if right < heap.len() && heap[right] > heap[left] {
                larger = right;
            }
            rec.record(
                Action::Compare,
                format!("Compare {} with larger child {}", heap[current], heap[larger]),
                Some(Highlight::Pair(current, larger)),
                || heap.to_vec(),
            );
            if heap[current] >= heap[larger] {
                break;
            }
            heap.swap(current, larger);
            rec.record(
                Action::Swap,
                format!("Swap {} down to index {}", heap[larger], larger),
                Some(Highlight::Pair(current, larger)),
                || heap.to_vec(),
            );
            current = larger;
        }
    }

    fn take_max(heap: &mut Vec<T>, rec: &mut Recorder<Vec<T>>) -> Option<T> {
        if heap.is_empty() {
            return None;
        }
        let max = heap.swap_remove(0);
        if !heap.is_empty() {
            rec.record(
                Action::Remove,
                format!("Remove max {}, move last element {} to the root", max, heap[0]),
                Some(Highlight::Index(0)),
                || heap.clone(),
            );
            Self::sift_down(heap, 0, rec);
        } else {
            rec.record(
                Action::Remove,
                format!("Remove max {}, heap is now empty", max),
                None,
                || heap.clone(),
            );
        }
        Some(max)
    }

    /// Removes and returns the largest element, `None` when empty.
    pub fn extract_max(&mut self) -> Option<T> {
        let mut rec = Recorder::new(self.config, Algorithm::MaxHeap);
        let max = Self::take_max(&mut self.heap, &mut rec);
        match &max {
            Some(value) => rec.record(
                Action::Done,
                format!("Return {}", value),
                None,
                || self.heap.clone(),
            ),
            None => rec.record(Action::NotFound, "Heap is empty", None, || {
                self.heap.clone()
            }),
        }
        self.last_trace = rec.finish();
        max
    }

    /// Replaces the contents with `values` and heapifies bottom-up in O(n).
    pub fn build_heap(&mut self, values: Vec<T>) {
        let mut rec = Recorder::new(self.config, Algorithm::MaxHeap);
        self.heap = values;
        rec.record(
            Action::Start,
            format!("Load {} elements, heapify from the last parent", self.heap.len()),
            None,
            || self.heap.clone(),
        );
        for index in (0..self.heap.len() / 2).rev() {
            rec.record(
                Action::Visit,
                format!("Sift down from index {}", index),
                Some(Highlight::Index(index)),
                || self.heap.clone(),
            );
            Self::sift_down(&mut self.heap, index, &mut rec);
        }
        rec.record(Action::Done, "Heap built", None, || self.heap.clone());
        debug!("built heap of {} elements", self.heap.len());
        self.last_trace = rec.finish();
    }

    /// Ascending order of the contents. The heap itself is left exactly as it was.
    pub fn heap_sort(&mut self) -> Vec<T> {
        let mut rec = Recorder::new(self.config, Algorithm::MaxHeap);
        let mut working = self.heap.clone();
        let mut sorted = Vec::with_capacity(working.len());
        while let Some(max) = Self::take_max(&mut working, &mut rec) {
            rec.record(
                Action::Pop,
                format!("Place {} in front of the sorted part", max),
                None,
                || working.clone(),
            );
            sorted.push(max);
        }
        sorted.reverse();
        rec.record(
            Action::Update,
            "Restore the original heap",
            None,
            || self.heap.clone(),
        );
        self.last_trace = rec.finish();
        sorted
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn size(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.last_trace = Trace::default();
    }

    /// The backing array in heap order.
    pub fn to_vec(&self) -> Vec<T> {
        self.heap.clone()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.heap
    }

    pub fn last_trace(&self) -> &Trace<Vec<T>> {
        &self.last_trace
    }

    pub fn take_trace(&mut self) -> Trace<Vec<T>> {
        std::mem::take(&mut self.last_trace)
    }
}
