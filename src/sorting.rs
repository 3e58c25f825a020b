//! Traced comparison sorts. Each takes a slice and returns a sorted copy.

use crate::catalog::Algorithm;
use crate::trace::{Action, Highlight, Recorder, TraceConfig, Traced};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Array contents at a step, plus the pivot index while quick sort partitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortFrame<T> {
    pub array: Vec<T>,
    pub pivot: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    Bubble,
    Merge,
    Quick,
}

impl SortAlgorithm {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            SortAlgorithm::Bubble => Algorithm::BubbleSort,
            SortAlgorithm::Merge => Algorithm::MergeSort,
            SortAlgorithm::Quick => Algorithm::QuickSort,
        }
    }

    pub fn sort<T: Clone + Display + PartialOrd>(
        &self,
        values: &[T],
        config: TraceConfig,
    ) -> Traced<Vec<T>, SortFrame<T>> {
        match self {
            SortAlgorithm::Bubble => bubble_sort(values, config),
            SortAlgorithm::Merge => merge_sort(values, config),
            SortAlgorithm::Quick => quick_sort(values, config),
        }
    }
}

fn snapshot<T: Clone>(array: &[T], pivot: Option<usize>) -> SortFrame<T> {
    SortFrame {
        array: array.to_vec(),
        pivot,
    }
}

fn finish<T: Clone>(
    mut rec: Recorder<SortFrame<T>>,
    array: Vec<T>,
    name: &str,
) -> Traced<Vec<T>, SortFrame<T>> {
    rec.record(Action::Done, "Array is sorted", None, || snapshot(&array, None));
    debug!("{} sorted {} elements in {} steps", name, array.len(), rec.len());
    Traced {
        result: array,
        trace: rec.finish(),
    }
}

pub fn bubble_sort<T: Clone + Display + PartialOrd>(
    values: &[T],
    config: TraceConfig,
) -> Traced<Vec<T>, SortFrame<T>> {
    let mut rec = Recorder::new(config, Algorithm::BubbleSort);
    let mut arr = values.to_vec();
    let n = arr.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            rec.record(
                Action::Compare,
                format!("Compare {} and {}", arr[j], arr[j + 1]),
                Some(Highlight::Pair(j, j + 1)),
                || snapshot(&arr, None),
            );
            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
                rec.record(
                    Action::Swap,
                    format!("Swap {} and {}", arr[j + 1], arr[j]),
                    Some(Highlight::Pair(j, j + 1)),
                    || snapshot(&arr, None),
                );
            }
        }
    }
    finish(rec, arr, "bubble sort")
}

pub fn merge_sort<T: Clone + Display + PartialOrd>(
    values: &[T],
    config: TraceConfig,
) -> Traced<Vec<T>, SortFrame<T>> {
    let mut rec = Recorder::new(config, Algorithm::MergeSort);
    let mut arr = values.to_vec();
    if !arr.is_empty() {
        let right = arr.len() - 1;
        merge_sort_range(&mut arr, 0, right, &mut rec);
    }
    finish(rec, arr, "merge sort")
}

fn merge_sort_range<T: Clone + Display + PartialOrd>(
    arr: &mut [T],
    left: usize,
    right: usize,
    rec: &mut Recorder<SortFrame<T>>,
) {
    if left >= right {
        return;
    }
    let mid = (left + right) / 2;
    rec.record(
        Action::Visit,
        format!("Split [{}..{}] at {}", left, right, mid),
        Some(Highlight::Range {
            left,
            right,
            mid: Some(mid),
        }),
        || snapshot(arr, None),
    );
    merge_sort_range(arr, left, mid, rec);
    merge_sort_range(arr, mid + 1, right, rec);
    merge(arr, left, mid, right, rec);
}

/// Stable merge: ties take the left half first.
fn merge<T: Clone + Display + PartialOrd>(
    arr: &mut [T],
    left: usize,
    mid: usize,
    right: usize,
    rec: &mut Recorder<SortFrame<T>>,
) {
    let left_half = arr[left..=mid].to_vec();
    let right_half = arr[mid + 1..=right].to_vec();
    let (mut i, mut j, mut k) = (0, 0, left);

    while i < left_half.len() && j < right_half.len() {
        rec.record(
            Action::Compare,
            format!("Compare {} and {}", left_half[i], right_half[j]),
            Some(Highlight::Index(k)),
            || snapshot(arr, None),
        );
        if left_half[i] <= right_half[j] {
            arr[k] = left_half[i].clone();
            i += 1;
        } else {
            arr[k] = right_half[j].clone();
            j += 1;
        }
        rec.record(
            Action::Update,
            format!("Write {} at index {}", arr[k], k),
            Some(Highlight::Index(k)),
            || snapshot(arr, None),
        );
        k += 1;
    }

    for value in left_half[i..].iter().chain(&right_half[j..]) {
        arr[k] = value.clone();
        rec.record(
            Action::Insert,
            format!("Copy remaining {} to index {}", value, k),
            Some(Highlight::Index(k)),
            || snapshot(arr, None),
        );
        k += 1;
    }
}

pub fn quick_sort<T: Clone + Display + PartialOrd>(
    values: &[T],
    config: TraceConfig,
) -> Traced<Vec<T>, SortFrame<T>> {
    let mut rec = Recorder::new(config, Algorithm::QuickSort);
    let mut arr = values.to_vec();
    if !arr.is_empty() {
        let high = arr.len() - 1;
        quick_sort_range(&mut arr, 0, high, &mut rec);
    }
    finish(rec, arr, "quick sort")
}

fn quick_sort_range<T: Clone + Display + PartialOrd>(
    arr: &mut [T],
    low: usize,
    high: usize,
    rec: &mut Recorder<SortFrame<T>>,
) {
    if low >= high {
        return;
    }
    rec.record(
        Action::Visit,
        format!("Sort [{}..{}]", low, high),
        Some(Highlight::Range {
            left: low,
            right: high,
            mid: None,
        }),
        || snapshot(arr, None),
    );
    let pivot = partition(arr, low, high, rec);
    if pivot > low {
        quick_sort_range(arr, low, pivot - 1, rec);
    }
    quick_sort_range(arr, pivot + 1, high, rec);
}

/// Lomuto partition around `arr[high]`. Returns the pivot's final index.
fn partition<T: Clone + Display + PartialOrd>(
    arr: &mut [T],
    low: usize,
    high: usize,
    rec: &mut Recorder<SortFrame<T>>,
) -> usize {
    let pivot = arr[high].clone();
    rec.record(
        Action::Start,
        format!("Pivot is {}", pivot),
        Some(Highlight::Index(high)),
        || snapshot(arr, Some(high)),
    );
    // Next slot for an element smaller than the pivot.
    let mut store = low;
    for j in low..high {
        rec.record(
            Action::Compare,
            format!("Compare {} with pivot {}", arr[j], pivot),
            Some(Highlight::Index(j)),
            || snapshot(arr, Some(high)),
        );
        if arr[j] < pivot {
            arr.swap(store, j);
            rec.record(
                Action::Swap,
                format!("Move {} to index {}", arr[store], store),
                Some(Highlight::Pair(store, j)),
                || snapshot(arr, Some(high)),
            );
            store += 1;
        }
    }
    arr.swap(store, high);
    rec.record(
        Action::Update,
        format!("Place pivot {} at index {}", pivot, store),
        Some(Highlight::Index(store)),
        || snapshot(arr, Some(store)),
    );
    store
}

/// `len` values drawn uniformly from `1..=max`.
pub fn random_array<R: Rng>(len: usize, max: u32, rng: &mut R) -> Vec<u32> {
    let max = max.max(1);
    (0..len).map(|_| rng.gen_range(1..=max)).collect()
}

/// Input and output of the most recent sort, kept for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortRun<T> {
    pub algorithm: SortAlgorithm,
    pub input: Vec<T>,
    pub output: Vec<T>,
}
