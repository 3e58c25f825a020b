use crate::catalog::Algorithm;
use crate::trace::{Action, Highlight, Playback, Recorder, Step, Trace, TraceConfig};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;

/// Per-step detail of a search, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchProbe<T> {
    Linear {
        current_index: usize,
        current_value: T,
    },
    /// `mid` is `None` on the closing not-found step, where `right` may be -1.
    Binary {
        left: isize,
        right: isize,
        mid: Option<usize>,
        mid_value: Option<T>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFrame<T> {
    pub array: Vec<T>,
    pub probe: SearchProbe<T>,
    pub found: bool,
}

/// Linear and binary search over a sorted copy of the input, with step navigation.
///
/// Both searches run on the same sorted array. The history of the last search stays
/// available for playback until the next search, `set_array` or `clear`.
#[derive(Debug, Clone)]
pub struct SearchingAlgorithms<T> {
    array: Vec<T>,
    playback: Playback<SearchFrame<T>>,
    algorithm: Algorithm,
    config: TraceConfig,
}

impl<T: Clone + Display + PartialOrd> Default for SearchingAlgorithms<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Display + PartialOrd> SearchingAlgorithms<T> {
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    pub fn with_config(config: TraceConfig) -> Self {
        SearchingAlgorithms {
            array: Vec::new(),
            playback: Playback::default(),
            algorithm: Algorithm::LinearSearch,
            config,
        }
    }

    /// Stores a sorted copy of `values` and drops any recorded history.
    pub fn set_array(&mut self, values: &[T]) {
        let mut array = values.to_vec();
        array.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        self.array = array;
        self.playback = Playback::default();
    }

    /// Index of the first element equal to `target`, scanning left to right.
    pub fn linear_search(&mut self, target: &T) -> Option<usize> {
        let mut rec = Recorder::new(self.config, Algorithm::LinearSearch);
        let mut result = None;
        let last = self.array.len().saturating_sub(1);
        for (index, value) in self.array.iter().enumerate() {
            let found = value == target;
            let mut message = format!("Checking element at index {}: {}", index, value);
            let action = if found {
                message.push_str(" - Found!");
                Action::Found
            } else if index == last {
                message.push_str(&format!(" - Target {} not found in array", target));
                Action::NotFound
            } else {
                Action::Compare
            };
            rec.record(action, message, Some(Highlight::Index(index)), || {
                SearchFrame {
                    array: self.array.clone(),
                    probe: SearchProbe::Linear {
                        current_index: index,
                        current_value: value.clone(),
                    },
                    found,
                }
            });
            if found {
                result = Some(index);
                break;
            }
        }
        self.load(Algorithm::LinearSearch, rec.finish());
        result
    }

    /// Bisection over the sorted array. Each iteration is one step; an exhausted search
    /// ends with an extra not-found step.
    pub fn binary_search(&mut self, target: &T) -> Option<usize> {
        let mut rec = Recorder::new(self.config, Algorithm::BinarySearch);
        let mut left: isize = 0;
        let mut right: isize = self.array.len() as isize - 1;
        let mut iteration = 1;
        let mut result = None;

        while left <= right {
            let mid = ((left + right) / 2) as usize;
            let mid_value = &self.array[mid];
            let (bounds_left, bounds_right) = (left, right);
            let mut message = format!(
                "Step {}: Checking middle element at index {} ({})",
                iteration, mid, mid_value
            );
            let ordering = mid_value.partial_cmp(target);
            let found = ordering == Some(Ordering::Equal);
            match ordering {
                Some(Ordering::Equal) => message.push_str(" - Found!"),
                Some(Ordering::Less) => {
                    left = mid as isize + 1;
                    message.push_str(&format!(
                        " - Target {} > {}, searching right half [{}...{}]",
                        target, mid_value, left, right
                    ));
                }
                _ => {
                    right = mid as isize - 1;
                    message.push_str(&format!(
                        " - Target {} < {}, searching left half [{}...{}]",
                        target, mid_value, left, right
                    ));
                }
            }
            rec.record(
                if found { Action::Found } else { Action::Compare },
                message,
                Some(Highlight::Range {
                    left: bounds_left as usize,
                    right: bounds_right as usize,
                    mid: Some(mid),
                }),
                || SearchFrame {
                    array: self.array.clone(),
                    probe: SearchProbe::Binary {
                        left: bounds_left,
                        right: bounds_right,
                        mid: Some(mid),
                        mid_value: Some(mid_value.clone()),
                    },
                    found,
                },
            );
            if found {
                result = Some(mid);
                break;
            }
            iteration += 1;
        }

        if result.is_none() {
            rec.record(
                Action::NotFound,
                format!("Step {}: Target {} not found in array", iteration, target),
                None,
                || SearchFrame {
                    array: self.array.clone(),
                    probe: SearchProbe::Binary {
                        left,
                        right,
                        mid: None,
                        mid_value: None,
                    },
                    found: false,
                },
            );
        }
        self.load(Algorithm::BinarySearch, rec.finish());
        result
    }

    fn load(&mut self, algorithm: Algorithm, trace: Trace<SearchFrame<T>>) {
        debug!("{} recorded {} steps", algorithm, trace.len());
        self.algorithm = algorithm;
        self.playback = trace.into_playback();
    }

    /// Which search produced the current history.
    pub fn last_algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Zero-based index of the step being shown.
    pub fn current_step(&self) -> usize {
        self.playback.position()
    }

    pub fn total_steps(&self) -> usize {
        self.playback.total()
    }

    pub fn current_step_data(&self) -> Option<&Step<SearchFrame<T>>> {
        self.playback.current()
    }

    pub fn next_step(&mut self) -> Option<&Step<SearchFrame<T>>> {
        self.playback.next_step()
    }

    pub fn previous_step(&mut self) -> Option<&Step<SearchFrame<T>>> {
        self.playback.previous_step()
    }

    /// Jumps to `step`, clamped to the recorded range.
    pub fn go_to_step(&mut self, step: usize) -> Option<&Step<SearchFrame<T>>> {
        self.playback.go_to(step)
    }

    pub fn reset(&mut self) -> Option<&Step<SearchFrame<T>>> {
        self.playback.reset()
    }

    pub fn steps(&self) -> &Trace<SearchFrame<T>> {
        self.playback.trace()
    }

    pub fn playback(&self) -> &Playback<SearchFrame<T>> {
        &self.playback
    }

    pub fn array(&self) -> &[T] {
        &self.array
    }

    pub fn array_size(&self) -> usize {
        self.array.len()
    }

    pub fn is_sorted(&self) -> bool {
        self.array.windows(2).all(|pair| pair[0] <= pair[1])
    }

    pub fn clear(&mut self) {
        self.array.clear();
        self.playback = Playback::default();
    }
}
