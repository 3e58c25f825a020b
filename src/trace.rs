//! Step recording for stepwise playback.
//!
//! Every structure in this crate can describe what it is doing as an ordered list of
//! [`Step`]s. A step owns a full copy of the visible state at that instant, so mutating the
//! structure afterwards never rewrites steps that were already handed out.
//!
//! Mutating operations keep the trace of the most recent call on the structure itself
//! (`last_trace`). Read-only algorithms such as searches and traversals return a
//! [`Traced`] value holding both the answer and the trace.

use crate::catalog::Algorithm;
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-instance tracing options, handed to each structure when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// When false no snapshots are taken and every trace comes back empty.
    pub enabled: bool,

    /// Pause between steps during playback. Only the binary looks at this.
    pub delay: Duration,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay: Duration::ZERO,
        }
    }
}

impl TraceConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Phase of an operation that a step describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Start,
    Compare,
    Visit,
    Enqueue,
    Dequeue,
    Push,
    Pop,
    Insert,
    Remove,
    Update,
    Swap,
    Probe,
    Relax,
    Found,
    NotFound,
    Done,
}

/// What the next mutation is about to touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Index(usize),
    Range {
        left: usize,
        right: usize,
        mid: Option<usize>,
    },
    Pair(usize, usize),
    Slot {
        bucket: usize,
        position: Option<usize>,
    },
    Vertex(String),
    Edge(String, String),
    Value(String),
}

/// One immutable snapshot in a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<S> {
    /// 1-based position in the trace.
    pub step: usize,
    pub action: Action,
    pub description: String,
    pub state: S,
    pub highlight: Option<Highlight>,
    /// 1-based line of the algorithm's pseudocode listing, when one applies.
    pub line: Option<usize>,
}

/// Collects the steps of a single operation.
#[derive(Debug)]
pub struct Recorder<S> {
    config: TraceConfig,
    algorithm: Algorithm,
    steps: Vec<Step<S>>,
}

impl<S> Recorder<S> {
    pub fn new(config: TraceConfig, algorithm: Algorithm) -> Self {
        Self {
            config,
            algorithm,
            steps: Vec::new(),
        }
    }

    pub fn disabled(algorithm: Algorithm) -> Self {
        Self::new(TraceConfig::disabled(), algorithm)
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Appends a step. `state` is only evaluated while tracing is enabled.
    pub fn record<F>(
        &mut self,
        action: Action,
        description: impl Into<String>,
        highlight: Option<Highlight>,
        state: F,
    ) where
        F: FnOnce() -> S,
    {
        if !self.config.enabled {
            return;
        }
        let step = self.steps.len() + 1;
        let description = description.into();
        trace!("{:?} step {}: {}", self.algorithm, step, description);
        self.steps.push(Step {
            step,
            action,
            description,
            state: state(),
            highlight,
            line: self.algorithm.line_for(action),
        });
    }

    pub fn finish(self) -> Trace<S> {
        Trace { steps: self.steps }
    }
}

/// A finished, restartable sequence of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace<S> {
    steps: Vec<Step<S>>,
}

impl<S> Default for Trace<S> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<S> Trace<S> {
    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> Option<&Step<S>> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step<S>> {
        self.steps.last()
    }

    pub fn get(&self, index: usize) -> Option<&Step<S>> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<S>> {
        self.steps.iter()
    }

    /// Descriptions in order; handy for printing and for assertions.
    pub fn descriptions(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.description.as_str()).collect()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.steps.iter().map(|s| s.action).collect()
    }

    pub fn into_playback(self) -> Playback<S> {
        Playback::new(self)
    }

    /// Converts every snapshot, keeping numbering, actions and descriptions.
    pub fn map_state<U>(self, mut f: impl FnMut(S) -> U) -> Trace<U> {
        Trace {
            steps: self
                .steps
                .into_iter()
                .map(|s| Step {
                    step: s.step,
                    action: s.action,
                    description: s.description,
                    state: f(s.state),
                    highlight: s.highlight,
                    line: s.line,
                })
                .collect(),
        }
    }
}

impl<S> IntoIterator for Trace<S> {
    type Item = Step<S>;
    type IntoIter = std::vec::IntoIter<Step<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a Step<S>;
    type IntoIter = std::slice::Iter<'a, Step<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Result of a read-only algorithm together with the steps that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traced<R, S> {
    pub result: R,
    pub trace: Trace<S>,
}

impl<R, S> Traced<R, S> {
    pub fn into_parts(self) -> (R, Trace<S>) {
        (self.result, self.trace)
    }
}

/// Cursor over a trace. Every move is clamped to `[0, len - 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playback<S> {
    trace: Trace<S>,
    cursor: usize,
}

impl<S> Default for Playback<S> {
    fn default() -> Self {
        Self::new(Trace::default())
    }
}

impl<S> Playback<S> {
    pub fn new(trace: Trace<S>) -> Self {
        Self { trace, cursor: 0 }
    }

    pub fn trace(&self) -> &Trace<S> {
        &self.trace
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.trace.len()
    }

    pub fn current(&self) -> Option<&Step<S>> {
        self.trace.get(self.cursor)
    }

    pub fn is_at_end(&self) -> bool {
        self.trace.is_empty() || self.cursor + 1 == self.trace.len()
    }

    pub fn next_step(&mut self) -> Option<&Step<S>> {
        if self.cursor + 1 < self.trace.len() {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn previous_step(&mut self) -> Option<&Step<S>> {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    pub fn go_to(&mut self, index: usize) -> Option<&Step<S>> {
        let last = self.trace.len().saturating_sub(1);
        if index > last {
            warn!("step {} out of range, clamping to {}", index, last);
        }
        self.cursor = index.min(last);
        self.current()
    }

    pub fn reset(&mut self) -> Option<&Step<S>> {
        self.cursor = 0;
        self.current()
    }

    /// Steps already shown, counting the current one.
    pub fn steps_completed(&self) -> usize {
        if self.trace.is_empty() {
            0
        } else {
            self.cursor + 1
        }
    }
}
