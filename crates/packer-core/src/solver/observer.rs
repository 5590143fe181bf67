use crate::solution::Solution;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Why a solver returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Backlog exhausted or iteration budget spent.
    Completed,
    /// Temperature fell to the end temperature.
    Cooled,
    /// Wall-clock budget ran out; the best solution so far was returned.
    TimeBudget,
    /// An item could not be placed and construction gave up.
    Infeasible,
}

/// Metrics of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub algorithm: String,
    pub iterations: u64,
    pub accepted: u64,
    pub improvements: u64,
    pub best_value: f64,
    pub elapsed_secs: f64,
    pub stop_reason: StopReason,
}

impl SearchStats {
    pub(crate) fn new(algorithm: &str) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            iterations: 0,
            accepted: 0,
            improvements: 0,
            best_value: 0.0,
            elapsed_secs: 0.0,
            stop_reason: StopReason::Completed,
        }
    }

    pub(crate) fn finish(
        mut self,
        elapsed: Duration,
        best_value: f64,
        stop_reason: StopReason,
    ) -> Self {
        self.elapsed_secs = elapsed.as_secs_f64();
        self.best_value = best_value;
        self.stop_reason = stop_reason;
        self
    }
}

/// One step of a solver: a placed item during construction, or an evaluated
/// neighbor during a search.
#[derive(Debug)]
pub struct SearchStep<'a> {
    pub iteration: u64,
    pub value: f64,
    pub best_value: f64,
    pub accepted: bool,
    pub improved: bool,
    pub temperature: Option<f64>,
    pub solution: &'a Solution,
}

/// Receives solver progress. Both hooks default to doing nothing.
pub trait SearchObserver {
    fn on_step(&mut self, _step: &SearchStep<'_>) {}

    fn on_finish(&mut self, _stats: &SearchStats) {}
}

impl SearchObserver for () {}

/// Keeps a copy of every accepted intermediate solution, for step-through
/// visualisation of a run.
#[derive(Debug, Default)]
pub struct InterimRecorder {
    snapshots: Vec<Solution>,
    stats: Option<SearchStats>,
}

impl InterimRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> &[Solution] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Solution> {
        self.snapshots
    }

    pub fn stats(&self) -> Option<&SearchStats> {
        self.stats.as_ref()
    }
}

impl SearchObserver for InterimRecorder {
    fn on_step(&mut self, step: &SearchStep<'_>) {
        if step.accepted {
            self.snapshots.push(step.solution.clone());
        }
    }

    fn on_finish(&mut self, stats: &SearchStats) {
        self.stats = Some(stats.clone());
    }
}

/// Forwards to `inner` and keeps the final stats for the caller.
pub(crate) struct StatsTap<'a> {
    pub inner: &'a mut dyn SearchObserver,
    pub stats: Option<SearchStats>,
}

impl SearchObserver for StatsTap<'_> {
    fn on_step(&mut self, step: &SearchStep<'_>) {
        self.inner.on_step(step);
    }

    fn on_finish(&mut self, stats: &SearchStats) {
        self.stats = Some(stats.clone());
        self.inner.on_finish(stats);
    }
}
