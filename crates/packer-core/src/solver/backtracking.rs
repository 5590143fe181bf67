use super::observer::{SearchObserver, SearchStats, SearchStep, StopReason};
use crate::problem::Problem;
use crate::solution::Solution;
use crate::types::Weights;
use std::time::Instant;
use tracing::{debug, info};

/// Depth-first construction in backlog order with early termination.
///
/// The construction primitive offers exactly one candidate position per item,
/// so there is never an alternative to retry: the first item that cannot be
/// placed ends the whole walk with "no solution". Placements made before the
/// failure are not undone; the partial solution is simply discarded. The walk
/// is a loop over the backlog, so its depth is not bounded by the call stack.
#[derive(Debug, Clone, Default)]
pub struct Backtracking {
    container_limit: Option<usize>,
}

impl Backtracking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the walk when an item would need more than `limit` containers.
    pub fn with_container_limit(limit: usize) -> Self {
        Self {
            container_limit: Some(limit),
        }
    }

    pub fn container_limit(&self) -> Option<usize> {
        self.container_limit
    }

    /// Places items in their original order. Returns a solution holding every
    /// item, or `None`; never a partial solution.
    pub fn solve<F>(&self, problem: &Problem, solution_factory: F) -> Option<Solution>
    where
        F: FnOnce() -> Solution,
    {
        self.solve_observed(problem, solution_factory, &mut ())
    }

    pub fn solve_observed<F>(
        &self,
        problem: &Problem,
        solution_factory: F,
        observer: &mut dyn SearchObserver,
    ) -> Option<Solution>
    where
        F: FnOnce() -> Solution,
    {
        let started = Instant::now();
        let mut stats = SearchStats::new("backtracking");
        let weights = Weights::default();
        let mut current = solution_factory();

        for (index, item) in problem.items().iter().enumerate() {
            stats.iterations += 1;
            match problem.try_add_to_solution(&mut current, item.clone(), self.container_limit) {
                Ok(_) => {
                    stats.accepted += 1;
                    let value = current.evaluate(&weights);
                    observer.on_step(&SearchStep {
                        iteration: index as u64,
                        value,
                        best_value: value,
                        accepted: true,
                        improved: false,
                        temperature: None,
                        solution: &current,
                    });
                }
                Err(err) => {
                    debug!(index, %err, "backtracking found no placement");
                    let value = current.evaluate(&weights);
                    let stats = stats.finish(started.elapsed(), value, StopReason::Infeasible);
                    observer.on_finish(&stats);
                    return None;
                }
            }
        }

        let value = current.evaluate(&weights);
        let stats = stats.finish(started.elapsed(), value, StopReason::Completed);
        info!(
            containers = current.num_containers(),
            elapsed_secs = stats.elapsed_secs,
            "backtracking finished"
        );
        observer.on_finish(&stats);

        Some(current)
    }
}
