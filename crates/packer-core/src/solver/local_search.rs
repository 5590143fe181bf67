use super::observer::{SearchObserver, SearchStats, SearchStep, StopReason};
use crate::neighborhood::Neighborhood;
use crate::problem::Problem;
use crate::solution::Solution;
use crate::types::{Result, Weights};
use std::time::Instant;
use tracing::{debug, info};

/// First-improvement hill climbing on a single chain.
///
/// A neighbor replaces the current solution when it scores no worse than the
/// best so far, so plateaus are walked instead of ending the search. Because
/// acceptance updates both, the current solution is always the best one.
#[derive(Debug, Clone)]
pub struct LocalSearch {
    max_iterations: u64,
    weights: Weights,
}

impl LocalSearch {
    pub fn new(max_iterations: u64) -> Self {
        Self {
            max_iterations,
            weights: Weights::default(),
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Result<Self> {
        weights.validate()?;
        self.weights = weights;
        Ok(self)
    }

    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    /// Runs `max_iterations` neighbor steps from `start_solution` and returns the best solution seen.
    pub fn solve<N>(&self, problem: &Problem, start_solution: Solution, neighborhood: &mut N) -> Solution
    where
        N: Neighborhood + ?Sized,
    {
        self.solve_observed(problem, start_solution, neighborhood, &mut ())
    }

    pub fn solve_observed<N>(
        &self,
        problem: &Problem,
        start_solution: Solution,
        neighborhood: &mut N,
        observer: &mut dyn SearchObserver,
    ) -> Solution
    where
        N: Neighborhood + ?Sized,
    {
        debug_assert_eq!(start_solution.num_items(), problem.items().len());

        let started = Instant::now();
        let mut stats = SearchStats::new("local_search");

        let mut current = start_solution;
        let mut best_value = current.evaluate(&self.weights);
        debug!(
            items = problem.items().len(),
            max_iterations = self.max_iterations,
            start_value = best_value,
            "local search started"
        );

        for iteration in 1..=self.max_iterations {
            let neighbor = neighborhood.generate_neighbor(&current);
            let value = neighbor.evaluate(&self.weights);
            stats.iterations += 1;

            let accepted = value <= best_value;
            let improved = value < best_value;
            if accepted {
                stats.accepted += 1;
                if improved {
                    stats.improvements += 1;
                }
                current = neighbor;
                best_value = value;
            }

            observer.on_step(&SearchStep {
                iteration,
                value,
                best_value,
                accepted,
                improved,
                temperature: None,
                solution: &current,
            });
        }

        let stats = stats.finish(started.elapsed(), best_value, StopReason::Completed);
        info!(
            iterations = stats.iterations,
            improvements = stats.improvements,
            best_value,
            elapsed_secs = stats.elapsed_secs,
            "local search finished"
        );
        observer.on_finish(&stats);

        current
    }
}
