use super::observer::{SearchObserver, SearchStats, SearchStep, StopReason};
use crate::problem::Problem;
use crate::solution::Solution;
use crate::types::{Item, SortStrategy, Weights};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, info};

/// One-pass construction over a sorted backlog.
pub struct Greedy;

impl Greedy {
    /// Sorts the backlog by `strategy` and places every item with
    /// [`Problem::add_to_solution`], starting from `solution_factory()`.
    ///
    /// Never fails: an item that fits nowhere gets a container of its own.
    pub fn solve<F>(problem: &Problem, solution_factory: F, strategy: SortStrategy) -> Solution
    where
        F: FnOnce() -> Solution,
    {
        Self::solve_observed(problem, solution_factory, strategy, &mut ())
    }

    /// [`Greedy::solve`] reporting every placement to `observer`.
    pub fn solve_observed<F>(
        problem: &Problem,
        solution_factory: F,
        strategy: SortStrategy,
        observer: &mut dyn SearchObserver,
    ) -> Solution
    where
        F: FnOnce() -> Solution,
    {
        let started = Instant::now();
        let weights = Weights::default();

        let mut backlog = problem.items().to_vec();
        sort_backlog(&mut backlog, strategy);
        debug!(items = backlog.len(), ?strategy, "greedy construction started");

        let mut solution = solution_factory();
        let mut stats = SearchStats::new("greedy");

        for (index, item) in backlog.into_iter().enumerate() {
            problem.add_to_solution(&mut solution, item);
            stats.iterations += 1;
            stats.accepted += 1;
            let value = solution.evaluate(&weights);
            observer.on_step(&SearchStep {
                iteration: index as u64,
                value,
                best_value: value,
                accepted: true,
                improved: false,
                temperature: None,
                solution: &solution,
            });
        }

        let value = solution.evaluate(&weights);
        let stats = stats.finish(started.elapsed(), value, StopReason::Completed);
        info!(
            containers = solution.num_containers(),
            elapsed_secs = stats.elapsed_secs,
            "greedy construction finished"
        );
        observer.on_finish(&stats);

        solution
    }
}

/// Stable sort of the backlog; ties keep their original order.
pub fn sort_backlog(items: &mut [Item], strategy: SortStrategy) {
    match strategy {
        SortStrategy::LargestAreaFirst => items.sort_by(|a, b| b.area().cmp(&a.area())),
        SortStrategy::SmallestAreaFirst => items.sort_by_key(Item::area),
        SortStrategy::LargestAspectRatioFirst => items.sort_by(|a, b| {
            b.aspect_ratio()
                .partial_cmp(&a.aspect_ratio())
                .unwrap_or(Ordering::Equal)
        }),
        SortStrategy::SmallestAspectRatioFirst => items.sort_by(|a, b| {
            a.aspect_ratio()
                .partial_cmp(&b.aspect_ratio())
                .unwrap_or(Ordering::Equal)
        }),
    }
}
