use super::observer::{SearchObserver, SearchStats, SearchStep, StopReason};
use crate::neighborhood::{seeded_rng, Neighborhood};
use crate::problem::Problem;
use crate::solution::Solution;
use crate::types::{PackingError, Result, Weights};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Parameters of a simulated annealing run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingParams {
    pub initial_temperature: f64,
    pub end_temperature: f64,
    /// Multiplier applied after each temperature level, in (0, 1).
    pub cooling_rate: f64,
    pub iterations_per_temperature: u64,
    /// Wall-clock budget, checked before every neighbor generation.
    pub max_time: Duration,
    pub weights: Weights,
    /// Seed for the acceptance coin; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for AnnealingParams {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            end_temperature: 25.0,
            cooling_rate: 0.95,
            iterations_per_temperature: 10,
            max_time: Duration::from_secs(10),
            weights: Weights::default(),
            seed: None,
        }
    }
}

/// Metropolis search with geometric cooling and a wall-clock cutoff.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    params: AnnealingParams,
}

impl SimulatedAnnealing {
    /// Validates the schedule. Rejects anything that could divide by zero or never cool down.
    pub fn new(params: AnnealingParams) -> Result<Self> {
        let AnnealingParams {
            initial_temperature,
            end_temperature,
            cooling_rate,
            ..
        } = params;

        if !end_temperature.is_finite() || end_temperature <= 0.0 {
            return Err(PackingError::InvalidTemperatureRange(format!(
                "end temperature must be positive, got {}",
                end_temperature
            )));
        }
        if !initial_temperature.is_finite() || initial_temperature <= end_temperature {
            return Err(PackingError::InvalidTemperatureRange(format!(
                "initial temperature {} must exceed end temperature {}",
                initial_temperature, end_temperature
            )));
        }
        if !(cooling_rate > 0.0 && cooling_rate < 1.0) {
            return Err(PackingError::InvalidTemperatureRange(format!(
                "cooling rate must lie in (0, 1), got {}",
                cooling_rate
            )));
        }
        params.weights.validate()?;

        Ok(Self { params })
    }

    pub fn params(&self) -> &AnnealingParams {
        &self.params
    }

    /// Anneals from `start_solution` and returns the best solution observed,
    /// which need not be the final current solution.
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

        let params = &self.params;
        let started = Instant::now();
        let mut rng = seeded_rng(params.seed);
        let mut stats = SearchStats::new("simulated_annealing");

        let mut current = start_solution;
        let mut best = current.clone();
        let mut best_value = best.evaluate(&params.weights);
        let mut temperature = params.initial_temperature;
        let mut stop_reason = StopReason::Cooled;

        debug!(
            items = problem.items().len(),
            start_value = best_value,
            "simulated annealing started"
        );

        'cooling: while temperature > params.end_temperature {
            for _ in 0..params.iterations_per_temperature {
                if started.elapsed() >= params.max_time {
                    stop_reason = StopReason::TimeBudget;
                    break 'cooling;
                }

                let neighbor = neighborhood.generate_neighbor(&current);
                let value = neighbor.evaluate(&params.weights);
                stats.iterations += 1;

                let delta = value - best_value;
                let accepted = delta <= 0.0 || rng.gen::<f64>() < (-delta / temperature).exp();
                let improved = accepted && value < best_value;

                if accepted {
                    stats.accepted += 1;
                    if improved {
                        stats.improvements += 1;
                        best = neighbor.clone();
                        best_value = value;
                    }
                    current = neighbor;
                }

                observer.on_step(&SearchStep {
                    iteration: stats.iterations,
                    value,
                    best_value,
                    accepted,
                    improved,
                    temperature: Some(temperature),
                    solution: &current,
                });
            }

            temperature *= params.cooling_rate;
        }

        let stats = stats.finish(started.elapsed(), best_value, stop_reason);
        info!(
            iterations = stats.iterations,
            accepted = stats.accepted,
            best_value,
            final_temperature = temperature,
            stop_reason = ?stats.stop_reason,
            elapsed_secs = stats.elapsed_secs,
            "simulated annealing finished"
        );
        observer.on_finish(&stats);

        best
    }
}
