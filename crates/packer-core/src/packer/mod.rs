use crate::neighborhood::NeighborhoodKind;
use crate::problem::Problem;
use crate::solution::Solution;
use crate::solver::*;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

#[cfg(test)]
mod tests;

/// Output: what a packing run returns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingResult {
    pub algorithm: String,
    pub container_size: u32,
    pub solution: Solution,
    pub summary: Summary,
    pub stats: SearchStats,
}

/// Runs one configured solver over a validated request.
pub struct Packer {
    request: PackingRequest,
    problem: Problem,
}

impl Packer {
    /// Validates the request and builds a new packer instance.
    pub fn new(request: PackingRequest) -> Result<Self> {
        if request.items.is_empty() {
            return Err(PackingError::InvalidInput(
                "At least one item must be provided".to_string(),
            ));
        }

        if let Some(index) = request.items.iter().position(|spec| spec.quantity == 0) {
            return Err(PackingError::InvalidInput(format!(
                "Item entry {} has zero quantity",
                index
            )));
        }

        request.weights.validate()?;
        let problem = Problem::from_specs(&request.items, request.container_size)?;

        match &request.algorithm {
            AlgorithmConfig::Greedy { .. } | AlgorithmConfig::Backtracking { .. } => {}
            AlgorithmConfig::LocalSearch {
                neighborhood, seed, ..
            } => {
                NeighborhoodKind::from_config(&problem, neighborhood, *seed)?;
            }
            AlgorithmConfig::SimulatedAnnealing {
                neighborhood, seed, ..
            } => {
                NeighborhoodKind::from_config(&problem, neighborhood, *seed)?;
                SimulatedAnnealing::new(annealing_params(&request.algorithm, request.weights)?)?;
            }
        }

        Ok(Self { request, problem })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn request(&self) -> &PackingRequest {
        &self.request
    }

    /// Executes the configured solver and summarises its solution.
    pub fn pack(&self) -> Result<PackingResult> {
        self.pack_observed(&mut ())
    }

    /// [`Packer::pack`] with progress forwarded to `observer`.
    pub fn pack_observed(&self, observer: &mut dyn SearchObserver) -> Result<PackingResult> {
        let problem = &self.problem;
        let weights = self.request.weights;
        let mut tap = StatsTap {
            inner: observer,
            stats: None,
        };

        info!(
            algorithm = self.request.algorithm.name(),
            items = problem.items().len(),
            container_size = problem.container_size(),
            "packing started"
        );

        let solution = match &self.request.algorithm {
            AlgorithmConfig::Greedy { strategy } => {
                Greedy::solve_observed(problem, Solution::new, *strategy, &mut tap)
            }
            AlgorithmConfig::Backtracking { container_limit } => {
                let solver = match container_limit {
                    Some(limit) => Backtracking::with_container_limit(*limit),
                    None => Backtracking::new(),
                };
                match solver.solve_observed(problem, Solution::new, &mut tap) {
                    Some(solution) => solution,
                    None => {
                        let failed_at = tap
                            .stats
                            .as_ref()
                            .map_or(0, |stats| stats.iterations.saturating_sub(1) as usize);
                        let id = problem
                            .items()
                            .get(failed_at)
                            .map_or(ItemId(failed_at), |item| item.id);
                        return Err(PackingError::NoFeasiblePlacement(id));
                    }
                }
            }
            AlgorithmConfig::LocalSearch {
                max_iterations,
                neighborhood,
                seed_solution,
                seed,
            } => {
                let start = problem
                    .seed_solution(seed_solution.unwrap_or_else(|| Seed::default_for(neighborhood)));
                let mut neighborhood = NeighborhoodKind::from_config(problem, neighborhood, *seed)?;
                LocalSearch::new(*max_iterations)
                    .with_weights(weights)?
                    .solve_observed(problem, start, &mut neighborhood, &mut tap)
            }
            AlgorithmConfig::SimulatedAnnealing {
                neighborhood,
                seed_solution,
                seed,
                ..
            } => {
                let start = problem
                    .seed_solution(seed_solution.unwrap_or_else(|| Seed::default_for(neighborhood)));
                let mut neighborhood = NeighborhoodKind::from_config(problem, neighborhood, *seed)?;
                SimulatedAnnealing::new(annealing_params(&self.request.algorithm, weights)?)?
                    .solve_observed(problem, start, &mut neighborhood, &mut tap)
            }
        };

        let summary = solution.summary(&weights);
        let stats = tap
            .stats
            .unwrap_or_else(|| SearchStats::new(self.request.algorithm.name()));

        info!(
            containers = summary.total_containers,
            waste_percentage = summary.waste_percentage,
            score = summary.score,
            "packing complete"
        );

        Ok(PackingResult {
            algorithm: self.request.algorithm.name().to_string(),
            container_size: problem.container_size(),
            solution,
            summary,
            stats,
        })
    }
}

/// Translates the annealing section of a request into solver parameters.
fn annealing_params(config: &AlgorithmConfig, weights: Weights) -> Result<AnnealingParams> {
    let AlgorithmConfig::SimulatedAnnealing {
        initial_temperature,
        end_temperature,
        cooling_rate,
        iterations_per_temperature,
        max_time_secs,
        seed,
        ..
    } = *config
    else {
        return Err(PackingError::InvalidInput(
            "Annealing parameters requested for a different algorithm".to_string(),
        ));
    };

    let max_time = Duration::try_from_secs_f64(max_time_secs).map_err(|_| {
        PackingError::InvalidInput(format!(
            "Time budget must be a representable non-negative number of seconds, got {}",
            max_time_secs
        ))
    })?;

    Ok(AnnealingParams {
        initial_temperature,
        end_temperature,
        cooling_rate,
        iterations_per_temperature,
        max_time,
        weights,
        seed,
    })
}
