//! Perturbation operators used by local search and simulated annealing.

use crate::problem::Problem;
use crate::solution::Solution;
use crate::types::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

mod geometry;
mod overlap;
mod rule;
#[cfg(test)]
mod tests;

pub use geometry::GeometryBased;
pub use overlap::OverlapStrategy;
pub use rule::{sort_by_rule, RuleBased};

/// Maps a solution to a nearby candidate.
///
/// Implementations return a fresh solution and never modify their input, but
/// may update their own state (random generator, decaying allowance).
pub trait Neighborhood {
    fn generate_neighbor(&mut self, solution: &Solution) -> Solution;
}

/// One of the built-in neighborhoods, selected at runtime.
pub enum NeighborhoodKind<'a> {
    Geometry(GeometryBased<'a>),
    Rule(RuleBased<'a>),
    Overlap(OverlapStrategy<'a>),
}

impl<'a> NeighborhoodKind<'a> {
    pub fn from_config(
        problem: &'a Problem,
        config: &NeighborhoodConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        Ok(match *config {
            NeighborhoodConfig::Geometry => Self::Geometry(GeometryBased::new(problem, seed)),
            NeighborhoodConfig::Rule { rule } => Self::Rule(RuleBased::new(problem, rule, seed)),
            NeighborhoodConfig::Overlap {
                initial_overlap,
                decay_rate,
            } => Self::Overlap(OverlapStrategy::new(problem, initial_overlap, decay_rate)?),
        })
    }
}

impl Neighborhood for NeighborhoodKind<'_> {
    fn generate_neighbor(&mut self, solution: &Solution) -> Solution {
        match self {
            Self::Geometry(n) => n.generate_neighbor(solution),
            Self::Rule(n) => n.generate_neighbor(solution),
            Self::Overlap(n) => n.generate_neighbor(solution),
        }
    }
}

/// Deterministic generator for a given seed, OS entropy otherwise.
pub(crate) fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}
