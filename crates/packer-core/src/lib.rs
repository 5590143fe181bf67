//! Two-dimensional rectangle bin packing into identical square containers.
//!
//! [`Packer`] is the request-level entry point. The building blocks
//! ([`Problem`], [`Solution`], the solvers and neighborhoods) are public for
//! callers that want to drive a search directly.

pub mod geometry;
pub mod instance;
pub mod neighborhood;
pub mod packer;
pub mod problem;
pub mod solution;
pub mod solver;
pub mod svg;
pub mod types;

pub use instance::InstanceGenerator;
pub use neighborhood::{
    GeometryBased, Neighborhood, NeighborhoodKind, OverlapStrategy, RuleBased,
};
pub use packer::{Packer, PackingResult};
pub use problem::{find_valid_assignment, Assignment, Problem, MAX_CONTAINER_SIZE};
pub use solution::{Container, Solution};
pub use solver::{
    AnnealingParams, Backtracking, Greedy, InterimRecorder, LocalSearch, SearchObserver,
    SearchStats, SearchStep, SimulatedAnnealing, StopReason,
};
pub use svg::{render_result, render_svg, SvgOptions};
pub use types::*;
