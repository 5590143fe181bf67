//! Search strategies over the placement and neighborhood primitives.
//!
//! [`Greedy`] and [`Backtracking`] construct a solution item by item through
//! [`Problem::add_to_solution`](crate::problem::Problem::add_to_solution).
//! [`LocalSearch`] and [`SimulatedAnnealing`] improve a caller-supplied start
//! solution by repeatedly asking a [`Neighborhood`](crate::neighborhood::Neighborhood)
//! for a candidate and scoring it with [`Solution::evaluate`](crate::solution::Solution::evaluate).

mod annealing;
mod backtracking;
mod greedy;
mod local_search;
mod observer;

pub use annealing::{AnnealingParams, SimulatedAnnealing};
pub use backtracking::Backtracking;
pub use greedy::{sort_backlog, Greedy};
pub use local_search::LocalSearch;
pub use observer::{InterimRecorder, SearchObserver, SearchStats, SearchStep, StopReason};

pub(crate) use observer::StatsTap;
