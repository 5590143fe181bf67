use super::*;
use crate::problem::find_valid_assignment;

/// Tolerates partial overlap and tightens the tolerance on every call.
///
/// Each call moves every item whose overlap with a container-mate exceeds the
/// current allowance: first back into its own container, then into the other
/// containers in order, and into a fresh container at the origin as a last
/// resort. The allowance then drops by `decay_rate`, never below zero. Since
/// the allowance lives in the operator, one instance must not be shared
/// between independent runs.
pub struct OverlapStrategy<'a> {
    problem: &'a Problem,
    overlap_percentage: f64,
    decay_rate: f64,
}

impl<'a> OverlapStrategy<'a> {
    pub fn new(problem: &'a Problem, initial_overlap: f64, decay_rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&initial_overlap) {
            return Err(PackingError::InvalidInput(format!(
                "Initial overlap must lie in [0, 1], got {}",
                initial_overlap
            )));
        }
        if !decay_rate.is_finite() || decay_rate < 0.0 {
            return Err(PackingError::InvalidInput(format!(
                "Overlap decay rate must be non-negative, got {}",
                decay_rate
            )));
        }

        Ok(Self {
            problem,
            overlap_percentage: initial_overlap,
            decay_rate,
        })
    }

    /// Allowance the next call will enforce.
    pub fn overlap_percentage(&self) -> f64 {
        self.overlap_percentage
    }

    fn decay(&mut self) {
        // Rounded to 1e-6 so repeated subtraction lands exactly on zero.
        let next = ((self.overlap_percentage - self.decay_rate) * 1e6).round() / 1e6;
        self.overlap_percentage = next.max(0.0);
    }

    fn reassign(&self, solution: &mut Solution, home: usize, mut item: Item, allowance: f64) {
        let order = std::iter::once(home).chain((0..solution.num_containers()).filter(|&i| i != home));
        for index in order {
            let Some(container) = solution.containers().get(index) else {
                continue;
            };
            if let Some(assignment) = find_valid_assignment(container, &item, allowance) {
                item.place_at(assignment.position, assignment.rotated);
                solution.add_item(index, item);
                return;
            }
        }
        self.problem.open_at_origin(solution, item);
    }
}

impl Neighborhood for OverlapStrategy<'_> {
    fn generate_neighbor(&mut self, solution: &Solution) -> Solution {
        let allowance = self.overlap_percentage;
        let mut next = solution.clone();

        let mut index = 0;
        while index < next.num_containers() {
            let container = &next.containers()[index];
            let violating: Vec<ItemId> = (0..container.len())
                .filter(|&k| container.worst_overlap_ratio(k) > allowance)
                .map(|k| container.items()[k].id)
                .collect();

            let displaced: Vec<Item> = violating
                .into_iter()
                .filter_map(|id| next.remove_item(index, id))
                .collect();
            for item in displaced {
                self.reassign(&mut next, index, item, allowance);
            }

            if !next.prune_if_empty(index) {
                index += 1;
            }
        }

        self.decay();
        next
    }
}
