use super::*;
use crate::problem::find_valid_assignment;
use rand::seq::SliceRandom;

/// Empties the last container into the earlier ones where possible.
///
/// Items of the last container are taken in random order; each goes to the
/// first earlier container (by index) with a zero-overlap position. Items
/// that fit nowhere stay where they are.
pub struct GeometryBased<'a> {
    problem: &'a Problem,
    rng: ChaCha20Rng,
}

impl<'a> GeometryBased<'a> {
    pub fn new(problem: &'a Problem, seed: Option<u64>) -> Self {
        Self {
            problem,
            rng: seeded_rng(seed),
        }
    }

    pub fn problem(&self) -> &Problem {
        self.problem
    }
}

impl Neighborhood for GeometryBased<'_> {
    fn generate_neighbor(&mut self, solution: &Solution) -> Solution {
        let mut next = solution.clone();
        let Some(source) = next.num_containers().checked_sub(1) else {
            return next;
        };

        let mut pending: Vec<ItemId> = next.containers()[source]
            .items()
            .iter()
            .map(|item| item.id)
            .collect();
        pending.shuffle(&mut self.rng);

        for id in pending {
            let Some(item) = next.containers()[source]
                .items()
                .iter()
                .find(|item| item.id == id)
            else {
                continue;
            };

            let target = next.containers()[..source]
                .iter()
                .enumerate()
                .find_map(|(index, container)| {
                    find_valid_assignment(container, item, 0.0).map(|a| (index, a))
                });

            if let Some((to, assignment)) = target {
                next.relocate(source, to, id, assignment.position, assignment.rotated);
            }
        }

        next
    }
}
