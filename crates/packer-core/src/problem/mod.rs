use crate::solution::Solution;
use crate::types::*;
use std::collections::HashSet;

mod placement;
mod seed;

pub use placement::{find_valid_assignment, Assignment};

/// Largest accepted container side. The placement scan keeps a prefix-sum
/// table of `(side + 1)^2` cells per call.
pub const MAX_CONTAINER_SIZE: u32 = 2048;

/// An item backlog and the side length of the square container type.
#[derive(Debug, Clone)]
pub struct Problem {
    items: Vec<Item>,
    container_size: u32,
}

impl Problem {
    /// Validates the backlog and builds a problem.
    ///
    /// Items keep their ids, which must be unique. Any position carried by an
    /// incoming item is cleared.
    pub fn new(items: Vec<Item>, container_size: u32) -> Result<Self> {
        if container_size == 0 || container_size > MAX_CONTAINER_SIZE {
            return Err(PackingError::InvalidInput(format!(
                "Container size must lie in 1..={}, got {}",
                MAX_CONTAINER_SIZE, container_size
            )));
        }

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.width == 0 || item.height == 0 {
                return Err(PackingError::InvalidInput(format!(
                    "Item {} has a zero-length side",
                    item.id
                )));
            }

            // The container is square, so rotating never helps an oversized item.
            if item.width.max(item.height) > container_size {
                return Err(PackingError::InfeasibleItem {
                    id: item.id,
                    width: item.width,
                    height: item.height,
                    container_size,
                });
            }

            if !seen.insert(item.id) {
                return Err(PackingError::InvalidInput(format!(
                    "Item id {} is used more than once",
                    item.id
                )));
            }
        }

        let items = items
            .into_iter()
            .map(|mut item| {
                item.unplace();
                item
            })
            .collect();

        Ok(Self {
            items,
            container_size,
        })
    }

    /// Builds a problem from item descriptions, expanding quantities into
    /// distinct items numbered in input order.
    pub fn from_specs(specs: &[ItemSpec], container_size: u32) -> Result<Self> {
        let mut items = Vec::new();
        for spec in specs {
            for _ in 0..spec.quantity {
                let mut item = Item::new(items.len(), spec.width, spec.height);
                item.color = spec.color.clone();
                items.push(item);
            }
        }
        Self::new(items, container_size)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn container_size(&self) -> u32 {
        self.container_size
    }

    /// Places `item` in the first container that admits it without overlap,
    /// opening a new container at the origin when none does. Returns the
    /// index of the container that received the item.
    pub fn add_to_solution(&self, solution: &mut Solution, item: Item) -> usize {
        match self.place_in_existing(solution, item) {
            Ok(index) => index,
            Err(item) => self.open_at_origin(solution, item),
        }
    }

    /// Like [`Problem::add_to_solution`], but refuses to open a container
    /// beyond `container_limit`.
    pub fn try_add_to_solution(
        &self,
        solution: &mut Solution,
        item: Item,
        container_limit: Option<usize>,
    ) -> Result<usize> {
        match self.place_in_existing(solution, item) {
            Ok(index) => Ok(index),
            Err(item) if container_limit.is_some_and(|limit| solution.num_containers() >= limit) => {
                Err(PackingError::NoFeasiblePlacement(item.id))
            }
            Err(item) => Ok(self.open_at_origin(solution, item)),
        }
    }

    /// First-fit over existing containers in solution order. Hands the item
    /// back when no container admits it.
    fn place_in_existing(
        &self,
        solution: &mut Solution,
        mut item: Item,
    ) -> std::result::Result<usize, Item> {
        let found = solution
            .containers()
            .iter()
            .enumerate()
            .find_map(|(index, container)| {
                self.find_valid_assignment(container, &item, 0.0)
                    .map(|assignment| (index, assignment))
            });

        match found {
            Some((index, assignment)) => {
                item.place_at(assignment.position, assignment.rotated);
                solution.add_item(index, item);
                Ok(index)
            }
            None => Err(item),
        }
    }

    pub(crate) fn open_at_origin(&self, solution: &mut Solution, mut item: Item) -> usize {
        item.place_at(Position::default(), false);
        solution.open_container(self.container_size, item)
    }
}
