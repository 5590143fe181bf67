//! Containers, solutions, and the objective function.

use crate::geometry::Rect;
use crate::problem::MAX_CONTAINER_SIZE;
use crate::types::{Item, ItemId, PackingError, Position, Result, Summary, Weights};
use serde::{Deserialize, Serialize};

/// A square container holding placed items.
///
/// Used area and pairwise overlap are maintained incrementally on every
/// insertion and removal so evaluating a solution never rescans item pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ContainerData")]
pub struct Container {
    side: u32,
    items: Vec<Item>,
    #[serde(skip)]
    used_area: u64,
    #[serde(skip)]
    overlap_area: u64,
}

#[derive(Deserialize)]
struct ContainerData {
    side: u32,
    items: Vec<Item>,
}

impl TryFrom<ContainerData> for Container {
    type Error = PackingError;

    /// Rebuilds a container from untrusted data: it must be non-empty and
    /// every item must be placed inside it.
    fn try_from(data: ContainerData) -> Result<Self> {
        if data.side == 0 || data.side > MAX_CONTAINER_SIZE {
            return Err(PackingError::InvalidInput(format!(
                "Container side must lie in 1..={}, got {}",
                MAX_CONTAINER_SIZE, data.side
            )));
        }
        if data.items.is_empty() {
            return Err(PackingError::InvalidInput(
                "Containers must hold at least one item".to_string(),
            ));
        }

        let mut container = Container::new(data.side);
        for item in data.items {
            let Some(Position { x, y }) = item.position else {
                return Err(PackingError::InvalidInput(format!(
                    "Item {} has no position",
                    item.id
                )));
            };
            let inside = item.width > 0
                && item.height > 0
                && x.checked_add(item.width).is_some_and(|right| right <= data.side)
                && y.checked_add(item.height).is_some_and(|bottom| bottom <= data.side);
            if !inside {
                return Err(PackingError::InvalidInput(format!(
                    "Item {} ({}x{} at {},{}) lies outside a container of side {}",
                    item.id, item.width, item.height, x, y, data.side
                )));
            }
            container.add_item(item);
        }
        Ok(container)
    }
}

impl Container {
    pub fn new(side: u32) -> Self {
        Self {
            side,
            items: Vec::new(),
            used_area: 0,
            overlap_area: 0,
        }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn area(&self) -> u64 {
        u64::from(self.side) * u64::from(self.side)
    }

    pub fn used_area(&self) -> u64 {
        self.used_area
    }

    /// Sum of intersection areas over every unordered pair of items.
    pub fn overlap_area(&self) -> u64 {
        self.overlap_area
    }

    pub fn utilization(&self) -> f64 {
        self.used_area as f64 / self.area() as f64
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Appends an already positioned item. No feasibility check is made.
    pub fn add_item(&mut self, item: Item) {
        debug_assert!(item.position.is_some(), "item {} has no position", item.id);
        let rect = Rect::of_item(&item);
        self.overlap_area += self.overlap_with(&rect, None);
        self.used_area += item.area();
        self.items.push(item);
    }

    /// Removes an item by identity, keeping the order of the remaining items.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let item = self.items.remove(index);
        let rect = Rect::of_item(&item);
        self.overlap_area -= self.overlap_with(&rect, None);
        self.used_area -= item.area();
        Some(item)
    }

    /// Total area `rect` shares with the items in this container, skipping `except`.
    pub fn overlap_with(&self, rect: &Rect, except: Option<ItemId>) -> u64 {
        self.items
            .iter()
            .filter(|other| Some(other.id) != except)
            .map(|other| rect.intersection_area(&Rect::of_item(other)))
            .sum()
    }

    /// Largest overlap ratio between the item at `index` and any container-mate.
    pub fn worst_overlap_ratio(&self, index: usize) -> f64 {
        let item = &self.items[index];
        let rect = Rect::of_item(item);
        self.items
            .iter()
            .filter(|other| other.id != item.id)
            .map(|other| rect.overlap_ratio(&Rect::of_item(other)))
            .fold(0.0, f64::max)
    }

    /// Recomputes the pairwise overlap from scratch.
    pub fn pairwise_overlap(&self) -> u64 {
        let mut total = 0;
        for (i, a) in self.items.iter().enumerate() {
            let ra = Rect::of_item(a);
            for b in &self.items[i + 1..] {
                total += ra.intersection_area(&Rect::of_item(b));
            }
        }
        total
    }
}

/// An ordered collection of non-empty containers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    containers: Vec<Container>,
}

impl Solution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn num_containers(&self) -> usize {
        self.containers.len()
    }

    pub fn num_items(&self) -> usize {
        self.containers.iter().map(Container::len).sum()
    }

    /// Appends a container. Empty containers are not retained.
    pub fn push_container(&mut self, container: Container) {
        if !container.is_empty() {
            self.containers.push(container);
        }
    }

    /// Opens a new container holding `item` and returns its index.
    pub fn open_container(&mut self, side: u32, item: Item) -> usize {
        let mut container = Container::new(side);
        container.add_item(item);
        self.containers.push(container);
        self.containers.len() - 1
    }

    pub fn add_item(&mut self, container: usize, item: Item) {
        self.containers[container].add_item(item);
    }

    /// Removes an item from a container without pruning.
    pub fn remove_item(&mut self, container: usize, id: ItemId) -> Option<Item> {
        self.containers.get_mut(container)?.remove_item(id)
    }

    /// Drops the container at `index` when it holds no items. Returns whether it was dropped.
    pub fn prune_if_empty(&mut self, index: usize) -> bool {
        if self.containers.get(index).is_some_and(Container::is_empty) {
            self.containers.remove(index);
            true
        } else {
            false
        }
    }

    /// Moves an item from one container to another at a new position.
    ///
    /// The item leaves `from` and enters `to` in one step, with its geometry
    /// updated on the way; `from` is pruned if it ends up empty.
    pub fn relocate(
        &mut self,
        from: usize,
        to: usize,
        id: ItemId,
        position: Position,
        rotate: bool,
    ) -> bool {
        if to >= self.containers.len() {
            return false;
        }
        let Some(mut item) = self.remove_item(from, id) else {
            return false;
        };
        item.place_at(position, rotate);
        self.containers[to].add_item(item);
        self.prune_if_empty(from);
        true
    }

    /// Removes every item from every container, in container order.
    pub fn drain_items(&mut self) -> Vec<Item> {
        self.containers
            .drain(..)
            .flat_map(|container| container.items)
            .collect()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.containers.iter().flat_map(|c| c.items.iter())
    }

    pub fn total_container_area(&self) -> u64 {
        self.containers.iter().map(Container::area).sum()
    }

    pub fn total_used_area(&self) -> u64 {
        self.containers.iter().map(Container::used_area).sum()
    }

    pub fn total_overlap_area(&self) -> u64 {
        self.containers.iter().map(Container::overlap_area).sum()
    }

    /// Fraction of container area covered by items. An empty solution counts as fully used.
    pub fn utilization(&self) -> f64 {
        let total = self.total_container_area();
        if total == 0 {
            1.0
        } else {
            self.total_used_area() as f64 / total as f64
        }
    }

    /// Composite cost, lower is better.
    ///
    /// `boxes * n + utilization * (1 - used/total) + waste * (total - used) + overlap * pairwise_overlap`
    pub fn evaluate(&self, weights: &Weights) -> f64 {
        let total = self.total_container_area() as f64;
        let used = self.total_used_area() as f64;

        weights.boxes * self.containers.len() as f64
            + weights.utilization * (1.0 - self.utilization())
            + weights.waste * (total - used)
            + weights.overlap * self.total_overlap_area() as f64
    }

    pub fn summary(&self, weights: &Weights) -> Summary {
        let total_area = self.total_container_area();
        let used_area = self.total_used_area();
        // Overlapping items can cover more than the container area.
        let waste_area = total_area.saturating_sub(used_area);
        let waste_percentage = if total_area > 0 {
            (waste_area as f64 / total_area as f64) * 100.0
        } else {
            0.0
        };

        Summary {
            total_containers: self.containers.len(),
            total_items: self.num_items(),
            total_area,
            used_area,
            waste_area,
            waste_percentage,
            overlap_area: self.total_overlap_area(),
            score: self.evaluate(weights),
        }
    }
}
