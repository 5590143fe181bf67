use super::*;
use crate::solution::Container;
use crate::solver::Greedy;

impl Problem {
    /// Builds a start solution for an improvement search.
    pub fn seed_solution(&self, seed: Seed) -> Solution {
        match seed {
            Seed::OneItemPerContainer => self.one_item_per_container(),
            Seed::StackedInOneContainer => self.stacked_in_one_container(),
            Seed::GreedyPartitions { parts } => self.greedy_partitions(parts),
            Seed::Greedy { strategy } => Greedy::solve(self, Solution::new, strategy),
        }
    }

    /// Every item alone in its own container at the origin.
    pub fn one_item_per_container(&self) -> Solution {
        let mut solution = Solution::new();
        for item in &self.items {
            self.open_at_origin(&mut solution, item.clone());
        }
        solution
    }

    /// Every item at the origin of a single container, overlapping freely.
    pub fn stacked_in_one_container(&self) -> Solution {
        let mut container = Container::new(self.container_size);
        for item in &self.items {
            let mut item = item.clone();
            item.place_at(Position::default(), false);
            container.add_item(item);
        }

        let mut solution = Solution::new();
        solution.push_container(container);
        solution
    }

    /// Splits the backlog into `parts` consecutive chunks of near-equal size,
    /// packs each chunk on its own with largest-area-first greedy, and
    /// concatenates the resulting containers.
    ///
    /// Chunks never share a container, which leaves the geometry
    /// neighborhood room to merge them.
    pub fn greedy_partitions(&self, parts: usize) -> Solution {
        let mut solution = Solution::new();
        for chunk in split_even(&self.items, parts.max(1)) {
            let sub_problem = Problem {
                items: chunk.to_vec(),
                container_size: self.container_size,
            };
            let packed = Greedy::solve(&sub_problem, Solution::new, SortStrategy::LargestAreaFirst);
            for container in packed.containers() {
                solution.push_container(container.clone());
            }
        }
        solution
    }
}

/// Splits `items` into `parts` slices; the first `len % parts` slices get one extra item.
fn split_even(items: &[Item], parts: usize) -> Vec<&[Item]> {
    let base = items.len() / parts;
    let remainder = items.len() % parts;

    let mut chunks = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let end = start + base + usize::from(i < remainder);
        chunks.push(&items[start..end]);
        start = end;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_even_distributes_remainder_first() {
        let items: Vec<Item> = (0..10).map(|i| Item::new(i, 1, 1)).collect();
        let sizes: Vec<usize> = split_even(&items, 4).iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2]);
    }

    #[test]
    fn test_split_even_more_parts_than_items() {
        let items: Vec<Item> = (0..2).map(|i| Item::new(i, 1, 1)).collect();
        let sizes: Vec<usize> = split_even(&items, 4).iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![1, 1, 0, 0]);
    }
}
