use super::*;
use rand::Rng;
use std::cmp::Reverse;

/// Rebuilds the whole solution from a slightly perturbed item order.
///
/// All items are pulled out, sorted by the rule (descending, stable), one
/// random item from the first half swaps places with its successor, and the
/// solution is reconstructed with [`Problem::add_to_solution`]. The cost is
/// proportional to the item count however small the swap.
pub struct RuleBased<'a> {
    problem: &'a Problem,
    rule: Rule,
    rng: ChaCha20Rng,
}

impl<'a> RuleBased<'a> {
    pub fn new(problem: &'a Problem, rule: Rule, seed: Option<u64>) -> Self {
        Self {
            problem,
            rule,
            rng: seeded_rng(seed),
        }
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }
}

impl Neighborhood for RuleBased<'_> {
    fn generate_neighbor(&mut self, solution: &Solution) -> Solution {
        if solution.is_empty() {
            return solution.clone();
        }

        let mut items: Vec<Item> = solution.items().cloned().collect();
        if items.len() > 1 {
            sort_by_rule(&mut items, self.rule);
            // The first half is never empty and never holds the last item.
            let i = self.rng.gen_range(0..items.len() / 2);
            items.swap(i, i + 1);
        }

        let mut next = Solution::new();
        for mut item in items {
            item.unplace();
            self.problem.add_to_solution(&mut next, item);
        }
        next
    }
}

/// Stable descending sort by the rule's key.
pub fn sort_by_rule(items: &mut [Item], rule: Rule) {
    match rule {
        Rule::HeightFirst => items.sort_by_key(|item| Reverse(item.height)),
        Rule::WidthFirst => items.sort_by_key(|item| Reverse(item.width)),
        Rule::AreaFirst => items.sort_by_key(|item| Reverse(item.area())),
    }
}
