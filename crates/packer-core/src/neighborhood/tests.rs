use super::*;
use crate::solver::{Greedy, LocalSearch};

fn squares(count: usize, side: u32, container_size: u32) -> Problem {
    let items = (0..count).map(|i| Item::new(i, side, side)).collect();
    Problem::new(items, container_size).unwrap()
}

fn sorted_ids(solution: &Solution) -> Vec<ItemId> {
    let mut ids: Vec<ItemId> = solution.items().map(|item| item.id).collect();
    ids.sort();
    ids
}

#[test]
fn test_empty_solution_is_returned_unchanged() {
    let problem = squares(2, 5, 10);
    let empty = Solution::new();

    let mut geometry = GeometryBased::new(&problem, Some(1));
    let mut rule = RuleBased::new(&problem, Rule::HeightFirst, Some(1));
    let mut overlap = OverlapStrategy::new(&problem, 1.0, 0.05).unwrap();

    assert!(geometry.generate_neighbor(&empty).is_empty());
    assert!(rule.generate_neighbor(&empty).is_empty());
    assert!(overlap.generate_neighbor(&empty).is_empty());
    // The allowance still decays.
    assert_eq!(overlap.overlap_percentage(), 0.95);
}

#[test]
fn test_geometry_merges_trailing_containers() {
    let problem = squares(4, 10, 20);
    let mut solution = problem.one_item_per_container();
    let mut geometry = GeometryBased::new(&problem, Some(3));

    for expected in [3, 2, 1] {
        solution = geometry.generate_neighbor(&solution);
        assert_eq!(solution.num_containers(), expected);
        assert_eq!(solution.total_overlap_area(), 0);
    }
    assert_eq!(sorted_ids(&solution), sorted_ids(&problem.one_item_per_container()));
}

#[test]
fn test_geometry_leaves_unplaceable_items() {
    let problem = squares(2, 10, 10);
    let start = problem.one_item_per_container();
    let mut geometry = GeometryBased::new(&problem, Some(3));

    let next = geometry.generate_neighbor(&start);
    assert_eq!(next, start);
}

#[test]
fn test_geometry_is_reproducible_for_a_seed() {
    let items = (0..12)
        .map(|i| Item::new(i, 3 + (i as u32 % 4), 2 + (i as u32 % 3)))
        .collect();
    let problem = Problem::new(items, 10).unwrap();
    let start = problem.greedy_partitions(4);

    let a = GeometryBased::new(&problem, Some(42)).generate_neighbor(&start);
    let b = GeometryBased::new(&problem, Some(42)).generate_neighbor(&start);
    assert_eq!(a, b);
    assert_eq!(a.num_items(), 12);
    assert!(a.num_containers() <= start.num_containers());
}

#[test]
fn test_rule_swaps_neighbors_in_sorted_order() {
    let problem = Problem::new(vec![Item::new(0, 10, 6), Item::new(1, 10, 4)], 10).unwrap();
    let start = Greedy::solve(&problem, Solution::new, SortStrategy::LargestAreaFirst);
    let mut rule = RuleBased::new(&problem, Rule::HeightFirst, Some(9));

    // Two items: the only swap moves the shorter one to the front.
    let next = rule.generate_neighbor(&start);
    let placed: Vec<(ItemId, Option<Position>)> =
        next.items().map(|item| (item.id, item.position)).collect();
    assert_eq!(
        placed,
        vec![
            (ItemId(1), Some(Position { x: 0, y: 0 })),
            (ItemId(0), Some(Position { x: 0, y: 4 })),
        ]
    );
}

#[test]
fn test_rule_preserves_items() {
    let items = (0..10)
        .map(|i| Item::new(i, 2 + (i as u32 % 5), 1 + (i as u32 % 4)))
        .collect();
    let problem = Problem::new(items, 8).unwrap();
    let start = Greedy::solve(&problem, Solution::new, SortStrategy::LargestAreaFirst);
    let mut rule = RuleBased::new(&problem, Rule::AreaFirst, Some(5));

    let mut current = start.clone();
    for _ in 0..10 {
        current = rule.generate_neighbor(&current);
        assert_eq!(sorted_ids(&current), sorted_ids(&start));
        assert_eq!(current.total_overlap_area(), 0);
    }
}

#[test]
fn test_sort_by_rule_descending_and_stable() {
    let mut items = vec![
        Item::new(0, 2, 5),
        Item::new(1, 4, 5),
        Item::new(2, 9, 1),
        Item::new(3, 3, 7),
    ];

    sort_by_rule(&mut items, Rule::HeightFirst);
    let ids: Vec<usize> = items.iter().map(|item| item.id.0).collect();
    assert_eq!(ids, vec![3, 0, 1, 2]);

    sort_by_rule(&mut items, Rule::WidthFirst);
    let ids: Vec<usize> = items.iter().map(|item| item.id.0).collect();
    assert_eq!(ids, vec![2, 1, 3, 0]);

    sort_by_rule(&mut items, Rule::AreaFirst);
    let ids: Vec<usize> = items.iter().map(|item| item.id.0).collect();
    assert_eq!(ids, vec![3, 1, 0, 2]);
}

#[test]
fn test_overlap_decays_to_zero() {
    let problem = squares(3, 4, 10);
    let start = problem.stacked_in_one_container();
    let mut overlap = OverlapStrategy::new(&problem, 1.0, 0.05).unwrap();

    for _ in 0..20 {
        overlap.generate_neighbor(&start);
    }
    assert_eq!(overlap.overlap_percentage(), 0.0);

    overlap.generate_neighbor(&start);
    assert_eq!(overlap.overlap_percentage(), 0.0);
}

#[test]
fn test_full_allowance_moves_nothing() {
    let problem = squares(3, 4, 10);
    let start = problem.stacked_in_one_container();
    let mut overlap = OverlapStrategy::new(&problem, 1.0, 0.05).unwrap();

    assert_eq!(overlap.generate_neighbor(&start), start);
}

#[test]
fn test_zero_allowance_separates_stacked_items() {
    let problem = squares(4, 10, 20);
    let start = problem.stacked_in_one_container();
    let mut overlap = OverlapStrategy::new(&problem, 0.0, 0.05).unwrap();

    let next = overlap.generate_neighbor(&start);
    assert_eq!(next.num_containers(), 1);
    assert_eq!(next.total_overlap_area(), 0);
    assert_eq!(sorted_ids(&next), sorted_ids(&start));
    assert!((next.utilization() - 1.0).abs() < 1e-12);
}

#[test]
fn test_overlap_search_ends_without_overlap() {
    let items = (0..8)
        .map(|i| Item::new(i, 3 + (i as u32 % 3), 4))
        .collect();
    let problem = Problem::new(items, 10).unwrap();
    let start = problem.stacked_in_one_container();
    let mut overlap = OverlapStrategy::new(&problem, 1.0, 0.05).unwrap();

    // 21 steps bring the allowance to zero and apply it once.
    let mut current = start.clone();
    for _ in 0..21 {
        current = overlap.generate_neighbor(&current);
        assert_eq!(sorted_ids(&current), sorted_ids(&start));
    }
    assert_eq!(current.total_overlap_area(), 0);
    assert!(current.containers().iter().all(|c| !c.is_empty()));
}

#[test]
fn test_overlap_rejects_bad_parameters() {
    let problem = squares(1, 1, 1);
    assert!(OverlapStrategy::new(&problem, 1.5, 0.05).is_err());
    assert!(OverlapStrategy::new(&problem, -0.1, 0.05).is_err());
    assert!(OverlapStrategy::new(&problem, 0.5, -0.05).is_err());
    assert!(NeighborhoodKind::from_config(
        &problem,
        &NeighborhoodConfig::Overlap {
            initial_overlap: 2.0,
            decay_rate: 0.1
        },
        None
    )
    .is_err());
}

#[test]
fn test_local_search_with_geometry_never_worsens() {
    let items = (0..16)
        .map(|i| Item::new(i, 2 + (i as u32 % 4), 3 + (i as u32 % 2)))
        .collect();
    let problem = Problem::new(items, 10).unwrap();
    let start = problem.greedy_partitions(4);
    let weights = Weights::default();

    let mut neighborhood =
        NeighborhoodKind::from_config(&problem, &NeighborhoodConfig::Geometry, Some(2)).unwrap();
    let result = LocalSearch::new(21).solve(&problem, start.clone(), &mut neighborhood);

    assert!(result.evaluate(&weights) <= start.evaluate(&weights));
    assert_eq!(result.num_items(), 16);
    assert_eq!(result.total_overlap_area(), 0);
}
