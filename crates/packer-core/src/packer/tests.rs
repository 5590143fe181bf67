use super::*;

fn square_request(count: u32, side: u32, container_size: u32, algorithm: AlgorithmConfig) -> PackingRequest {
    PackingRequest {
        container_size,
        items: vec![ItemSpec {
            width: side,
            height: side,
            quantity: count,
            color: None,
        }],
        algorithm,
        weights: Weights::default(),
    }
}

fn mixed_items() -> Vec<ItemSpec> {
    vec![
        ItemSpec {
            width: 6,
            height: 4,
            quantity: 5,
            color: Some("#1976D2".to_string()),
        },
        ItemSpec {
            width: 3,
            height: 3,
            quantity: 6,
            color: None,
        },
        ItemSpec {
            width: 9,
            height: 2,
            quantity: 2,
            color: None,
        },
    ]
}

#[test]
fn test_simple_packing() {
    let request = square_request(4, 10, 20, AlgorithmConfig::default());

    let packer = Packer::new(request).unwrap();
    let result = packer.pack().unwrap();

    assert_eq!(result.algorithm, "greedy");
    assert_eq!(result.summary.total_containers, 1);
    assert_eq!(result.summary.total_items, 4);
    assert_eq!(result.summary.waste_area, 0);
    assert_eq!(result.summary.waste_percentage, 0.0);
    assert_eq!(result.summary.overlap_area, 0);
    assert_eq!(result.solution.num_containers(), result.summary.total_containers);
    assert_eq!(result.stats.stop_reason, StopReason::Completed);
}

#[test]
fn test_request_from_json_uses_defaults() {
    let json = r#"{
        "container_size": 20,
        "items": [{ "width": 10, "height": 10, "quantity": 4 }]
    }"#;
    let request: PackingRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.algorithm, AlgorithmConfig::default());
    assert_eq!(request.weights, Weights::default());

    let result = Packer::new(request).unwrap().pack().unwrap();
    assert_eq!(result.summary.total_containers, 1);
}

#[test]
fn test_algorithm_config_from_json() {
    let json = r#"{ "type": "simulated_annealing", "neighborhood": { "kind": "overlap" }, "seed": 4 }"#;
    let config: AlgorithmConfig = serde_json::from_str(json).unwrap();

    match config {
        AlgorithmConfig::SimulatedAnnealing {
            initial_temperature,
            end_temperature,
            cooling_rate,
            iterations_per_temperature,
            max_time_secs,
            neighborhood,
            seed_solution,
            seed,
        } => {
            assert_eq!(initial_temperature, 1000.0);
            assert_eq!(end_temperature, 25.0);
            assert_eq!(cooling_rate, 0.95);
            assert_eq!(iterations_per_temperature, 10);
            assert_eq!(max_time_secs, 10.0);
            assert_eq!(
                neighborhood,
                NeighborhoodConfig::Overlap {
                    initial_overlap: 1.0,
                    decay_rate: 0.05
                }
            );
            assert_eq!(seed_solution, None);
            assert_eq!(seed, Some(4));
        }
        other => panic!("unexpected config {:?}", other),
    }

    let json = r#"{ "type": "local_search" }"#;
    let config: AlgorithmConfig = serde_json::from_str(json).unwrap();
    assert_eq!(
        config,
        AlgorithmConfig::LocalSearch {
            max_iterations: 21,
            neighborhood: NeighborhoodConfig::Geometry,
            seed_solution: None,
            seed: None,
        }
    );
}

#[test]
fn test_every_algorithm_places_every_item() {
    let neighborhoods = [
        NeighborhoodConfig::Geometry,
        NeighborhoodConfig::Rule {
            rule: Rule::HeightFirst,
        },
        NeighborhoodConfig::Overlap {
            initial_overlap: 1.0,
            decay_rate: 0.05,
        },
    ];

    let mut algorithms = vec![
        AlgorithmConfig::Greedy {
            strategy: SortStrategy::SmallestAspectRatioFirst,
        },
        AlgorithmConfig::Backtracking {
            container_limit: None,
        },
    ];
    for neighborhood in neighborhoods {
        algorithms.push(AlgorithmConfig::LocalSearch {
            max_iterations: 21,
            neighborhood,
            seed_solution: None,
            seed: Some(17),
        });
        algorithms.push(AlgorithmConfig::SimulatedAnnealing {
            initial_temperature: 100.0,
            end_temperature: 10.0,
            cooling_rate: 0.8,
            iterations_per_temperature: 5,
            max_time_secs: 5.0,
            neighborhood,
            seed_solution: None,
            seed: Some(17),
        });
    }

    for algorithm in algorithms {
        let name = algorithm.name();
        let request = PackingRequest {
            container_size: 12,
            items: mixed_items(),
            algorithm,
            weights: Weights::default(),
        };
        let packer = Packer::new(request).unwrap();
        let result = packer.pack().unwrap();

        assert_eq!(result.algorithm, name);
        assert_eq!(result.stats.algorithm, name);
        assert_eq!(result.summary.total_items, 13, "{}", name);
        for container in result.solution.containers() {
            assert!(!container.is_empty());
            for item in container.items() {
                let position = item.position.unwrap();
                assert!(position.x + item.width <= 12);
                assert!(position.y + item.height <= 12);
            }
        }
    }
}

#[test]
fn test_search_starts_from_requested_seed() {
    let request = square_request(
        4,
        10,
        20,
        AlgorithmConfig::LocalSearch {
            max_iterations: 0,
            neighborhood: NeighborhoodConfig::Geometry,
            seed_solution: Some(Seed::OneItemPerContainer),
            seed: Some(1),
        },
    );

    let result = Packer::new(request).unwrap().pack().unwrap();
    assert_eq!(result.summary.total_containers, 4);
}

#[test]
fn test_backtracking_reports_unplaced_item() {
    let request = square_request(
        5,
        10,
        20,
        AlgorithmConfig::Backtracking {
            container_limit: Some(1),
        },
    );

    let err = Packer::new(request).unwrap().pack().unwrap_err();
    assert!(matches!(err, PackingError::NoFeasiblePlacement(ItemId(4))));
}

#[test]
fn test_observer_receives_progress() {
    let request = square_request(3, 5, 10, AlgorithmConfig::default());
    let mut recorder = InterimRecorder::new();

    let result = Packer::new(request)
        .unwrap()
        .pack_observed(&mut recorder)
        .unwrap();

    assert_eq!(recorder.snapshots().len(), 3);
    assert_eq!(recorder.stats(), Some(&result.stats));
}

#[test]
fn test_result_round_trips_through_json() {
    let request = PackingRequest {
        container_size: 12,
        items: mixed_items(),
        algorithm: AlgorithmConfig::default(),
        weights: Weights::default(),
    };
    let result = Packer::new(request).unwrap().pack().unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let parsed: PackingResult = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.solution, result.solution);
    assert_eq!(parsed.summary, result.summary);
}

#[test]
fn test_rejects_invalid_requests() {
    let mut empty = square_request(1, 5, 10, AlgorithmConfig::default());
    empty.items.clear();
    assert!(matches!(Packer::new(empty), Err(PackingError::InvalidInput(_))));

    let zero_quantity = square_request(0, 5, 10, AlgorithmConfig::default());
    assert!(matches!(
        Packer::new(zero_quantity),
        Err(PackingError::InvalidInput(_))
    ));

    let oversized = square_request(1, 30, 20, AlgorithmConfig::default());
    assert!(matches!(
        Packer::new(oversized),
        Err(PackingError::InfeasibleItem { .. })
    ));

    let mut negative = square_request(1, 5, 10, AlgorithmConfig::default());
    negative.weights.waste = -1.0;
    assert!(matches!(
        Packer::new(negative),
        Err(PackingError::InvalidWeights(_))
    ));

    let inverted = square_request(
        1,
        5,
        10,
        AlgorithmConfig::SimulatedAnnealing {
            initial_temperature: 10.0,
            end_temperature: 20.0,
            cooling_rate: 0.9,
            iterations_per_temperature: 10,
            max_time_secs: 1.0,
            neighborhood: NeighborhoodConfig::Geometry,
            seed_solution: None,
            seed: None,
        },
    );
    assert!(matches!(
        Packer::new(inverted),
        Err(PackingError::InvalidTemperatureRange(_))
    ));

    let negative_budget = square_request(
        1,
        5,
        10,
        AlgorithmConfig::SimulatedAnnealing {
            initial_temperature: 100.0,
            end_temperature: 20.0,
            cooling_rate: 0.9,
            iterations_per_temperature: 10,
            max_time_secs: -1.0,
            neighborhood: NeighborhoodConfig::Geometry,
            seed_solution: None,
            seed: None,
        },
    );
    assert!(matches!(
        Packer::new(negative_budget),
        Err(PackingError::InvalidInput(_))
    ));

    let huge_budget = square_request(
        1,
        5,
        10,
        AlgorithmConfig::SimulatedAnnealing {
            initial_temperature: 100.0,
            end_temperature: 20.0,
            cooling_rate: 0.9,
            iterations_per_temperature: 10,
            max_time_secs: 1e30,
            neighborhood: NeighborhoodConfig::Geometry,
            seed_solution: None,
            seed: None,
        },
    );
    assert!(matches!(
        Packer::new(huge_budget),
        Err(PackingError::InvalidInput(_))
    ));

    let huge_container = square_request(1, 5, 100_000, AlgorithmConfig::default());
    assert!(matches!(
        Packer::new(huge_container),
        Err(PackingError::InvalidInput(_))
    ));

    let bad_overlap = square_request(
        1,
        5,
        10,
        AlgorithmConfig::LocalSearch {
            max_iterations: 5,
            neighborhood: NeighborhoodConfig::Overlap {
                initial_overlap: 1.5,
                decay_rate: 0.05,
            },
            seed_solution: None,
            seed: None,
        },
    );
    assert!(matches!(
        Packer::new(bad_overlap),
        Err(PackingError::InvalidInput(_))
    ));
}
