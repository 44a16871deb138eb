use std::sync::{Arc, Mutex};

use dispatch_optimizer::{
    problem::generator::{InstanceGenerator, InstanceGeneratorConfig},
    solver::{
        ride_order::RideOrder,
        search::RandomizedSearch,
        search_params::{SearchParams, Threads},
        vehicle_order::VehicleOrder,
    },
};

use crate::setup;

#[test]
fn test_example_search() {
    let problem = Arc::new(setup::load_example());
    let mut search = RandomizedSearch::new(
        Arc::clone(&problem),
        SearchParams {
            seed: Some(30),
            ..SearchParams::default()
        },
    )
    .unwrap();

    let outcome = search.run();

    setup::assert_feasible(&problem, &outcome.best);
    // Rides 1 and 2 start away from the depot at time 0, so at most one bonus is reachable.
    assert!(outcome.best.score().total() <= 10);
    assert!(outcome.best.score().total() > 0);
    assert_eq!(outcome.statistics.rounds().len(), 30);
}

#[test]
fn test_best_solutions_strictly_improve() {
    let problem = Arc::new(
        InstanceGenerator::new(InstanceGeneratorConfig {
            rides: 300,
            fleet_size: 12,
            seed: 5,
            ..InstanceGeneratorConfig::default()
        })
        .generate(),
    );
    let mut search = RandomizedSearch::new(
        Arc::clone(&problem),
        SearchParams {
            rounds: 40,
            seed: Some(99),
            threads: Threads::Auto,
            ..SearchParams::default()
        },
    )
    .unwrap();

    let best_scores = Arc::new(Mutex::new(Vec::new()));
    {
        let best_scores = Arc::clone(&best_scores);
        search.on_best_solution(move |solution| {
            best_scores.lock().unwrap().push(solution.score().total());
        });
    }

    let outcome = search.run();
    setup::assert_feasible(&problem, &outcome.best);

    let best_scores = best_scores.lock().unwrap();
    assert!(!best_scores.is_empty());
    assert!(best_scores.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(best_scores.last().copied(), Some(outcome.best.score().total()));
}

#[test]
fn test_restricted_pools() {
    let problem = Arc::new(InstanceGenerator::new(InstanceGeneratorConfig::default()).generate());
    let mut search = RandomizedSearch::new(
        Arc::clone(&problem),
        SearchParams {
            rounds: 10,
            best_factors: vec![20],
            vehicle_orders: vec![VehicleOrder::Farthest],
            ride_orders: vec![RideOrder::LongestFirst, RideOrder::LongestFirst],
            seed: Some(4),
            threads: Threads::Single,
        },
    )
    .unwrap();

    let outcome = search.run();

    assert!(outcome.statistics.rounds().iter().all(|round| {
        round.params.best_factor.get() == 20
            && round.params.vehicle_order == VehicleOrder::Farthest
            && round.params.ride_order == RideOrder::LongestFirst
    }));
    assert_eq!(
        search.ride_orders().weight(RideOrder::LongestFirst),
        2 + outcome.statistics.improvements() as u32
    );
}

#[test]
fn test_statistics_serialize() {
    let problem = Arc::new(setup::load_example());
    let mut search = RandomizedSearch::new(
        problem,
        SearchParams {
            rounds: 5,
            seed: Some(1),
            ..SearchParams::default()
        },
    )
    .unwrap();

    let outcome = search.run();
    let json = serde_json::to_value(&outcome.statistics).unwrap();

    assert_eq!(json["rounds"].as_array().map(Vec::len), Some(5));
    assert!(json["vehicle_orders"].is_object());
}
