use std::num::NonZeroUsize;

use dispatch_optimizer::{
    parsers::{ride_file, solution_file},
    problem::generator::{InstanceGenerator, InstanceGeneratorConfig},
    solver::{
        evaluation::evaluate_solution,
        greedy_planner::{GreedyPlanner, PlanParams},
        ride_order::RideOrder,
        score::Score,
        vehicle_order::VehicleOrder,
    },
};
use rand::{SeedableRng, rngs::SmallRng};

use crate::setup::{self, mock_rng::MockRng};

fn params(best_factor: usize, vehicle_order: VehicleOrder, ride_order: RideOrder) -> PlanParams {
    PlanParams::new(
        NonZeroUsize::new(best_factor).unwrap(),
        vehicle_order,
        ride_order,
    )
}

#[test]
fn test_example_first_ranked_vehicles() {
    let problem = setup::load_example();
    let planner = GreedyPlanner::new(&problem);

    // Rides 1 and 2 tie on earliest start and deadline and keep their input order.
    // Ride 1 goes to the first vehicle, which is then closest to ride 2.
    // Only the idle second vehicle reaches ride 0 in time, and early enough for the bonus.
    let solution = planner.plan(
        &params(50, VehicleOrder::Nearest, RideOrder::EarliestStart),
        &mut MockRng::zeros(),
    );

    assert_eq!(solution.routes(), setup::routes(&[&[1, 2], &[0]]));
    assert_eq!(solution.score(), Score::new(8, 2));
    setup::assert_feasible(&problem, &solution);
}

#[test]
fn test_example_every_parameter_triple() {
    let problem = setup::load_example();
    let planner = GreedyPlanner::new(&problem);
    let mut rng = SmallRng::seed_from_u64(8);

    for best_factor in [2, 4, 5, 20, 50] {
        for vehicle_order in VehicleOrder::ALL {
            for ride_order in RideOrder::ALL {
                let solution =
                    planner.plan(&params(best_factor, vehicle_order, ride_order), &mut rng);

                let evaluation = setup::assert_feasible(&problem, &solution);
                assert!(evaluation.score.total() <= problem.score_upper_bound());
            }
        }
    }
}

#[test]
fn test_written_solution_replays_to_same_score() {
    let problem = InstanceGenerator::new(InstanceGeneratorConfig {
        seed: 2018,
        ..InstanceGeneratorConfig::default()
    })
    .generate();
    let planner = GreedyPlanner::new(&problem);
    let mut rng = SmallRng::seed_from_u64(2018);

    let solution = planner.plan(
        &params(4, VehicleOrder::FewestRidesThenNearest, RideOrder::LatestStartThenLongest),
        &mut rng,
    );

    let written = solution_file::format_solution(solution.routes());
    assert_eq!(written.lines().count(), problem.fleet_size());

    let routes = solution_file::parse_solution(&written).unwrap();
    let evaluation = evaluate_solution(&problem, &routes).unwrap();

    assert_eq!(routes, solution.routes());
    assert_eq!(evaluation.score, solution.score());
    assert_eq!(evaluation.assigned_rides, solution.assigned_rides());
}

#[test]
fn test_reparsed_problem_plans_identically() {
    let problem = InstanceGenerator::new(InstanceGeneratorConfig::default()).generate();
    let reparsed = ride_file::parse(&ride_file::format_problem(&problem)).unwrap();
    let plan_params = params(5, VehicleOrder::EarliestAvailable, RideOrder::EarliestDeadline);

    let original = GreedyPlanner::new(&problem).plan(&plan_params, &mut SmallRng::seed_from_u64(1));
    let replayed =
        GreedyPlanner::new(&reparsed).plan(&plan_params, &mut SmallRng::seed_from_u64(1));

    assert_eq!(reparsed.rides(), problem.rides());
    assert_eq!(original.routes(), replayed.routes());
    assert_eq!(original.score(), replayed.score());
}
