use std::path::PathBuf;

use dispatch_optimizer::{
    parsers::{parser::DatasetParser, ride_file::RideFileParser},
    problem::{ride::RideIdx, ride_assignment_problem::RideAssignmentProblem},
    solver::{
        evaluation::{Evaluation, evaluate_solution},
        solution::Solution,
    },
};

pub mod mock_rng;

pub fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(format!("{name}.in"))
}

pub fn load_example() -> RideAssignmentProblem {
    RideFileParser
        .parse(data_file("a_example"))
        .unwrap_or_else(|error| panic!("could not load a_example: {error}"))
}

pub fn routes(routes: &[&[usize]]) -> Vec<Vec<RideIdx>> {
    routes
        .iter()
        .map(|route| route.iter().copied().map(RideIdx::new).collect())
        .collect()
}

pub fn assert_feasible(problem: &RideAssignmentProblem, solution: &Solution) -> Evaluation {
    let evaluation = evaluate_solution(problem, solution.routes())
        .unwrap_or_else(|error| panic!("infeasible solution: {error}"));

    assert_eq!(evaluation.score, solution.score());
    assert_eq!(evaluation.assigned_rides, solution.assigned_rides());

    evaluation
}
