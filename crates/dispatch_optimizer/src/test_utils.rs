use rand::RngCore;

use crate::{
    problem::{
        position::Time,
        ride::RideRequest,
        ride_assignment_problem::{RideAssignmentProblem, RideAssignmentProblemBuilder},
    },
    solver::{
        evaluation::{Evaluation, evaluate_solution},
        solution::Solution,
    },
};

pub type TestRide = ((i64, i64), (i64, i64), Time, Time);

pub fn create_problem(fleet_size: usize, bonus: i64, rides: &[TestRide]) -> RideAssignmentProblem {
    let mut builder = RideAssignmentProblemBuilder::default();
    builder
        .set_grid(100, 100)
        .set_fleet_size(fleet_size)
        .set_bonus(bonus)
        .set_steps(1_000)
        .set_ride_requests(
            rides
                .iter()
                .map(|&(start, end, earliest_start, latest_finish)| {
                    RideRequest::new(start.into(), end.into(), earliest_start, latest_finish)
                })
                .collect(),
        );

    builder.build()
}

/// Replays `solution` and checks it against everything the planner promises.
pub fn assert_valid_solution(problem: &RideAssignmentProblem, solution: &Solution) -> Evaluation {
    let evaluation = evaluate_solution(problem, solution.routes())
        .unwrap_or_else(|error| panic!("invalid solution: {error}"));

    assert_eq!(evaluation.score, solution.score());
    assert_eq!(evaluation.assigned_rides, solution.assigned_rides());

    for schedule in &evaluation.schedules {
        for visits in schedule.windows(2) {
            assert!(visits[0].finish <= visits[1].departure);
        }
        for visit in schedule {
            assert!(visit.arrival <= problem.ride(visit.ride).latest_start());
            assert!(visit.finish <= problem.ride(visit.ride).latest_finish());
        }
    }

    evaluation
}

/// Replays `data` forever, so every draw from `random_range` is predictable.
pub struct MockRng {
    data: Vec<u64>,
    index: usize,
}

impl MockRng {
    pub fn new(data: Vec<u64>) -> Self {
        MockRng { data, index: 0 }
    }
}

impl RngCore for MockRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.data[self.index % self.data.len()];
        self.index = (self.index + 1) % self.data.len();
        value
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for byte in dst.iter_mut() {
            *byte = 0;
        }
    }
}
