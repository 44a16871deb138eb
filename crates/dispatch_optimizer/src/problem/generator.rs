use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::{
    position::{Position, Time},
    ride::RideRequest,
    ride_assignment_problem::{RideAssignmentProblem, RideAssignmentProblemBuilder},
};

/// Configuration for synthetic instances. Windows are placed uniformly over `steps`
/// and are at least as long as the ride plus up to `max_window_slack` extra steps.
#[derive(Debug, Clone)]
pub struct InstanceGeneratorConfig {
    pub rows: i64,
    pub cols: i64,
    pub fleet_size: usize,
    pub rides: usize,
    pub bonus: i64,
    pub steps: Time,
    pub max_window_slack: Time,
    pub seed: u64,
}

impl Default for InstanceGeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            fleet_size: 10,
            rides: 200,
            bonus: 10,
            steps: 2_000,
            max_window_slack: 200,
            seed: 42,
        }
    }
}

pub struct InstanceGenerator {
    config: InstanceGeneratorConfig,
    rng: SmallRng,
}

impl InstanceGenerator {
    pub fn new(config: InstanceGeneratorConfig) -> Self {
        let rng = SmallRng::seed_from_u64(config.seed);
        InstanceGenerator { config, rng }
    }

    pub fn generate(mut self) -> RideAssignmentProblem {
        let requests = (0..self.config.rides)
            .map(|_| self.random_request())
            .collect::<Vec<_>>();

        let mut builder = RideAssignmentProblemBuilder::default();
        builder
            .set_grid(self.config.rows, self.config.cols)
            .set_fleet_size(self.config.fleet_size)
            .set_bonus(self.config.bonus)
            .set_steps(self.config.steps)
            .set_ride_requests(requests);

        builder.build()
    }

    fn random_position(&mut self) -> Position {
        Position::new(
            self.rng.random_range(0..self.config.rows.max(1)),
            self.rng.random_range(0..self.config.cols.max(1)),
        )
    }

    fn random_request(&mut self) -> RideRequest {
        let start = self.random_position();
        let end = self.random_position();
        let distance = start.manhattan_distance(&end);

        let earliest_start = self.rng.random_range(0..self.config.steps.max(1));
        let slack = self.rng.random_range(0..=self.config.max_window_slack.max(0));
        let latest_finish = (earliest_start + distance + slack).min(self.config.steps);

        RideRequest::new(start, end, earliest_start, latest_finish)
    }
}
