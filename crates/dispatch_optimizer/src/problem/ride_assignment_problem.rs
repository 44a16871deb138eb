use crate::utils::enumerate_idx::EnumerateIdx;

use super::{
    position::{Distance, Time},
    ride::{Ride, RideIdx, RideRequest},
};

/// Header parameters and the ride catalog of one problem instance.
///
/// Rides are kept in input order, so `rides()[i].index() == i` always holds and the
/// index can be written out as is, whatever order the solver visits the rides in.
#[derive(Debug, Clone)]
pub struct RideAssignmentProblem {
    rows: i64,
    cols: i64,
    fleet_size: usize,
    bonus: i64,
    steps: Time,
    rides: Vec<Ride>,
}

impl RideAssignmentProblem {
    pub fn rows(&self) -> i64 {
        self.rows
    }

    pub fn cols(&self) -> i64 {
        self.cols
    }

    pub fn fleet_size(&self) -> usize {
        self.fleet_size
    }

    pub fn bonus(&self) -> i64 {
        self.bonus
    }

    /// Simulation horizon from the header. Informational, the solver does not use it.
    pub fn steps(&self) -> Time {
        self.steps
    }

    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    pub fn ride(&self, index: RideIdx) -> &Ride {
        &self.rides[index]
    }

    pub fn ride_count(&self) -> usize {
        self.rides.len()
    }

    pub fn servable_rides(&self) -> impl Iterator<Item = &Ride> {
        self.rides.iter().filter(|ride| ride.is_servable())
    }

    /// Score obtained if every servable ride was assigned with its bonus.
    pub fn score_upper_bound(&self) -> i64 {
        self.servable_rides()
            .map(|ride| ride.distance() + self.bonus)
            .sum()
    }

    pub fn total_ride_distance(&self) -> Distance {
        self.rides.iter().map(Ride::distance).sum()
    }
}

#[derive(Default)]
pub struct RideAssignmentProblemBuilder {
    rows: i64,
    cols: i64,
    fleet_size: usize,
    bonus: i64,
    steps: Time,
    ride_requests: Vec<RideRequest>,
}

impl RideAssignmentProblemBuilder {
    pub fn set_grid(&mut self, rows: i64, cols: i64) -> &mut RideAssignmentProblemBuilder {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn set_fleet_size(&mut self, fleet_size: usize) -> &mut RideAssignmentProblemBuilder {
        self.fleet_size = fleet_size;
        self
    }

    pub fn set_bonus(&mut self, bonus: i64) -> &mut RideAssignmentProblemBuilder {
        self.bonus = bonus;
        self
    }

    pub fn set_steps(&mut self, steps: Time) -> &mut RideAssignmentProblemBuilder {
        self.steps = steps;
        self
    }

    pub fn set_ride_requests(
        &mut self,
        ride_requests: Vec<RideRequest>,
    ) -> &mut RideAssignmentProblemBuilder {
        self.ride_requests = ride_requests;
        self
    }

    pub fn add_ride_request(&mut self, request: RideRequest) -> &mut RideAssignmentProblemBuilder {
        self.ride_requests.push(request);
        self
    }

    pub fn build(self) -> RideAssignmentProblem {
        let rides = self
            .ride_requests
            .iter()
            .enumerate_idx::<RideIdx>()
            .map(|(index, request)| Ride::from_request(index, request))
            .collect();

        RideAssignmentProblem {
            rows: self.rows,
            cols: self.cols,
            fleet_size: self.fleet_size,
            bonus: self.bonus,
            steps: self.steps,
            rides,
        }
    }
}
