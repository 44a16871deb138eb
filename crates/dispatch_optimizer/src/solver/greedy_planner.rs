use std::num::NonZeroUsize;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    problem::{ride::Ride, ride_assignment_problem::RideAssignmentProblem},
    utils::enumerate_idx::EnumerateIdx,
};

use super::{
    ride_order::RideOrder,
    score::Score,
    solution::Solution,
    vehicle_order::{VehicleCandidate, VehicleOrder},
    vehicle_state::{VehicleIdx, VehicleState},
};

/// The three knobs of one greedy planning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlanParams {
    /// The planner picks among the first `count / best_factor` ranked vehicles.
    pub best_factor: NonZeroUsize,
    pub vehicle_order: VehicleOrder,
    pub ride_order: RideOrder,
}

impl PlanParams {
    pub fn new(
        best_factor: NonZeroUsize,
        vehicle_order: VehicleOrder,
        ride_order: RideOrder,
    ) -> Self {
        PlanParams {
            best_factor,
            vehicle_order,
            ride_order,
        }
    }
}

impl std::fmt::Display for PlanParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "best factor {}, vehicles by {}, rides by {}",
            self.best_factor, self.vehicle_order, self.ride_order
        )
    }
}

/// Builds one solution by handing every ride, in ride order, to one of the best ranked
/// vehicles that can still serve it. Vehicles reaching the start in time for the bonus
/// are always preferred over the others.
pub struct GreedyPlanner<'a> {
    problem: &'a RideAssignmentProblem,
}

impl<'a> GreedyPlanner<'a> {
    pub fn new(problem: &'a RideAssignmentProblem) -> Self {
        GreedyPlanner { problem }
    }

    pub fn plan<R>(&self, params: &PlanParams, rng: &mut R) -> Solution
    where
        R: Rng,
    {
        let mut vehicles: Vec<VehicleState> = (0..self.problem.fleet_size())
            .map(|_| VehicleState::new())
            .collect();

        let mut rides: Vec<&Ride> = self.problem.rides().iter().collect();
        params.ride_order.sort(&mut rides);

        let mut candidates: Vec<VehicleCandidate> = Vec::with_capacity(vehicles.len());
        let mut score = Score::ZERO;
        let mut assigned_rides = 0;

        for ride in rides {
            candidates.clear();
            candidates.extend(
                vehicles
                    .iter()
                    .enumerate_idx::<VehicleIdx>()
                    .filter_map(|(vehicle, state)| {
                        let travel = state.travel_distance_to(ride);
                        let arrival = state.available_time().checked_add(travel)?;

                        ride.accepts_arrival(arrival).then_some(VehicleCandidate {
                            vehicle,
                            travel,
                            arrival,
                            ride_count: state.ride_count(),
                            available_time: state.available_time(),
                        })
                    }),
            );

            if candidates.is_empty() {
                trace!("Ride {} left unassigned", ride.index());
                continue;
            }

            params.vehicle_order.sort(&mut candidates);

            let bonus_count = candidates
                .iter()
                .filter(|candidate| ride.awards_bonus(candidate.arrival))
                .count();

            let (chosen, bonus) = if bonus_count > 0 {
                let pick = pick_top_k(bonus_count, params.best_factor, rng);
                let chosen = candidates
                    .iter()
                    .filter(|candidate| ride.awards_bonus(candidate.arrival))
                    .nth(pick);

                (chosen.copied(), self.problem.bonus())
            } else {
                let pick = pick_top_k(candidates.len(), params.best_factor, rng);

                (candidates.get(pick).copied(), 0)
            };

            let Some(chosen) = chosen else {
                continue;
            };

            vehicles[chosen.vehicle].assign(ride, chosen.travel);
            score += Score::new(ride.distance(), bonus);
            assigned_rides += 1;
        }

        debug!(
            "Assigned {}/{} rides with {}: score {}",
            assigned_rides,
            self.problem.ride_count(),
            params,
            score
        );

        let routes = vehicles.into_iter().map(VehicleState::into_rides).collect();

        Solution::new(routes, score, assigned_rides, *params)
    }
}

/// Position of the pick among `count` ranked candidates: uniform over the first
/// `count / best_factor`, or the very first one when that bound is zero.
#[inline]
pub fn pick_top_k<R>(count: usize, best_factor: NonZeroUsize, rng: &mut R) -> usize
where
    R: Rng,
{
    let bound = count / best_factor.get();
    if bound == 0 {
        0
    } else {
        rng.random_range(0..bound)
    }
}
