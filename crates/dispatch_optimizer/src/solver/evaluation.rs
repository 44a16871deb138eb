use fixedbitset::FixedBitSet;
use serde::Serialize;

use crate::problem::{
    position::{Position, Time},
    ride::RideIdx,
    ride_assignment_problem::RideAssignmentProblem,
};

use super::{error::ScheduleError, score::Score};

/// One ride served by a vehicle, as replayed by [`evaluate_solution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub ride: RideIdx,
    pub arrival: Time,
    pub departure: Time,
    pub finish: Time,
    pub bonus: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub score: Score,
    pub assigned_rides: usize,
    pub bonus_rides: usize,
    pub schedules: Vec<Vec<Visit>>,
}

/// Replays `routes` from scratch and scores them, independently of how they were built.
///
/// Every vehicle starts at the origin at time 0 and serves its rides in the given
/// order, waiting at the start of a ride until its earliest start if needed.
pub fn evaluate_solution(
    problem: &RideAssignmentProblem,
    routes: &[Vec<RideIdx>],
) -> Result<Evaluation, ScheduleError> {
    if routes.len() != problem.fleet_size() {
        return Err(ScheduleError::VehicleCount {
            expected: problem.fleet_size(),
            found: routes.len(),
        });
    }

    let mut seen = FixedBitSet::with_capacity(problem.ride_count());
    let mut score = Score::ZERO;
    let mut bonus_rides = 0;
    let mut schedules = Vec::with_capacity(routes.len());

    for (vehicle, route) in routes.iter().enumerate() {
        let mut time: Time = 0;
        let mut position = Position::ORIGIN;
        let mut schedule = Vec::with_capacity(route.len());

        for &ride_id in route {
            if ride_id.get() >= problem.ride_count() {
                return Err(ScheduleError::UnknownRide {
                    vehicle,
                    ride: ride_id.get(),
                });
            }

            if seen.put(ride_id.get()) {
                return Err(ScheduleError::DuplicateRide {
                    ride: ride_id.get(),
                });
            }

            let ride = problem.ride(ride_id);
            if !ride.is_servable() {
                return Err(ScheduleError::UnservableRide {
                    vehicle,
                    ride: ride_id.get(),
                });
            }

            let arrival = time
                .checked_add(position.manhattan_distance(&ride.start()))
                .filter(|&arrival| ride.accepts_arrival(arrival))
                .ok_or_else(|| ScheduleError::LateArrival {
                    vehicle,
                    ride: ride_id.get(),
                    arrival: time.saturating_add(position.manhattan_distance(&ride.start())),
                    latest_start: ride.latest_start(),
                })?;

            let bonus = ride.awards_bonus(arrival);
            let departure = arrival.max(ride.earliest_start());
            let finish = departure + ride.distance();

            score += Score::new(ride.distance(), if bonus { problem.bonus() } else { 0 });
            if bonus {
                bonus_rides += 1;
            }

            schedule.push(Visit {
                ride: ride_id,
                arrival,
                departure,
                finish,
                bonus,
            });

            time = finish;
            position = ride.end();
        }

        schedules.push(schedule);
    }

    Ok(Evaluation {
        score,
        assigned_rides: seen.count_ones(..),
        bonus_rides,
        schedules,
    })
}
