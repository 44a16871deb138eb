use crate::{
    define_index_newtype,
    problem::{
        position::{Distance, Position, Time},
        ride::{Ride, RideIdx},
    },
};

define_index_newtype!(VehicleIdx, VehicleState);

/// Where and when a vehicle becomes free during one planning pass, and what it was given so far.
#[derive(Debug, Clone, Default)]
pub struct VehicleState {
    available_time: Time,
    available_position: Position,
    rides: Vec<RideIdx>,
}

impl VehicleState {
    pub fn new() -> Self {
        VehicleState {
            available_time: 0,
            available_position: Position::ORIGIN,
            rides: Vec::new(),
        }
    }

    pub fn available_time(&self) -> Time {
        self.available_time
    }

    pub fn available_position(&self) -> Position {
        self.available_position
    }

    pub fn rides(&self) -> &[RideIdx] {
        &self.rides
    }

    pub fn ride_count(&self) -> usize {
        self.rides.len()
    }

    #[inline]
    pub fn travel_distance_to(&self, ride: &Ride) -> Distance {
        self.available_position.manhattan_distance(&ride.start())
    }

    /// Moves the vehicle to the end of `ride`. The vehicle waits at the start when it
    /// arrives before the earliest start.
    pub fn assign(&mut self, ride: &Ride, travel: Distance) {
        let departure = ride
            .earliest_start()
            .max(self.available_time + travel);

        self.rides.push(ride.index());
        self.available_position = ride.end();
        self.available_time = departure + ride.distance();
    }

    pub fn into_rides(self) -> Vec<RideIdx> {
        self.rides
    }
}
