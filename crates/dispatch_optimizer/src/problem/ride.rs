use serde::Serialize;

use crate::define_index_newtype;

use super::position::{Distance, Position, Time};

define_index_newtype!(RideIdx, Ride);

/// A ride as it is listed in the input, before any derived value is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RideRequest {
    pub start: Position,
    pub end: Position,
    pub earliest_start: Time,
    pub latest_finish: Time,
}

impl RideRequest {
    pub fn new(start: Position, end: Position, earliest_start: Time, latest_finish: Time) -> Self {
        RideRequest {
            start,
            end,
            earliest_start,
            latest_finish,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ride {
    index: RideIdx,
    start: Position,
    end: Position,
    earliest_start: Time,
    latest_finish: Time,
    distance: Distance,
    /// Latest departure from `start` that still reaches `end` by `latest_finish`.
    /// Can be negative, or earlier than `earliest_start`, for rides that can never be served.
    latest_start: Time,
}

impl Ride {
    pub fn from_request(index: RideIdx, request: &RideRequest) -> Self {
        let distance = request.start.manhattan_distance(&request.end);

        Ride {
            index,
            start: request.start,
            end: request.end,
            earliest_start: request.earliest_start,
            latest_finish: request.latest_finish,
            distance,
            // A deadline too far in the past to subtract from can never be met.
            latest_start: request
                .latest_finish
                .checked_sub(distance)
                .unwrap_or(Time::MIN),
        }
    }

    pub fn index(&self) -> RideIdx {
        self.index
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn earliest_start(&self) -> Time {
        self.earliest_start
    }

    pub fn latest_finish(&self) -> Time {
        self.latest_finish
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn latest_start(&self) -> Time {
        self.latest_start
    }

    /// Whether a vehicle reaching the start at `arrival` can still finish in time.
    /// A ride whose window is shorter than its distance accepts no arrival at all.
    #[inline]
    pub fn accepts_arrival(&self, arrival: Time) -> bool {
        arrival <= self.latest_start && self.is_servable()
    }

    /// Whether a vehicle reaching the start at `arrival` earns the early start bonus.
    #[inline]
    pub fn awards_bonus(&self, arrival: Time) -> bool {
        arrival <= self.earliest_start
    }

    /// Whether any vehicle could ever serve this ride, even one waiting at the start.
    #[inline]
    pub fn is_servable(&self) -> bool {
        self.latest_start >= self.earliest_start.max(0)
    }

    pub fn to_request(&self) -> RideRequest {
        RideRequest::new(self.start, self.end, self.earliest_start, self.latest_finish)
    }
}
