use serde::Serialize;

use crate::problem::position::{Distance, Time};

use super::vehicle_state::VehicleIdx;

/// A vehicle that can still serve the ride being planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleCandidate {
    pub vehicle: VehicleIdx,
    pub travel: Distance,
    pub arrival: Time,
    pub ride_count: usize,
    pub available_time: Time,
}

/// Ranking of the vehicles able to serve a ride. The planner picks among the first
/// candidates of this ranking, so it decides between balancing load and driving less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VehicleOrder {
    FewestRidesThenNearest,
    MostRidesThenNearest,
    FewestRidesThenFarthest,
    Nearest,
    Farthest,
    EarliestAvailable,
    LatestAvailable,
}

impl VehicleOrder {
    pub const ALL: [VehicleOrder; 7] = [
        VehicleOrder::FewestRidesThenNearest,
        VehicleOrder::MostRidesThenNearest,
        VehicleOrder::FewestRidesThenFarthest,
        VehicleOrder::Nearest,
        VehicleOrder::Farthest,
        VehicleOrder::EarliestAvailable,
        VehicleOrder::LatestAvailable,
    ];

    /// Initial search pool. Most rides then nearest is listed twice and starts with
    /// twice the weight of the others.
    pub const DEFAULT_POOL: [VehicleOrder; 8] = [
        VehicleOrder::FewestRidesThenNearest,
        VehicleOrder::MostRidesThenNearest,
        VehicleOrder::FewestRidesThenFarthest,
        VehicleOrder::MostRidesThenNearest,
        VehicleOrder::Nearest,
        VehicleOrder::Farthest,
        VehicleOrder::EarliestAvailable,
        VehicleOrder::LatestAvailable,
    ];

    /// Ascending sort key, candidates with smaller keys rank first.
    #[inline]
    pub fn sort_key(&self, candidate: &VehicleCandidate) -> (i64, i64) {
        let rides = candidate.ride_count as i64;
        let travel = candidate.travel;

        match self {
            VehicleOrder::FewestRidesThenNearest => (rides, travel),
            VehicleOrder::MostRidesThenNearest => (-rides, travel),
            VehicleOrder::FewestRidesThenFarthest => (rides, -travel),
            VehicleOrder::Nearest => (travel, 0),
            VehicleOrder::Farthest => (-travel, 0),
            VehicleOrder::EarliestAvailable => (candidate.available_time, 0),
            VehicleOrder::LatestAvailable => (-candidate.available_time, 0),
        }
    }

    /// Stable sort, candidates with equal keys keep their fleet order.
    pub fn sort(&self, candidates: &mut [VehicleCandidate]) {
        candidates.sort_by_key(|candidate| self.sort_key(candidate));
    }
}

impl std::fmt::Display for VehicleOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VehicleOrder::FewestRidesThenNearest => "fewest rides, nearest",
            VehicleOrder::MostRidesThenNearest => "most rides, nearest",
            VehicleOrder::FewestRidesThenFarthest => "fewest rides, farthest",
            VehicleOrder::Nearest => "nearest",
            VehicleOrder::Farthest => "farthest",
            VehicleOrder::EarliestAvailable => "earliest available",
            VehicleOrder::LatestAvailable => "latest available",
        };

        f.write_str(name)
    }
}
