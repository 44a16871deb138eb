use serde::Serialize;

use crate::problem::ride::Ride;

/// Order in which rides get to pick a vehicle. Rides processed first have the whole
/// idle fleet to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RideOrder {
    /// `(earliest_start, latest_finish, -distance)`
    EarliestStart,
    /// `(latest_start, -distance, latest_finish)`
    LatestStartThenLongest,
    /// `(-distance, latest_start, latest_finish)`
    LongestFirst,
    /// `(latest_finish, earliest_start, -distance)`
    EarliestDeadline,
}

impl RideOrder {
    pub const ALL: [RideOrder; 4] = [
        RideOrder::EarliestStart,
        RideOrder::LatestStartThenLongest,
        RideOrder::LongestFirst,
        RideOrder::EarliestDeadline,
    ];

    /// Initial search pool. Latest start then longest is listed twice and starts with
    /// twice the weight of the others.
    pub const DEFAULT_POOL: [RideOrder; 5] = [
        RideOrder::EarliestStart,
        RideOrder::LatestStartThenLongest,
        RideOrder::LongestFirst,
        RideOrder::LatestStartThenLongest,
        RideOrder::EarliestDeadline,
    ];

    #[inline]
    pub fn sort_key(&self, ride: &Ride) -> (i64, i64, i64) {
        match self {
            RideOrder::EarliestStart => (
                ride.earliest_start(),
                ride.latest_finish(),
                -ride.distance(),
            ),
            RideOrder::LatestStartThenLongest => (
                ride.latest_start(),
                -ride.distance(),
                ride.latest_finish(),
            ),
            RideOrder::LongestFirst => (
                -ride.distance(),
                ride.latest_start(),
                ride.latest_finish(),
            ),
            RideOrder::EarliestDeadline => (
                ride.latest_finish(),
                ride.earliest_start(),
                -ride.distance(),
            ),
        }
    }

    /// Stable sort, rides with equal keys keep their input order.
    pub fn sort(&self, rides: &mut [&Ride]) {
        rides.sort_by_key(|ride| self.sort_key(ride));
    }
}

impl std::fmt::Display for RideOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RideOrder::EarliestStart => "earliest start",
            RideOrder::LatestStartThenLongest => "latest start, longest",
            RideOrder::LongestFirst => "longest",
            RideOrder::EarliestDeadline => "earliest deadline",
        };

        f.write_str(name)
    }
}
