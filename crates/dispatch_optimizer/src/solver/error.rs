use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("the {0} pool needs at least one candidate")]
    EmptyPool(&'static str),

    #[error("best factors must be at least 1")]
    ZeroBestFactor,

    #[error("could not build the search thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("expected {expected} vehicle routes, found {found}")]
    VehicleCount { expected: usize, found: usize },

    #[error("vehicle {vehicle} serves ride {ride}, which does not exist")]
    UnknownRide { vehicle: usize, ride: usize },

    #[error("ride {ride} is assigned more than once")]
    DuplicateRide { ride: usize },

    #[error("vehicle {vehicle} serves ride {ride}, whose window is shorter than the ride")]
    UnservableRide { vehicle: usize, ride: usize },

    #[error(
        "vehicle {vehicle} reaches ride {ride} at {arrival}, which is past its latest start {latest_start}"
    )]
    LateArrival {
        vehicle: usize,
        ride: usize,
        arrival: i64,
        latest_start: i64,
    },
}
