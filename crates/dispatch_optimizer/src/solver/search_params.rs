use super::{ride_order::RideOrder, vehicle_order::VehicleOrder};

pub const DEFAULT_ROUNDS: usize = 30;
pub const DEFAULT_BEST_FACTORS: [usize; 5] = [2, 4, 5, 20, 50];

#[derive(Clone, Debug)]
pub struct SearchParams {
    pub rounds: usize,

    /// Initial pools, a value listed twice starts with twice the weight.
    pub best_factors: Vec<usize>,
    pub vehicle_orders: Vec<VehicleOrder>,
    pub ride_orders: Vec<RideOrder>,

    /// Seed of the search random generator, drawn from the OS when `None`.
    pub seed: Option<u64>,
    pub threads: Threads,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl From<usize> for Threads {
    fn from(value: usize) -> Self {
        match value {
            0 => Threads::Auto,
            1 => Threads::Single,
            n => Threads::Multi(n),
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            rounds: DEFAULT_ROUNDS,
            best_factors: DEFAULT_BEST_FACTORS.to_vec(),
            vehicle_orders: VehicleOrder::DEFAULT_POOL.to_vec(),
            ride_orders: RideOrder::DEFAULT_POOL.to_vec(),
            seed: None,
            threads: Threads::Single,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threads_from_count() {
        assert_eq!(Threads::from(0), Threads::Auto);
        assert_eq!(Threads::from(1), Threads::Single);
        assert_eq!(Threads::from(6), Threads::Multi(6));
    }

    #[test]
    fn test_number_of_threads() {
        assert_eq!(Threads::Single.number_of_threads(), 1);
        assert_eq!(Threads::Multi(0).number_of_threads(), 1);
        assert_eq!(Threads::Multi(3).number_of_threads(), 3);
        assert!(Threads::Auto.number_of_threads() >= 1);
    }
}
