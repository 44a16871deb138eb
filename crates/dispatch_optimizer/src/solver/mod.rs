pub mod candidate_pool;
pub mod error;
pub mod evaluation;
pub mod greedy_planner;
pub mod ride_order;
pub mod score;
pub mod search;
pub mod search_params;
pub mod solution;
pub mod statistics;
pub mod vehicle_order;
pub mod vehicle_state;
