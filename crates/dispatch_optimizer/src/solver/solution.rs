use serde::Serialize;

use crate::problem::ride::RideIdx;

use super::{greedy_planner::PlanParams, score::Score, vehicle_state::VehicleIdx};

/// One candidate assignment: the rides of every vehicle, in assignment order.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    routes: Vec<Vec<RideIdx>>,
    score: Score,
    assigned_rides: usize,
    /// Parameters of the planning pass that produced the solution, `None` for the idle fleet.
    params: Option<PlanParams>,
}

impl Solution {
    /// Every vehicle idle, nothing assigned.
    pub fn empty(fleet_size: usize) -> Self {
        Solution {
            routes: vec![Vec::new(); fleet_size],
            score: Score::ZERO,
            assigned_rides: 0,
            params: None,
        }
    }

    pub(crate) fn new(
        routes: Vec<Vec<RideIdx>>,
        score: Score,
        assigned_rides: usize,
        params: PlanParams,
    ) -> Self {
        Solution {
            routes,
            score,
            assigned_rides,
            params: Some(params),
        }
    }

    pub fn routes(&self) -> &[Vec<RideIdx>] {
        &self.routes
    }

    pub fn route(&self, vehicle: VehicleIdx) -> &[RideIdx] {
        &self.routes[vehicle.get()]
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn assigned_rides(&self) -> usize {
        self.assigned_rides
    }

    pub fn params(&self) -> Option<&PlanParams> {
        self.params.as_ref()
    }

    pub fn non_empty_routes_count(&self) -> usize {
        self.routes.iter().filter(|route| !route.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned_rides == 0
    }
}
