use fxhash::FxHashMap;
use jiff::SignedDuration;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use super::{
    greedy_planner::PlanParams, ride_order::RideOrder, score::Score, vehicle_order::VehicleOrder,
};

#[derive(Debug, Clone, Serialize)]
pub struct RoundStatistics {
    pub round: usize,
    pub params: PlanParams,
    pub score: Score,
    pub assigned_rides: usize,
    /// Whether the round beat every earlier round and became the best solution.
    pub improved: bool,
    pub duration: SignedDuration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StrategyUsage {
    pub selected: usize,
    pub improved: usize,
}

impl StrategyUsage {
    fn record(&mut self, improved: bool) {
        self.selected += 1;
        if improved {
            self.improved += 1;
        }
    }
}

#[serde_as]
#[derive(Debug, Default, Serialize)]
pub struct SearchStatistics {
    rounds: Vec<RoundStatistics>,
    best_round: Option<usize>,

    #[serde_as(as = "FxHashMap<DisplayFromStr, _>")]
    best_factors: FxHashMap<usize, StrategyUsage>,
    #[serde_as(as = "FxHashMap<DisplayFromStr, _>")]
    vehicle_orders: FxHashMap<VehicleOrder, StrategyUsage>,
    #[serde_as(as = "FxHashMap<DisplayFromStr, _>")]
    ride_orders: FxHashMap<RideOrder, StrategyUsage>,

    duration: SignedDuration,
}

impl SearchStatistics {
    pub fn add_round(&mut self, round: RoundStatistics) {
        let params = round.params;

        self.best_factors
            .entry(params.best_factor.get())
            .or_default()
            .record(round.improved);
        self.vehicle_orders
            .entry(params.vehicle_order)
            .or_default()
            .record(round.improved);
        self.ride_orders
            .entry(params.ride_order)
            .or_default()
            .record(round.improved);

        if round.improved {
            self.best_round = Some(round.round);
        }

        self.rounds.push(round);
    }

    pub fn set_duration(&mut self, duration: SignedDuration) {
        self.duration = duration;
    }

    pub fn rounds(&self) -> &[RoundStatistics] {
        &self.rounds
    }

    pub fn best_round(&self) -> Option<&RoundStatistics> {
        self.best_round
            .and_then(|best| self.rounds.iter().find(|round| round.round == best))
    }

    pub fn improvements(&self) -> usize {
        self.rounds.iter().filter(|round| round.improved).count()
    }

    pub fn best_factor_usage(&self, best_factor: usize) -> StrategyUsage {
        self.best_factors
            .get(&best_factor)
            .copied()
            .unwrap_or_default()
    }

    pub fn vehicle_order_usage(&self, vehicle_order: VehicleOrder) -> StrategyUsage {
        self.vehicle_orders
            .get(&vehicle_order)
            .copied()
            .unwrap_or_default()
    }

    pub fn ride_order_usage(&self, ride_order: RideOrder) -> StrategyUsage {
        self.ride_orders
            .get(&ride_order)
            .copied()
            .unwrap_or_default()
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }
}
