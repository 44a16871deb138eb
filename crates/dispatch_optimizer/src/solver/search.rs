use std::{num::NonZeroUsize, sync::Arc};

use jiff::{SignedDuration, Timestamp};
use rand::{SeedableRng, rngs::SmallRng};
use rayon::{
    ThreadPool, ThreadPoolBuilder,
    iter::{IntoParallelIterator, ParallelIterator},
};
use tracing::{debug, info};

use crate::{problem::ride_assignment_problem::RideAssignmentProblem, utils::time::elapsed_since};

use super::{
    candidate_pool::CandidatePool,
    error::SearchError,
    greedy_planner::{GreedyPlanner, PlanParams},
    ride_order::RideOrder,
    search_params::SearchParams,
    solution::Solution,
    statistics::{RoundStatistics, SearchStatistics},
    vehicle_order::VehicleOrder,
};

type RoundHandler = Box<dyn FnMut(&RoundStatistics) + Send + 'static>;
type BestSolutionHandler = Box<dyn FnMut(&Solution) + Send + 'static>;

pub struct SearchOutcome {
    pub best: Solution,
    pub statistics: SearchStatistics,
}

struct PlannedRound {
    params: PlanParams,
    solution: Solution,
    duration: SignedDuration,
}

/// Repeats greedy planning passes with randomly drawn parameters and keeps the best
/// solution. Parameters that produce a new best solution get more likely to be drawn
/// again.
pub struct RandomizedSearch {
    problem: Arc<RideAssignmentProblem>,
    params: SearchParams,
    best_factors: CandidatePool<NonZeroUsize>,
    vehicle_orders: CandidatePool<VehicleOrder>,
    ride_orders: CandidatePool<RideOrder>,
    thread_pool: Option<ThreadPool>,
    on_round_handler: Option<RoundHandler>,
    on_best_solution_handler: Option<BestSolutionHandler>,
}

impl RandomizedSearch {
    pub fn new(
        problem: Arc<RideAssignmentProblem>,
        params: SearchParams,
    ) -> Result<Self, SearchError> {
        let best_factors = params
            .best_factors
            .iter()
            .map(|&factor| NonZeroUsize::new(factor).ok_or(SearchError::ZeroBestFactor))
            .collect::<Result<Vec<_>, _>>()?;

        let num_threads = params.threads.number_of_threads();
        let thread_pool = if num_threads > 1 {
            Some(ThreadPoolBuilder::new().num_threads(num_threads).build()?)
        } else {
            None
        };

        Ok(RandomizedSearch {
            best_factors: CandidatePool::new("best factor", best_factors)?,
            vehicle_orders: CandidatePool::new(
                "vehicle order",
                params.vehicle_orders.iter().copied(),
            )?,
            ride_orders: CandidatePool::new("ride order", params.ride_orders.iter().copied())?,
            problem,
            params,
            thread_pool,
            on_round_handler: None,
            on_best_solution_handler: None,
        })
    }

    pub fn on_round<F>(&mut self, callback: F)
    where
        F: FnMut(&RoundStatistics) + Send + 'static,
    {
        self.on_round_handler = Some(Box::new(callback));
    }

    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&Solution) + Send + 'static,
    {
        self.on_best_solution_handler = Some(Box::new(callback));
    }

    pub fn problem(&self) -> &RideAssignmentProblem {
        &self.problem
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn best_factors(&self) -> &CandidatePool<NonZeroUsize> {
        &self.best_factors
    }

    pub fn vehicle_orders(&self) -> &CandidatePool<VehicleOrder> {
        &self.vehicle_orders
    }

    pub fn ride_orders(&self) -> &CandidatePool<RideOrder> {
        &self.ride_orders
    }

    fn batch_size(&self) -> usize {
        self.thread_pool
            .as_ref()
            .map_or(1, |pool| pool.current_num_threads())
    }

    fn sample_params(&self, rng: &mut SmallRng) -> PlanParams {
        PlanParams::new(
            self.best_factors.sample(rng),
            self.vehicle_orders.sample(rng),
            self.ride_orders.sample(rng),
        )
    }

    fn reinforce(&mut self, params: &PlanParams) {
        self.best_factors.reinforce(params.best_factor);
        self.vehicle_orders.reinforce(params.vehicle_order);
        self.ride_orders.reinforce(params.ride_order);
    }

    /// Runs every round and returns the best solution found, or the idle fleet when no
    /// round scored above zero.
    ///
    /// Rounds run in batches of one round per thread. The parameters of a batch are drawn
    /// before it starts and its results are applied in round order, so a given seed and
    /// thread count always produce the same outcome.
    pub fn run(&mut self) -> SearchOutcome {
        let started_at = Timestamp::now();
        let mut rng = match self.params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };

        let rounds = self.params.rounds;
        let batch_size = self.batch_size();
        let mut best = Solution::empty(self.problem.fleet_size());
        let mut statistics = SearchStatistics::default();

        info!(
            "Searching {} rounds over {} rides and {} vehicles on {} threads",
            rounds,
            self.problem.ride_count(),
            self.problem.fleet_size(),
            batch_size
        );

        let mut round = 0;
        while round < rounds {
            let draws: Vec<(PlanParams, SmallRng)> = (0..batch_size.min(rounds - round))
                .map(|_| {
                    let params = self.sample_params(&mut rng);
                    (params, SmallRng::from_rng(&mut rng))
                })
                .collect();

            let planned = plan_rounds(&self.problem, draws, self.thread_pool.as_ref());

            for PlannedRound {
                params,
                solution,
                duration,
            } in planned
            {
                let improved = solution.score().is_better_than(&best.score());

                let round_statistics = RoundStatistics {
                    round,
                    params,
                    score: solution.score(),
                    assigned_rides: solution.assigned_rides(),
                    improved,
                    duration,
                };

                if improved {
                    info!(
                        "Round {}: new best score {} ({} rides) with {}",
                        round,
                        solution.score(),
                        solution.assigned_rides(),
                        params
                    );

                    self.reinforce(&params);

                    if let Some(callback) = self.on_best_solution_handler.as_mut() {
                        callback(&solution);
                    }

                    best = solution;
                } else {
                    debug!(
                        "Round {}: score {} with {}",
                        round,
                        solution.score(),
                        params
                    );
                }

                if let Some(callback) = self.on_round_handler.as_mut() {
                    callback(&round_statistics);
                }

                statistics.add_round(round_statistics);
                round += 1;
            }
        }

        statistics.set_duration(elapsed_since(started_at));

        info!(
            "Best score {} with {}/{} rides assigned",
            best.score(),
            best.assigned_rides(),
            self.problem.ride_count()
        );
        debug!("{}", self.best_factors);
        debug!("{}", self.vehicle_orders);
        debug!("{}", self.ride_orders);

        SearchOutcome { best, statistics }
    }
}

/// Plans every drawn round, on the thread pool when there is more than one.
/// Results keep the order of `draws`.
fn plan_rounds(
    problem: &RideAssignmentProblem,
    draws: Vec<(PlanParams, SmallRng)>,
    thread_pool: Option<&ThreadPool>,
) -> Vec<PlannedRound> {
    let plan = |(params, mut rng): (PlanParams, SmallRng)| {
        let started_at = Timestamp::now();
        let solution = GreedyPlanner::new(problem).plan(&params, &mut rng);

        PlannedRound {
            params,
            solution,
            duration: elapsed_since(started_at),
        }
    };

    match thread_pool {
        Some(pool) if draws.len() > 1 => pool.install(|| draws.into_par_iter().map(plan).collect()),
        _ => draws.into_iter().map(plan).collect(),
    }
}

/// Runs a search with the default pools, a single thread and `rounds` rounds.
pub fn search(
    problem: Arc<RideAssignmentProblem>,
    rounds: usize,
    seed: Option<u64>,
) -> Result<Solution, SearchError> {
    let mut search = RandomizedSearch::new(
        problem,
        SearchParams {
            rounds,
            seed,
            ..SearchParams::default()
        },
    )?;

    Ok(search.run().best)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use crate::{
        problem::generator::{InstanceGenerator, InstanceGeneratorConfig},
        solver::{score::Score, search_params::Threads},
        test_utils::{assert_valid_solution, create_problem},
    };

    use super::*;

    fn generated_problem() -> Arc<RideAssignmentProblem> {
        Arc::new(
            InstanceGenerator::new(InstanceGeneratorConfig {
                rides: 150,
                fleet_size: 8,
                seed: 7,
                ..InstanceGeneratorConfig::default()
            })
            .generate(),
        )
    }

    fn seeded_params(rounds: usize, threads: Threads) -> SearchParams {
        SearchParams {
            rounds,
            seed: Some(1234),
            threads,
            ..SearchParams::default()
        }
    }

    #[test]
    fn test_zero_rounds_returns_idle_fleet() {
        let problem = generated_problem();
        let mut search = RandomizedSearch::new(problem.clone(), seeded_params(0, Threads::Single))
            .unwrap();

        let outcome = search.run();

        assert_eq!(outcome.best.routes().len(), problem.fleet_size());
        assert!(outcome.best.routes().iter().all(Vec::is_empty));
        assert_eq!(outcome.best.score(), Score::ZERO);
        assert!(outcome.statistics.rounds().is_empty());
    }

    #[test]
    fn test_no_improvement_returns_idle_fleet() {
        let problem = Arc::new(create_problem(
            2,
            10,
            &[((0, 0), (0, 10), 0, 5), ((50, 50), (50, 51), 0, 20)],
        ));
        let mut search =
            RandomizedSearch::new(problem, seeded_params(10, Threads::Single)).unwrap();

        let outcome = search.run();

        assert!(outcome.best.is_empty());
        assert_eq!(outcome.best.score(), Score::ZERO);
        assert_eq!(outcome.best.routes(), &[vec![], vec![]]);
        assert_eq!(outcome.statistics.rounds().len(), 10);
        assert_eq!(outcome.statistics.improvements(), 0);
        assert_eq!(search.vehicle_orders().total_weight(), 8);
        assert_eq!(search.ride_orders().total_weight(), 5);
        assert_eq!(
            search.vehicle_orders().weight(VehicleOrder::MostRidesThenNearest),
            2
        );
        assert_eq!(
            search.ride_orders().weight(RideOrder::LatestStartThenLongest),
            2
        );
        assert_eq!(search.vehicle_orders().candidates().len(), 7);
        assert_eq!(search.ride_orders().candidates().len(), 4);
    }

    #[test]
    fn test_search_returns_best_round() {
        let problem = generated_problem();
        let mut search =
            RandomizedSearch::new(problem.clone(), seeded_params(25, Threads::Single)).unwrap();

        let outcome = search.run();
        assert_valid_solution(&problem, &outcome.best);

        let best_round_score = outcome
            .statistics
            .rounds()
            .iter()
            .map(|round| round.score.total())
            .max()
            .unwrap();
        assert_eq!(outcome.best.score().total(), best_round_score);
        assert_eq!(
            outcome.statistics.best_round().map(|round| round.score),
            Some(outcome.best.score())
        );
    }

    #[test]
    fn test_improvements_reinforce_pools() {
        let problem = generated_problem();
        let mut search =
            RandomizedSearch::new(problem, seeded_params(30, Threads::Single)).unwrap();

        let outcome = search.run();
        let improvements = outcome.statistics.improvements() as u32;

        assert!(improvements >= 1);
        assert_eq!(search.best_factors().total_weight(), 5 + improvements);
        assert_eq!(search.vehicle_orders().total_weight(), 8 + improvements);
        assert_eq!(search.ride_orders().total_weight(), 5 + improvements);

        let best_params = outcome.best.params().copied().unwrap();
        assert!(search.vehicle_orders().weight(best_params.vehicle_order) >= 2);
    }

    #[test]
    fn test_search_is_deterministic_for_a_seed() {
        let problem = generated_problem();

        for threads in [Threads::Single, Threads::Multi(3)] {
            let first = RandomizedSearch::new(problem.clone(), seeded_params(12, threads))
                .unwrap()
                .run();
            let second = RandomizedSearch::new(problem.clone(), seeded_params(12, threads))
                .unwrap()
                .run();

            assert_eq!(first.best.routes(), second.best.routes());
            assert_eq!(first.best.score(), second.best.score());
        }
    }

    #[test]
    fn test_multi_threaded_search_yields_valid_solution() {
        let problem = generated_problem();
        let mut search =
            RandomizedSearch::new(problem.clone(), seeded_params(17, Threads::Multi(4))).unwrap();

        let outcome = search.run();

        assert_eq!(outcome.statistics.rounds().len(), 17);
        assert!(
            outcome
                .statistics
                .rounds()
                .iter()
                .enumerate()
                .all(|(index, round)| round.round == index)
        );
        assert_valid_solution(&problem, &outcome.best);
    }

    #[test]
    fn test_callbacks_follow_rounds() {
        let problem = generated_problem();
        let mut search =
            RandomizedSearch::new(problem, seeded_params(20, Threads::Single)).unwrap();

        let rounds = Arc::new(AtomicUsize::new(0));
        let best_solutions = Arc::new(AtomicUsize::new(0));
        {
            let rounds = Arc::clone(&rounds);
            search.on_round(move |_| {
                rounds.fetch_add(1, Ordering::Relaxed);
            });
            let best_solutions = Arc::clone(&best_solutions);
            search.on_best_solution(move |_| {
                best_solutions.fetch_add(1, Ordering::Relaxed);
            });
        }

        let outcome = search.run();

        assert_eq!(rounds.load(Ordering::Relaxed), 20);
        assert_eq!(
            best_solutions.load(Ordering::Relaxed),
            outcome.statistics.improvements()
        );
    }

    #[test]
    fn test_invalid_pools_are_rejected() {
        let problem = generated_problem();

        let zero_factor = RandomizedSearch::new(
            problem.clone(),
            SearchParams {
                best_factors: vec![2, 0],
                ..SearchParams::default()
            },
        );
        assert!(matches!(zero_factor, Err(SearchError::ZeroBestFactor)));

        let no_ride_orders = RandomizedSearch::new(
            problem,
            SearchParams {
                ride_orders: vec![],
                ..SearchParams::default()
            },
        );
        assert!(matches!(
            no_ride_orders,
            Err(SearchError::EmptyPool("ride order"))
        ));
    }

    #[test]
    fn test_search_helper() {
        let problem = generated_problem();

        let solution = search(problem.clone(), 5, Some(3)).unwrap();

        assert_valid_solution(&problem, &solution);
        assert!(solution.score().total() > 0);
    }
}
