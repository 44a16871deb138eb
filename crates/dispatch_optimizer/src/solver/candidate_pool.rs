use std::fmt::Display;

use rand::distr::{Distribution, weighted::WeightedIndex};
use serde::Serialize;

use super::error::SearchError;

#[derive(Debug, Clone, Serialize)]
pub struct Candidate<S> {
    pub strategy: S,
    pub weight: u32,
}

/// A pool of strategies sampled proportionally to their weight.
///
/// Every strategy listed at construction starts with one unit of weight per listing.
/// Reinforcing a strategy adds one unit, which has the same effect on sampling as
/// listing it one more time.
#[derive(Debug, Clone)]
pub struct CandidatePool<S> {
    name: &'static str,
    candidates: Vec<Candidate<S>>,
    sampler: WeightedIndex<u32>,
}

impl<S> CandidatePool<S>
where
    S: Copy + PartialEq,
{
    pub fn new(
        name: &'static str,
        strategies: impl IntoIterator<Item = S>,
    ) -> Result<Self, SearchError> {
        let mut candidates: Vec<Candidate<S>> = Vec::new();
        for strategy in strategies {
            match candidates.iter_mut().find(|c| c.strategy == strategy) {
                Some(candidate) => candidate.weight += 1,
                None => candidates.push(Candidate {
                    strategy,
                    weight: 1,
                }),
            }
        }

        let sampler = Self::build_sampler(&candidates).ok_or(SearchError::EmptyPool(name))?;

        Ok(CandidatePool {
            name,
            candidates,
            sampler,
        })
    }

    fn build_sampler(candidates: &[Candidate<S>]) -> Option<WeightedIndex<u32>> {
        WeightedIndex::new(candidates.iter().map(|candidate| candidate.weight)).ok()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn sample<R>(&self, rng: &mut R) -> S
    where
        R: rand::Rng,
    {
        self.candidates[self.sampler.sample(rng)].strategy
    }

    pub fn reinforce(&mut self, strategy: S) {
        match self.candidates.iter_mut().find(|c| c.strategy == strategy) {
            Some(candidate) => candidate.weight += 1,
            None => self.candidates.push(Candidate {
                strategy,
                weight: 1,
            }),
        }

        // Weights only ever grow, so the pool stays non-empty with positive weights.
        if let Some(sampler) = Self::build_sampler(&self.candidates) {
            self.sampler = sampler;
        }
    }

    pub fn candidates(&self) -> &[Candidate<S>] {
        &self.candidates
    }

    pub fn weight(&self, strategy: S) -> u32 {
        self.candidates
            .iter()
            .find(|candidate| candidate.strategy == strategy)
            .map_or(0, |candidate| candidate.weight)
    }

    pub fn total_weight(&self) -> u32 {
        self.candidates.iter().map(|candidate| candidate.weight).sum()
    }

    pub fn probability(&self, strategy: S) -> f64 {
        f64::from(self.weight(strategy)) / f64::from(self.total_weight())
    }
}

impl<S> Display for CandidatePool<S>
where
    S: Display + Copy + PartialEq,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{:<30} {:>8} {:>8}", self.name, "Weight", "P")?;
        writeln!(f, "{:-<48}", "")?;
        for candidate in &self.candidates {
            writeln!(
                f,
                "{:<30} {:>8} {:>8.3}",
                candidate.strategy.to_string(),
                candidate.weight,
                self.probability(candidate.strategy)
            )?;
        }
        Ok(())
    }
}
