use std::{
    iter,
    ops::{Add, AddAssign},
};

use serde::Serialize;

/// Points earned by a solution, split into ride distance and early start bonuses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub distance: i64,
    pub bonus: i64,
}

impl Score {
    pub const ZERO: Score = Score {
        distance: 0,
        bonus: 0,
    };

    pub fn new(distance: i64, bonus: i64) -> Self {
        Score { distance, bonus }
    }

    pub fn total(&self) -> i64 {
        self.distance + self.bonus
    }

    pub fn is_better_than(&self, other: &Score) -> bool {
        self.total() > other.total()
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (distance {}, bonus {})",
            self.total(),
            self.distance,
            self.bonus
        )
    }
}

impl Add<Score> for Score {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Score {
            distance: self.distance + other.distance,
            bonus: self.bonus + other.bonus,
        }
    }
}

impl AddAssign<Score> for Score {
    fn add_assign(&mut self, other: Score) {
        self.distance += other.distance;
        self.bonus += other.bonus;
    }
}

impl iter::Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Score::ZERO, |acc, score| acc + score)
    }
}
