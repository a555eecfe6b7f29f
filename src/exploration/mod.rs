//! Exploration/exploitation mixing.
//!
//! The top of a sorted page is served as-is; a small tail is shuffled so that
//! lower-ranked items keep receiving exposure and the behavior signal does not
//! collapse onto whatever was shown first.


use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::constants::{DEFAULT_EXPLORE_RATE, MIN_EXPLORATION_POOL};
use crate::scoring::{ScoredCandidate, sort_by_score_desc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorationMixer {
    explore_rate: f64,
}

impl Default for ExplorationMixer {
    fn default() -> Self {
        Self {
            explore_rate: DEFAULT_EXPLORE_RATE,
        }
    }
}

impl ExplorationMixer {
    /// `explore_rate` is clamped to `[0, 1]`; non-finite values fall back to the default.
    pub fn new(explore_rate: f64) -> Self {
        let explore_rate = if explore_rate.is_finite() {
            explore_rate.clamp(0.0, 1.0)
        } else {
            DEFAULT_EXPLORE_RATE
        };
        Self { explore_rate }
    }

    pub fn explore_rate(&self) -> f64 {
        self.explore_rate
    }

    /// Tail size for a pool of `n`; at least one slot once mixing applies.
    pub fn explore_count(&self, n: usize) -> usize {
        if n <= MIN_EXPLORATION_POOL {
            return 0;
        }
        ((n as f64 * self.explore_rate).floor() as usize).clamp(1, n)
    }

    /// Sorts by score, keeps the first `n - explore_count` and appends the
    /// remainder in uniformly shuffled order. Pools of three or fewer are
    /// returned untouched.
    pub fn mix<T, R: Rng + ?Sized>(
        &self,
        mut candidates: Vec<ScoredCandidate<T>>,
        rng: &mut R,
    ) -> Vec<ScoredCandidate<T>> {
        let n = candidates.len();
        if n <= MIN_EXPLORATION_POOL {
            return candidates;
        }

        sort_by_score_desc(&mut candidates);
        let explore = self.explore_count(n);
        candidates[n - explore..].shuffle(rng);

        debug!(
            pool = n,
            exploit = n - explore,
            explore,
            "Exploration mix applied"
        );
        candidates
    }
}
