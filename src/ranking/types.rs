use std::time::Duration;

use serde::Serialize;

use crate::constants::{
    DEFAULT_EXPLORE_RATE, DEFAULT_L1_CAPACITY, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_PROVIDER_TIMEOUT_MS,
};
use crate::model::{Job, User};
use crate::scoring::SignalBreakdown;
use crate::signals::SignalPolicy;

/// Tunables for a [`FeedRanker`](super::FeedRanker).
#[derive(Debug, Clone, PartialEq)]
pub struct RankingPolicy {
    pub explore_rate: f64,
    /// Bound on in-flight per-candidate work.
    pub max_concurrency: usize,
    /// Timeout applied to every embedding call.
    pub provider_timeout: Duration,
    pub l1_capacity: u64,
    pub signals: SignalPolicy,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            explore_rate: DEFAULT_EXPLORE_RATE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
            l1_capacity: DEFAULT_L1_CAPACITY,
            signals: SignalPolicy::default(),
        }
    }
}

/// One entry of a worker's job feed.
#[derive(Debug, Clone, Serialize)]
pub struct JobFeedItem {
    pub job: Job,
    pub breakdown: SignalBreakdown,
    pub final_score: f64,
    /// `round(final_score * 100)`.
    pub score: u32,
    pub explanation: String,
}

/// One entry of a job's candidate list.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerMatch {
    pub worker: User,
    pub breakdown: SignalBreakdown,
    pub final_score: f64,
    pub score: u32,
}

/// A ranked page plus bookkeeping for the pool it was cut from.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPage<T> {
    pub items: Vec<T>,
    /// Candidates excluded for missing required text.
    pub skipped: usize,
    /// Scored candidates whose similarity fell back to 0.
    pub degraded: usize,
}

impl<T> RankedPage<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
