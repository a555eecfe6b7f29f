use std::cmp::Ordering;

use super::types::{ScoredCandidate, SignalBreakdown};

/// Ranking direction; each has a fixed weight profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightProfile {
    WorkerSeesJobs,
    CompanySeesWorkers,
}

impl WeightProfile {
    pub fn weights(self) -> Weights {
        match self {
            WeightProfile::WorkerSeesJobs => Weights::WORKER_SEES_JOBS,
            WeightProfile::CompanySeesWorkers => Weights::COMPANY_SEES_WORKERS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightProfile::WorkerSeesJobs => "worker_sees_jobs",
            WeightProfile::CompanySeesWorkers => "company_sees_workers",
        }
    }
}

/// Linear weights over a [`SignalBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub similarity: f64,
    pub location: f64,
    pub availability: f64,
    pub trust: f64,
    pub behavior: f64,
    pub freshness: f64,
}

impl Weights {
    pub const WORKER_SEES_JOBS: Weights = Weights {
        similarity: 0.35,
        location: 0.20,
        availability: 0.15,
        trust: 0.15,
        behavior: 0.10,
        freshness: 0.05,
    };

    pub const COMPANY_SEES_WORKERS: Weights = Weights {
        similarity: 0.40,
        location: 0.20,
        availability: 0.15,
        trust: 0.20,
        behavior: 0.05,
        freshness: 0.0,
    };

    pub fn sum(&self) -> f64 {
        self.similarity + self.location + self.availability + self.trust + self.behavior
            + self.freshness
    }

    /// Weighted sum clamped to `[0, 1]`. Missing freshness contributes 0.
    pub fn score(&self, b: &SignalBreakdown) -> f64 {
        let raw = self.similarity * b.similarity
            + self.location * b.location
            + self.availability * b.availability
            + self.trust * b.trust
            + self.behavior * b.behavior
            + self.freshness * b.freshness.unwrap_or(0.0);
        raw.clamp(0.0, 1.0)
    }
}

/// Sorts by final score, highest first. Stable: ties keep input order.
pub fn sort_by_score_desc<T>(items: &mut [ScoredCandidate<T>]) {
    items.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });
}
