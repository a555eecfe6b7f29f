use serde::Serialize;

/// Per-signal components of a score, each in `[0, 1]`.
///
/// `freshness` is `None` in directions that do not score recency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SignalBreakdown {
    pub similarity: f64,
    pub location: f64,
    pub availability: f64,
    pub trust: f64,
    pub behavior: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness: Option<f64>,
}

impl SignalBreakdown {
    /// Every signal set to `value`; freshness included.
    pub fn uniform(value: f64) -> Self {
        Self {
            similarity: value,
            location: value,
            availability: value,
            trust: value,
            behavior: value,
            freshness: Some(value),
        }
    }

    pub fn is_in_range(&self) -> bool {
        [
            self.similarity,
            self.location,
            self.availability,
            self.trust,
            self.behavior,
            self.freshness.unwrap_or(0.0),
        ]
        .iter()
        .all(|v| (0.0..=1.0).contains(v))
    }
}

/// Candidate annotated with its breakdown and final score.
#[derive(Debug, Clone)]
pub struct ScoredCandidate<T> {
    pub candidate: T,
    pub breakdown: SignalBreakdown,
    pub final_score: f64,
    /// Similarity fell back to 0 because an embedding was unavailable.
    pub degraded: bool,
}

impl<T> ScoredCandidate<T> {
    pub fn new(candidate: T, breakdown: SignalBreakdown, final_score: f64) -> Self {
        Self {
            candidate,
            breakdown,
            final_score,
            degraded: false,
        }
    }

    pub fn display_score(&self) -> u32 {
        display_score(self.final_score)
    }
}

/// Integer percentage shown to users: `round(final_score * 100)`.
pub fn display_score(final_score: f64) -> u32 {
    (final_score.clamp(0.0, 1.0) * 100.0).round() as u32
}
