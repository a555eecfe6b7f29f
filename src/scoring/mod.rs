//! Composite scoring: fixed weight profiles over the signal breakdown.

pub mod scorer;
pub mod types;


pub use scorer::{WeightProfile, Weights, sort_by_score_desc};
pub use types::{ScoredCandidate, SignalBreakdown, display_score};
