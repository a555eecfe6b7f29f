//! Per-candidate signals, each in `[0, 1]`.
//!
//! Pure functions live in [`similarity`] and [`context`]; [`history`] adds the
//! log-derived trust and behavior signals with store-backed loaders.

pub mod context;
pub mod history;
pub mod similarity;


use std::fmt;
use std::str::FromStr;

use crate::model::EventKind;

pub use context::{are_nearby, availability_fit, freshness, location_fit};
pub use history::{
    behavior_points, behavior_score, load_behavior_score, load_trust_score, trust_score,
};
pub use similarity::{cosine_similarity, similarity};

/// Points contributed by one event of each kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorPoints {
    pub apply: f64,
    pub save: f64,
    pub click: f64,
    pub view: f64,
    pub skip: f64,
    pub cancel: f64,
}

impl Default for BehaviorPoints {
    fn default() -> Self {
        Self {
            apply: 5.0,
            save: 3.0,
            click: 2.0,
            view: 1.0,
            skip: -1.0,
            cancel: -8.0,
        }
    }
}

impl BehaviorPoints {
    pub fn for_kind(&self, kind: EventKind) -> f64 {
        match kind {
            EventKind::Apply => self.apply,
            EventKind::Save => self.save,
            EventKind::Click => self.click,
            EventKind::View => self.view,
            EventKind::Skip => self.skip,
            EventKind::Cancel => self.cancel,
        }
    }

    fn slot(&mut self, kind: EventKind) -> &mut f64 {
        match kind {
            EventKind::Apply => &mut self.apply,
            EventKind::Save => &mut self.save,
            EventKind::Click => &mut self.click,
            EventKind::View => &mut self.view,
            EventKind::Skip => &mut self.skip,
            EventKind::Cancel => &mut self.cancel,
        }
    }
}

/// Failure parsing a `kind=points,...` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePointsError {
    pub entry: String,
    pub reason: &'static str,
}

impl fmt::Display for ParsePointsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid entry '{}': {}", self.entry, self.reason)
    }
}

impl std::error::Error for ParsePointsError {}

/// Parses `apply=5,save=3,...`. Kinds not listed keep their default points.
impl FromStr for BehaviorPoints {
    type Err = ParsePointsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut points = Self::default();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let err = |reason| ParsePointsError {
                entry: entry.to_string(),
                reason,
            };
            let (kind, value) = entry.split_once('=').ok_or_else(|| err("expected kind=points"))?;
            let kind: EventKind = kind.trim().parse().map_err(|_| err("unknown event kind"))?;
            let value: f64 = value.trim().parse().map_err(|_| err("points must be a number"))?;
            if !value.is_finite() {
                return Err(err("points must be finite"));
            }
            *points.slot(kind) = value;
        }
        Ok(points)
    }
}

/// Behavior signal parameters: event points and the logistic divisor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorPolicy {
    pub points: BehaviorPoints,
    pub divisor: f64,
}

impl Default for BehaviorPolicy {
    fn default() -> Self {
        Self {
            points: BehaviorPoints::default(),
            divisor: 6.0,
        }
    }
}

impl BehaviorPolicy {
    /// The configured divisor, or the default one when it is not a
    /// positive finite number.
    pub fn effective_divisor(&self) -> f64 {
        if self.divisor.is_finite() && self.divisor > 0.0 {
            self.divisor
        } else {
            Self::default().divisor
        }
    }
}

/// Trust signal parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrustPolicy {
    /// Most recent ratings considered.
    pub window: usize,
    /// Assumed average when a party has no ratings.
    pub baseline_stars: f64,
    pub max_stars: f64,
    /// Penalty per cancellation, before the cap.
    pub cancel_penalty: f64,
    pub cancel_penalty_cap: f64,
}

impl Default for TrustPolicy {
    fn default() -> Self {
        Self {
            window: 10,
            baseline_stars: 4.0,
            max_stars: 5.0,
            cancel_penalty: 0.05,
            cancel_penalty_cap: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalPolicy {
    pub behavior: BehaviorPolicy,
    pub trust: TrustPolicy,
}
