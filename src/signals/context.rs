//! Contextual fit signals: location, availability, freshness.

/// Ordered "nearby" pairs; lookups check both directions.
pub const NEARBY_LOCATIONS: &[(&str, &str)] = &[
    ("sousse", "monastir"),
    ("tunis", "ariana"),
    ("tunis", "ben arous"),
    ("sfax", "mahdia"),
];

pub const LOCATION_EXACT: f64 = 1.0;
pub const LOCATION_NEARBY: f64 = 0.8;
pub const LOCATION_UNKNOWN: f64 = 0.5;
pub const LOCATION_FAR: f64 = 0.3;

pub const AVAILABILITY_MATCH: f64 = 0.9;
pub const AVAILABILITY_NEUTRAL: f64 = 0.6;

/// Availability words that suit short shifts.
pub const FLEXIBLE_KEYWORDS: &[&str] = &["weekend", "evening", "soir", "any"];
const SHORT_SHIFT_KEYWORD: &str = "micro";
const FULL_TIME_KEYWORD: &str = "full";

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

pub fn are_nearby(a: &str, b: &str) -> bool {
    NEARBY_LOCATIONS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Fit between two free-text locations.
pub fn location_fit(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        LOCATION_UNKNOWN
    } else if a == b {
        LOCATION_EXACT
    } else if are_nearby(&a, &b) {
        LOCATION_NEARBY
    } else {
        LOCATION_FAR
    }
}

/// Fit between a worker's stated availability and a job type.
pub fn availability_fit(availability: &str, job_type: &str) -> f64 {
    let availability = normalize(availability);
    let job_type = job_type.to_lowercase();

    if availability.is_empty() {
        return AVAILABILITY_NEUTRAL;
    }

    let short_shift_match = job_type.contains(SHORT_SHIFT_KEYWORD)
        && FLEXIBLE_KEYWORDS.iter().any(|k| availability.contains(k));
    let full_time_match =
        job_type.contains(FULL_TIME_KEYWORD) && availability.contains(FULL_TIME_KEYWORD);

    if short_shift_match || full_time_match {
        AVAILABILITY_MATCH
    } else {
        AVAILABILITY_NEUTRAL
    }
}

/// Recency proxy from a monotonically increasing id: `min(1, 0.6 + id/(id+50))`.
pub fn freshness(id: u64) -> f64 {
    let id = id as f64;
    (0.6 + id / (id + 50.0)).min(1.0)
}
