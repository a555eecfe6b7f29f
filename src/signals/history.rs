//! Signals derived from the interaction and rating logs.

use tracing::debug;

use super::{BehaviorPolicy, TrustPolicy};
use crate::model::{EventCounts, EventKind, PartyKind, TargetKind};
use crate::store::{SignalStore, StoreResult};

/// Weighted point total for one actor's history against one target.
pub fn behavior_points(counts: &EventCounts, policy: &BehaviorPolicy) -> f64 {
    EventKind::ALL
        .iter()
        .map(|&kind| policy.points.for_kind(kind) * f64::from(counts.get(kind)))
        .sum()
}

/// Logistic squash of [`behavior_points`]; no history gives exactly 0.5.
pub fn behavior_score(counts: &EventCounts, policy: &BehaviorPolicy) -> f64 {
    let points = behavior_points(counts, policy);
    1.0 / (1.0 + (-points / policy.effective_divisor()).exp())
}

/// Mean rating (most recent `window` ratings) minus the cancellation
/// penalty, clamped to [0, 1].
///
/// `recent_stars` is expected most-recent-first; only the first
/// `policy.window` entries are used.
pub fn trust_score(recent_stars: &[u8], cancel_count: u32, policy: &TrustPolicy) -> f64 {
    let window = &recent_stars[..recent_stars.len().min(policy.window)];
    let avg_stars = if window.is_empty() {
        policy.baseline_stars
    } else {
        window.iter().map(|&s| f64::from(s)).sum::<f64>() / window.len() as f64
    };

    let base = avg_stars / policy.max_stars;
    let penalty = (policy.cancel_penalty * f64::from(cancel_count)).min(policy.cancel_penalty_cap);
    (base - penalty).clamp(0.0, 1.0)
}

/// Trust score for a rated party, read from the store.
pub async fn load_trust_score<S: SignalStore>(
    store: &S,
    policy: &TrustPolicy,
    target_id: u64,
    target_kind: PartyKind,
) -> StoreResult<f64> {
    let ratings = store
        .read_recent_ratings(target_id, target_kind, policy.window)
        .await?;
    let cancels = store.count_cancel_events(target_id).await?;
    let stars: Vec<u8> = ratings.iter().map(|r| r.stars).collect();

    let score = trust_score(&stars, cancels, policy);
    debug!(
        target_id,
        ratings = stars.len(),
        cancels,
        score,
        "Trust score computed"
    );
    Ok(score)
}

/// Behavior score for an actor's history against one target, read from the store.
pub async fn load_behavior_score<S: SignalStore>(
    store: &S,
    policy: &BehaviorPolicy,
    actor_id: u64,
    target_kind: TargetKind,
    target_id: u64,
) -> StoreResult<f64> {
    let counts = store
        .read_event_counts(actor_id, target_kind, target_id)
        .await?;
    Ok(behavior_score(&counts, policy))
}
