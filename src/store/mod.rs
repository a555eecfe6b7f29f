//! Persistence seams consumed by the ranking core.
//!
//! The engine never reaches for a global handle: it is handed something that
//! implements these traits. [`MemoryStore`] implements all three and is what
//! the binary and the tests use.
//!
//! - [`VectorStore`]: the embedding cache table, insert-if-absent only.
//! - [`SignalStore`]: read-side aggregates over the append-only event and
//!   rating logs.
//! - [`RecordStore`]: actor and candidate lookups.

pub mod error;
pub mod memory;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use memory::{MemoryStore, NewEvent, NewJob, NewRating, NewUser, Snapshot};

use std::future::Future;

use crate::cache::{CacheKey, Vector};
use crate::model::{EventCounts, Job, PartyKind, Rating, TargetKind, User};

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

/// Embedding cache table keyed by (entity kind, entity id, content hash).
pub trait VectorStore: Send + Sync {
    fn read_cached_vector(
        &self,
        key: &CacheKey,
    ) -> impl Future<Output = StoreResult<Option<Vector>>> + Send;

    /// Stores `vector` unless the key is already present. Returns `true` if
    /// this call inserted it; an existing value is never replaced.
    fn insert_vector_if_absent(
        &self,
        key: CacheKey,
        vector: Vector,
    ) -> impl Future<Output = StoreResult<bool>> + Send;
}

/// Aggregates over the interaction and rating logs.
pub trait SignalStore: Send + Sync {
    /// Up to `limit` ratings for the target, most recent first.
    fn read_recent_ratings(
        &self,
        target_id: u64,
        target_kind: PartyKind,
        limit: usize,
    ) -> impl Future<Output = StoreResult<Vec<Rating>>> + Send;

    /// Number of `cancel` events where `actor_id` is the actor.
    fn count_cancel_events(&self, actor_id: u64) -> impl Future<Output = StoreResult<u32>> + Send;

    fn read_event_counts(
        &self,
        actor_id: u64,
        target_kind: TargetKind,
        target_id: u64,
    ) -> impl Future<Output = StoreResult<EventCounts>> + Send;
}

/// Actor and candidate lookups for request-level feeds.
pub trait RecordStore: Send + Sync {
    fn get_user(&self, id: u64) -> impl Future<Output = StoreResult<Option<User>>> + Send;

    fn get_job(&self, id: u64) -> impl Future<Output = StoreResult<Option<Job>>> + Send;

    /// Newest jobs first.
    fn recent_jobs(&self, limit: usize) -> impl Future<Output = StoreResult<Vec<Job>>> + Send;

    /// Newest worker-role users first.
    fn recent_workers(&self, limit: usize)
    -> impl Future<Output = StoreResult<Vec<User>>> + Send;
}
