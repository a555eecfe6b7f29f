//! Content-addressed embedding cache.
//!
//! Lookups go L1 (in-process moka) → vector store → provider. A key's value
//! never changes once written, so the L1 needs no invalidation: an edited
//! profile hashes to a different key.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::{debug, instrument, warn};

use super::error::{CacheError, CacheResult};
use super::types::{CacheKey, CacheStatus, Vector};
use crate::constants::DEFAULT_L1_CAPACITY;
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::model::EntityKind;
use crate::store::VectorStore;

pub struct EmbeddingCache<S: VectorStore> {
    l1: Cache<CacheKey, Vector>,
    store: S,
    provider: Arc<dyn EmbeddingProvider>,
    timeout: Duration,
}

impl<S: VectorStore> std::fmt::Debug for EmbeddingCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingCache")
            .field("l1_entries", &self.l1.entry_count())
            .field("provider", &self.provider.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl<S: VectorStore> EmbeddingCache<S> {
    pub fn new(store: S, provider: Arc<dyn EmbeddingProvider>, timeout: Duration) -> Self {
        Self::with_capacity(store, provider, timeout, DEFAULT_L1_CAPACITY)
    }

    /// Creates a cache whose L1 holds at most `capacity` vectors.
    pub fn with_capacity(
        store: S,
        provider: Arc<dyn EmbeddingProvider>,
        timeout: Duration,
        capacity: u64,
    ) -> Self {
        Self {
            l1: Cache::builder().max_capacity(capacity).build(),
            store,
            provider,
            timeout,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Returns the vector for `text`, computing it at most once per key.
    pub async fn resolve_vector(
        &self,
        kind: EntityKind,
        entity_id: u64,
        text: &str,
    ) -> CacheResult<Vector> {
        self.resolve_with_status(kind, entity_id, text)
            .await
            .map(|(vector, _)| vector)
    }

    #[instrument(skip(self, text), fields(kind = %kind, entity_id = entity_id, text_len = text.len()))]
    pub async fn resolve_with_status(
        &self,
        kind: EntityKind,
        entity_id: u64,
        text: &str,
    ) -> CacheResult<(Vector, CacheStatus)> {
        let key = CacheKey::for_text(kind, entity_id, text);

        if let Some(vector) = self.l1.get(&key) {
            debug!("L1 hit");
            return Ok((vector, CacheStatus::HitL1));
        }

        if let Some(vector) = self.store.read_cached_vector(&key).await? {
            debug!("Store hit");
            self.l1.insert(key, vector.clone());
            return Ok((vector, CacheStatus::HitStore));
        }

        debug!(provider = self.provider.name(), "Cache miss, calling provider");
        let vector = self
            .fetch(text)
            .await
            .map_err(|source| CacheError::EmbeddingUnavailable {
                kind,
                entity_id,
                source,
            })?;

        match self.store.insert_vector_if_absent(key, vector.clone()).await {
            Ok(true) => {
                self.l1.insert(key, vector.clone());
            }
            Ok(false) => {
                // Another resolver persisted first; its copy is the one served from now on.
                debug!("Concurrent insert already persisted this key");
            }
            Err(e) => {
                warn!(error = %e, "Failed to persist embedding; returning uncached vector");
            }
        }

        Ok((vector, CacheStatus::Miss))
    }

    async fn fetch(&self, text: &str) -> Result<Vector, EmbeddingError> {
        let raw = tokio::time::timeout(self.timeout, self.provider.get_vector(text))
            .await
            .map_err(|_| EmbeddingError::Timeout {
                millis: self.timeout.as_millis() as u64,
            })??;

        validate_vector(&raw)?;
        Ok(raw.into())
    }

    /// Number of vectors currently held in L1.
    pub fn l1_len(&self) -> u64 {
        self.l1.run_pending_tasks();
        self.l1.entry_count()
    }

    /// Drops the in-process layer; persisted vectors are untouched.
    pub fn clear_l1(&self) {
        self.l1.invalidate_all();
    }
}

fn validate_vector(vector: &[f32]) -> Result<(), EmbeddingError> {
    if vector.is_empty() {
        return Err(EmbeddingError::MalformedResponse {
            reason: "empty vector".to_string(),
        });
    }
    if let Some(pos) = vector.iter().position(|x| !x.is_finite()) {
        return Err(EmbeddingError::MalformedResponse {
            reason: format!("non-finite value at index {pos}"),
        });
    }
    Ok(())
}
