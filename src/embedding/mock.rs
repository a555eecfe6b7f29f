use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{EmbeddingError, EmbeddingProvider, HashingEmbedder};

/// Scriptable embedder: hashing vectors by default, with per-text failures,
/// malformed outputs, fixed vectors and an artificial delay.
#[derive(Default)]
pub struct MockEmbedder {
    inner: HashingEmbedder,
    fixed: RwLock<HashMap<String, Vec<f32>>>,
    failing: RwLock<HashSet<String>>,
    fail_all: std::sync::atomic::AtomicBool,
    delay: RwLock<Option<Duration>>,
    calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `vector` for exactly `text`.
    pub fn set_vector(&self, text: &str, vector: Vec<f32>) {
        self.fixed.write().insert(text.to_string(), vector);
    }

    /// Fails requests whose text contains `needle`.
    pub fn fail_on(&self, needle: &str) {
        self.failing.write().insert(needle.to_string());
    }

    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::Release);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write() = Some(delay);
    }

    /// Number of `get_vector` calls observed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Acquire)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn get_vector(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::AcqRel);

        let delay = *self.delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_all.load(Ordering::Acquire)
            || self.failing.read().iter().any(|n| text.contains(n.as_str()))
        {
            return Err(EmbeddingError::RequestFailed {
                reason: "mock failure".to_string(),
            });
        }

        if let Some(vector) = self.fixed.read().get(text) {
            return Ok(vector.clone());
        }

        Ok(self.inner.embed(text))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
