//! Text-embedding providers.
//!
//! - [`OpenAiEmbedder`] calls an OpenAI-compatible `/embeddings` endpoint.
//! - [`HashingEmbedder`] is an offline, deterministic bag-of-words embedder
//!   used when no API key is configured, and by tests.

mod error;
/// Offline feature-hashing embedder.
pub mod hashing;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// OpenAI-compatible HTTP embedder.
pub mod openai;

pub use error::EmbeddingError;
pub use hashing::HashingEmbedder;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use openai::OpenAiEmbedder;

use async_trait::async_trait;

#[async_trait]
/// Source of fixed-length vectors for arbitrary text.
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds `text`. Implementations should not retry internally beyond
    /// what keeps a single call bounded; callers apply their own timeout.
    async fn get_vector(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Short label for logs.
    fn name(&self) -> &str;
}
