//! Embedding cache: in-process L1 in front of the persisted vector table.

pub mod embedding_cache;
pub mod error;
pub mod types;


pub use embedding_cache::EmbeddingCache;
pub use error::{CacheError, CacheResult};
pub use types::{CacheKey, CacheStatus, Vector};
