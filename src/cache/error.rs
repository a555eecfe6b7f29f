use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::model::EntityKind;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CacheError {
    /// The provider failed, timed out, or returned something that is not a
    /// usable vector.
    #[error("embedding unavailable for {kind} {entity_id}: {source}")]
    EmbeddingUnavailable {
        kind: EntityKind,
        entity_id: u64,
        #[source]
        source: EmbeddingError,
    },

    #[error("vector store error: {0}")]
    Store(#[from] StoreError),
}

pub type CacheResult<T> = Result<T, CacheError>;
