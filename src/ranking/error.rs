use thiserror::Error;

use crate::store::StoreError;

/// Failures that abort a ranking pass.
///
/// Provider problems never surface here: they degrade individual items.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("store error during ranking: {0}")]
    Store(#[from] StoreError),
}

pub type RankingResult<T> = Result<T, RankingError>;
