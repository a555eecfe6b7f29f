use thiserror::Error;

use crate::ranking::RankingError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    #[error("user {id} is not a worker")]
    NotAWorker { id: u64 },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ranking(#[from] RankingError),
}
