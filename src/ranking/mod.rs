//! The feed ranking engine.
//!
//! [`FeedRanker`] resolves embeddings through the cache, computes the signal
//! breakdown for every candidate, scores it with the direction's weight
//! profile, mixes in exploration (worker feeds only) and attaches
//! explanations to the top of the page.

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::FeedRanker;
pub use error::{RankingError, RankingResult};
pub use types::{JobFeedItem, RankedPage, RankingPolicy, WorkerMatch};
