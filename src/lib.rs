//! Smart feed library crate (used by the CLI and integration tests).
//!
//! # Public API Surface
//!
//! ## Ranking
//! - [`FeedService`] - actor lookup, pool loading and page clamping
//! - [`FeedRanker`], [`RankingPolicy`] - `rank_jobs_for_worker` / `rank_workers_for_job`
//! - [`RankedPage`], [`JobFeedItem`], [`WorkerMatch`] - ranked output
//!
//! ## Building Blocks
//! - [`EmbeddingCache`] - content-addressed vector cache (moka L1 + store)
//! - [`signals`] - similarity, location, availability, trust, behavior, freshness
//! - [`Weights`], [`WeightProfile`], [`SignalBreakdown`] - composite scoring
//! - [`ExplorationMixer`] - exploit head plus shuffled exploration tail
//! - [`Explainer`] - bounded, fallback-safe match explanations
//!
//! ## Collaborators
//! - [`EmbeddingProvider`]: [`OpenAiEmbedder`], [`HashingEmbedder`]
//! - [`ExplanationProvider`]: [`GenaiExplanationProvider`]
//! - [`VectorStore`], [`SignalStore`], [`RecordStore`]: [`MemoryStore`]
//!
//! ## Test/Mock Support
//! Mock providers are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod explain;
pub mod exploration;
pub mod feed;
pub mod hashing;
pub mod model;
pub mod ranking;
pub mod scoring;
pub mod signals;
pub mod store;

pub use cache::{CacheError, CacheKey, CacheStatus, EmbeddingCache, Vector};
pub use config::{Config, ConfigError};
pub use embedding::{EmbeddingError, EmbeddingProvider, HashingEmbedder, OpenAiEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use explain::{
    Explainer, ExplanationContext, ExplanationError, ExplanationProvider,
    GenaiExplanationProvider,
};
#[cfg(any(test, feature = "mock"))]
pub use explain::MockExplanationProvider;
pub use exploration::ExplorationMixer;
pub use feed::{FeedError, FeedService};
pub use hashing::{ContentHash, hash_text};
pub use model::{EventKind, InteractionEvent, Job, PartyKind, Rating, Role, TargetKind, User};
pub use ranking::{FeedRanker, JobFeedItem, RankedPage, RankingError, RankingPolicy, WorkerMatch};
pub use scoring::{ScoredCandidate, SignalBreakdown, WeightProfile, Weights};
pub use signals::SignalPolicy;
pub use store::{MemoryStore, RecordStore, SignalStore, StoreError, VectorStore};
