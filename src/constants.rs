//! Cross-cutting, shared constants.
//!
//! Ranking-policy values here are defaults only. Everything that is product
//! policy (explore rate, caps, signal calibration) can be overridden through
//! [`crate::config::Config`].

/// Text attached to feed items when no explanation could be produced.
pub const FALLBACK_EXPLANATION: &str = "Recommended based on fit.";

/// Hard cap on explanation length (characters, not bytes).
pub const EXPLANATION_MAX_CHARS: usize = 180;

/// Length the explanation provider is asked to stay under.
pub const EXPLANATION_TARGET_CHARS: usize = 160;

/// Default share of a feed page reserved for exploration.
pub const DEFAULT_EXPLORE_RATE: f64 = 0.15;

/// Pools at or below this size are never reshuffled.
pub const MIN_EXPLORATION_POOL: usize = 3;

/// Default number of top feed items that get a provider-written explanation.
pub const DEFAULT_EXPLAIN_LIMIT: usize = 8;

/// Default bound on concurrent provider calls within one ranking pass.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Default provider call timeout.
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;

/// Default in-process vector cache capacity.
pub const DEFAULT_L1_CAPACITY: u64 = 10_000;

/// Newest jobs considered for a worker feed.
pub const DEFAULT_JOB_POOL_LIMIT: usize = 80;

/// Newest workers considered for a job's candidate list.
pub const DEFAULT_WORKER_POOL_LIMIT: usize = 200;

/// Page size bounds applied by [`crate::feed::FeedService`].
pub const MIN_PAGE_SIZE: usize = 5;
pub const MAX_PAGE_SIZE: usize = 30;
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Rows returned by the store's listing calls.
pub const LIST_LIMIT: usize = 50;

/// Upper bound on recorded dwell time for an interaction event.
pub const MAX_DWELL_SECONDS: u32 = 3_600;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EXPLAIN_CONTEXT: &str = "Tunisian tourism context.";

/// Dimension of the offline [`crate::embedding::HashingEmbedder`].
pub const HASHING_EMBEDDING_DIM: usize = 256;
