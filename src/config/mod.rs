//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `FEED_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_EMBED_MODEL, DEFAULT_EXPLAIN_CONTEXT, DEFAULT_EXPLAIN_LIMIT,
    DEFAULT_EXPLORE_RATE, DEFAULT_JOB_POOL_LIMIT, DEFAULT_L1_CAPACITY, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_OPENAI_BASE_URL, DEFAULT_PROVIDER_TIMEOUT_MS, DEFAULT_WORKER_POOL_LIMIT,
};
use crate::ranking::RankingPolicy;
use crate::signals::{BehaviorPoints, SignalPolicy};

/// Feed configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `FEED_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// API key for the embedding and chat providers. `None` selects the
    /// offline embedder and disables explanations.
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API used for embeddings and chat.
    /// Default: `https://api.openai.com/v1`.
    pub openai_base_url: String,

    /// Default: `text-embedding-3-small`.
    pub embed_model: String,

    /// Default: `gpt-4o-mini`.
    pub chat_model: String,

    /// Extra line appended to the explanation system prompt.
    pub explain_context: String,

    /// Timeout for every provider call. Default: 10s.
    pub provider_timeout: Duration,

    /// Bound on concurrent per-candidate work. Default: `8`.
    pub max_concurrency: usize,

    /// Share of a page reserved for exploration, in `[0, 1]`. Default: `0.15`.
    pub explore_rate: f64,

    /// Provider-written explanations per page. Default: `8`.
    pub explain_limit: usize,

    /// Max vectors in the in-memory L1. Default: `10_000`.
    pub l1_capacity: u64,

    pub job_pool_limit: usize,
    pub worker_pool_limit: usize,

    /// Behavior points, logistic divisor and trust calibration.
    pub signals: SignalPolicy,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("embed_model", &self.embed_model)
            .field("chat_model", &self.chat_model)
            .field("provider_timeout", &self.provider_timeout)
            .field("max_concurrency", &self.max_concurrency)
            .field("explore_rate", &self.explore_rate)
            .field("explain_limit", &self.explain_limit)
            .field("l1_capacity", &self.l1_capacity)
            .field("job_pool_limit", &self.job_pool_limit)
            .field("worker_pool_limit", &self.worker_pool_limit)
            .field("signals", &self.signals)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            explain_context: DEFAULT_EXPLAIN_CONTEXT.to_string(),
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            explore_rate: DEFAULT_EXPLORE_RATE,
            explain_limit: DEFAULT_EXPLAIN_LIMIT,
            l1_capacity: DEFAULT_L1_CAPACITY,
            job_pool_limit: DEFAULT_JOB_POOL_LIMIT,
            worker_pool_limit: DEFAULT_WORKER_POOL_LIMIT,
            signals: SignalPolicy::default(),
        }
    }
}

impl Config {
    const ENV_API_KEY: &'static str = "FEED_OPENAI_API_KEY";
    const ENV_API_KEY_FALLBACK: &'static str = "OPENAI_API_KEY";
    const ENV_BASE_URL: &'static str = "FEED_OPENAI_BASE_URL";
    const ENV_EMBED_MODEL: &'static str = "FEED_EMBED_MODEL";
    const ENV_CHAT_MODEL: &'static str = "FEED_CHAT_MODEL";
    const ENV_EXPLAIN_CONTEXT: &'static str = "FEED_EXPLAIN_CONTEXT";
    const ENV_PROVIDER_TIMEOUT_MS: &'static str = "FEED_PROVIDER_TIMEOUT_MS";
    const ENV_MAX_CONCURRENCY: &'static str = "FEED_MAX_CONCURRENCY";
    const ENV_EXPLORE_RATE: &'static str = "FEED_EXPLORE_RATE";
    const ENV_EXPLAIN_LIMIT: &'static str = "FEED_EXPLAIN_LIMIT";
    const ENV_L1_CAPACITY: &'static str = "FEED_L1_CAPACITY";
    const ENV_JOB_POOL_LIMIT: &'static str = "FEED_JOB_POOL_LIMIT";
    const ENV_WORKER_POOL_LIMIT: &'static str = "FEED_WORKER_POOL_LIMIT";
    const ENV_BEHAVIOR_POINTS: &'static str = "FEED_BEHAVIOR_POINTS";
    const ENV_BEHAVIOR_DIVISOR: &'static str = "FEED_BEHAVIOR_DIVISOR";
    const ENV_TRUST_WINDOW: &'static str = "FEED_TRUST_WINDOW";
    const ENV_TRUST_BASELINE_STARS: &'static str = "FEED_TRUST_BASELINE_STARS";
    const ENV_CANCEL_PENALTY: &'static str = "FEED_CANCEL_PENALTY";
    const ENV_CANCEL_PENALTY_CAP: &'static str = "FEED_CANCEL_PENALTY_CAP";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let openai_api_key = Self::parse_optional_string_from_env(Self::ENV_API_KEY)
            .or_else(|| Self::parse_optional_string_from_env(Self::ENV_API_KEY_FALLBACK));
        let openai_base_url = Self::parse_string_from_env(Self::ENV_BASE_URL, defaults.openai_base_url);
        let embed_model = Self::parse_string_from_env(Self::ENV_EMBED_MODEL, defaults.embed_model);
        let chat_model = Self::parse_string_from_env(Self::ENV_CHAT_MODEL, defaults.chat_model);
        let explain_context =
            Self::parse_string_from_env(Self::ENV_EXPLAIN_CONTEXT, defaults.explain_context);

        let timeout_ms = Self::parse_from_env(
            Self::ENV_PROVIDER_TIMEOUT_MS,
            defaults.provider_timeout.as_millis() as u64,
        )?;

        let mut signals = defaults.signals;
        signals.behavior.points = Self::parse_behavior_points_from_env(signals.behavior.points)?;
        signals.behavior.divisor =
            Self::parse_from_env(Self::ENV_BEHAVIOR_DIVISOR, signals.behavior.divisor)?;
        signals.trust.window = Self::parse_from_env(Self::ENV_TRUST_WINDOW, signals.trust.window)?;
        signals.trust.baseline_stars =
            Self::parse_from_env(Self::ENV_TRUST_BASELINE_STARS, signals.trust.baseline_stars)?;
        signals.trust.cancel_penalty =
            Self::parse_from_env(Self::ENV_CANCEL_PENALTY, signals.trust.cancel_penalty)?;
        signals.trust.cancel_penalty_cap =
            Self::parse_from_env(Self::ENV_CANCEL_PENALTY_CAP, signals.trust.cancel_penalty_cap)?;

        Ok(Self {
            openai_api_key,
            openai_base_url,
            embed_model,
            chat_model,
            explain_context,
            provider_timeout: Duration::from_millis(timeout_ms),
            max_concurrency: Self::parse_from_env(
                Self::ENV_MAX_CONCURRENCY,
                defaults.max_concurrency,
            )?,
            explore_rate: Self::parse_from_env(Self::ENV_EXPLORE_RATE, defaults.explore_rate)?,
            explain_limit: Self::parse_from_env(Self::ENV_EXPLAIN_LIMIT, defaults.explain_limit)?,
            l1_capacity: Self::parse_from_env(Self::ENV_L1_CAPACITY, defaults.l1_capacity)?,
            job_pool_limit: Self::parse_from_env(Self::ENV_JOB_POOL_LIMIT, defaults.job_pool_limit)?,
            worker_pool_limit: Self::parse_from_env(
                Self::ENV_WORKER_POOL_LIMIT,
                defaults.worker_pool_limit,
            )?,
            signals,
        })
    }

    /// Checks ranges and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.explore_rate) {
            return Err(Self::out_of_range(
                Self::ENV_EXPLORE_RATE,
                self.explore_rate,
                "must be between 0 and 1",
            ));
        }
        if self.max_concurrency == 0 {
            return Err(Self::out_of_range(Self::ENV_MAX_CONCURRENCY, 0, "must be at least 1"));
        }
        if self.provider_timeout.is_zero() {
            return Err(Self::out_of_range(
                Self::ENV_PROVIDER_TIMEOUT_MS,
                0,
                "must be at least 1",
            ));
        }
        if self.job_pool_limit == 0 {
            return Err(Self::out_of_range(Self::ENV_JOB_POOL_LIMIT, 0, "must be at least 1"));
        }
        if self.worker_pool_limit == 0 {
            return Err(Self::out_of_range(Self::ENV_WORKER_POOL_LIMIT, 0, "must be at least 1"));
        }
        if self.openai_base_url.trim().is_empty() {
            return Err(ConfigError::Empty {
                name: Self::ENV_BASE_URL,
            });
        }

        let behavior = &self.signals.behavior;
        if !(behavior.divisor.is_finite() && behavior.divisor > 0.0) {
            return Err(Self::out_of_range(
                Self::ENV_BEHAVIOR_DIVISOR,
                behavior.divisor,
                "must be a positive number",
            ));
        }

        let trust = &self.signals.trust;
        if trust.window == 0 {
            return Err(Self::out_of_range(Self::ENV_TRUST_WINDOW, 0, "must be at least 1"));
        }
        if !(0.0..=trust.max_stars).contains(&trust.baseline_stars) {
            return Err(Self::out_of_range(
                Self::ENV_TRUST_BASELINE_STARS,
                trust.baseline_stars,
                "must be between 0 and 5",
            ));
        }
        if !(trust.cancel_penalty.is_finite() && trust.cancel_penalty >= 0.0) {
            return Err(Self::out_of_range(
                Self::ENV_CANCEL_PENALTY,
                trust.cancel_penalty,
                "must not be negative",
            ));
        }
        if !(0.0..=1.0).contains(&trust.cancel_penalty_cap) {
            return Err(Self::out_of_range(
                Self::ENV_CANCEL_PENALTY_CAP,
                trust.cancel_penalty_cap,
                "must be between 0 and 1",
            ));
        }

        Ok(())
    }

    /// Ranking tunables derived from this configuration.
    pub fn ranking_policy(&self) -> RankingPolicy {
        RankingPolicy {
            explore_rate: self.explore_rate,
            max_concurrency: self.max_concurrency,
            provider_timeout: self.provider_timeout,
            l1_capacity: self.l1_capacity,
            signals: self.signals,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.openai_api_key.is_some()
    }

    fn out_of_range(name: &'static str, value: impl Display, expected: &'static str) -> ConfigError {
        ConfigError::OutOfRange {
            name,
            value: value.to_string(),
            expected,
        }
    }

    fn parse_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::ParseError {
                    name: var_name,
                    value: value.clone(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_behavior_points_from_env(default: BehaviorPoints) -> Result<BehaviorPoints, ConfigError> {
        match env::var(Self::ENV_BEHAVIOR_POINTS) {
            Ok(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidBehaviorPoints { value, source }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
