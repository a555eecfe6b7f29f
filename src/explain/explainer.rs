use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use serde::Deserialize;
use tracing::debug;

use super::{ExplanationContext, ExplanationError, ExplanationProvider};
use crate::constants::{
    DEFAULT_EXPLAIN_LIMIT, DEFAULT_MAX_CONCURRENCY, DEFAULT_PROVIDER_TIMEOUT_MS,
    EXPLANATION_MAX_CHARS, FALLBACK_EXPLANATION,
};

/// Bounded, fallback-safe front for an [`ExplanationProvider`].
///
/// Never fails: anything other than a well-formed, non-empty `why` yields
/// [`FALLBACK_EXPLANATION`].
#[derive(Clone)]
pub struct Explainer {
    provider: Option<Arc<dyn ExplanationProvider>>,
    limit: usize,
    timeout: Duration,
    max_concurrency: usize,
}

impl std::fmt::Debug for Explainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explainer")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("limit", &self.limit)
            .field("timeout", &self.timeout)
            .field("max_concurrency", &self.max_concurrency)
            .finish()
    }
}

impl Default for Explainer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Explainer {
    pub fn new(provider: Arc<dyn ExplanationProvider>) -> Self {
        Self {
            provider: Some(provider),
            ..Self::disabled()
        }
    }

    /// An explainer with no provider: every item gets the fallback.
    pub fn disabled() -> Self {
        Self {
            provider: None,
            limit: DEFAULT_EXPLAIN_LIMIT,
            timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Maximum number of provider calls per page.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Explanation for one match, or the fallback.
    pub async fn explain(&self, ctx: &ExplanationContext) -> String {
        let Some(provider) = &self.provider else {
            return FALLBACK_EXPLANATION.to_string();
        };

        match self.request(provider.as_ref(), ctx).await {
            Ok(why) => why,
            Err(e) => {
                debug!(error = %e, provider = provider.name(), "Explanation unavailable, using fallback");
                FALLBACK_EXPLANATION.to_string()
            }
        }
    }

    /// Explains a page in order. Only the first `limit` contexts reach the
    /// provider; the rest get the fallback without a call.
    pub async fn explain_page(&self, contexts: Vec<ExplanationContext>) -> Vec<String> {
        let total = contexts.len();
        let limit = if self.is_enabled() { self.limit.min(total) } else { 0 };
        let mut contexts = contexts;
        let rest = contexts.split_off(limit);

        let mut out: Vec<String> = stream::iter(contexts.iter())
            .map(|ctx| self.explain(ctx))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        out.extend(rest.iter().map(|_| FALLBACK_EXPLANATION.to_string()));
        debug!(total, explained = limit, "Page explained");
        out
    }

    async fn request(
        &self,
        provider: &dyn ExplanationProvider,
        ctx: &ExplanationContext,
    ) -> Result<String, ExplanationError> {
        let raw = tokio::time::timeout(self.timeout, provider.get_explanation(ctx))
            .await
            .map_err(|_| ExplanationError::Timeout {
                millis: self.timeout.as_millis() as u64,
            })??;
        parse_why(&raw)
    }
}

#[derive(Deserialize)]
struct WhyReply {
    why: Option<String>,
}

/// Extracts `why` from a strict-JSON reply, trimmed and capped at
/// [`EXPLANATION_MAX_CHARS`] characters.
pub fn parse_why(raw: &str) -> Result<String, ExplanationError> {
    let reply: WhyReply = serde_json::from_str(raw.trim())?;
    let why = reply.why.unwrap_or_default();
    let why = why.trim();
    if why.is_empty() {
        return Err(ExplanationError::MalformedResponse {
            reason: "missing or empty 'why'".to_string(),
        });
    }
    Ok(why.chars().take(EXPLANATION_MAX_CHARS).collect())
}
