//! Natural-language "why" strings for ranked matches.
//!
//! [`ExplanationProvider`] is the seam to a chat model; [`Explainer`] wraps it
//! with a per-page call cap, a timeout and a fixed fallback so explanation
//! problems never fail a ranking.

pub mod chat;
mod context;
mod error;
mod explainer;
#[cfg(any(test, feature = "mock"))]
mod mock;


use async_trait::async_trait;

pub use chat::GenaiExplanationProvider;
pub use context::{ExplanationContext, JobSummary, WorkerSummary};
pub use error::ExplanationError;
pub use explainer::{Explainer, parse_why};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockExplanationProvider;

#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    /// Raw provider reply, expected to be a JSON object with a `why` field.
    async fn get_explanation(&self, ctx: &ExplanationContext) -> Result<String, ExplanationError>;

    fn name(&self) -> &str;
}
