use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{ExplanationContext, ExplanationError, ExplanationProvider};

/// Scriptable explanation provider.
///
/// Replies with `{"why": "<title> fits your skills"}` unless a fixed reply,
/// a failure or a delay has been configured.
#[derive(Default)]
pub struct MockExplanationProvider {
    reply: RwLock<Option<String>>,
    fail_all: AtomicBool,
    delay: RwLock<Option<Duration>>,
    calls: AtomicUsize,
}

impl MockExplanationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `reply` verbatim for every request.
    pub fn set_reply(&self, reply: &str) {
        *self.reply.write() = Some(reply.to_string());
    }

    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::Release);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Acquire)
    }
}

#[async_trait]
impl ExplanationProvider for MockExplanationProvider {
    async fn get_explanation(&self, ctx: &ExplanationContext) -> Result<String, ExplanationError> {
        self.calls.fetch_add(1, Ordering::AcqRel);

        let delay = *self.delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_all.load(Ordering::Acquire) {
            return Err(ExplanationError::RequestFailed {
                reason: "mock failure".to_string(),
            });
        }

        if let Some(reply) = self.reply.read().clone() {
            return Ok(reply);
        }

        Ok(serde_json::json!({ "why": format!("{} fits your skills", ctx.job.title) }).to_string())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
