use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplanationError {
    #[error("explanation request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("explanation provider timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("malformed explanation: {reason}")]
    MalformedResponse { reason: String },
}

impl From<genai::Error> for ExplanationError {
    fn from(e: genai::Error) -> Self {
        ExplanationError::RequestFailed {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExplanationError {
    fn from(e: serde_json::Error) -> Self {
        ExplanationError::MalformedResponse {
            reason: e.to_string(),
        }
    }
}
