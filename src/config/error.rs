//! Configuration error types.

use thiserror::Error;

use crate::signals::ParsePointsError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value could not be parsed into the expected type.
    #[error("failed to parse {name}='{value}': {reason}")]
    ParseError {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Value parsed but falls outside its allowed range.
    #[error("invalid {name}={value}: {expected}")]
    OutOfRange {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    /// `FEED_BEHAVIOR_POINTS` is not a valid `kind=points` list.
    #[error("invalid behavior points '{value}': {source}")]
    InvalidBehaviorPoints {
        value: String,
        #[source]
        source: ParsePointsError,
    },

    /// A required string setting was blank.
    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}
