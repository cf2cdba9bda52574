//! Error types for configuration and high-score persistence

use std::num::ParseFloatError;

use thiserror::Error;

/// Failure to build a usable [`crate::Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure to read or write the persisted high score
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score storage unavailable: {0}")]
    Unavailable(String),

    #[error("stored high score {value:?} is not a valid score")]
    Corrupt {
        value: String,
        #[source]
        source: Option<ParseFloatError>,
    },

    #[error("failed to write high score: {0}")]
    Write(String),
}
