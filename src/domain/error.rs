//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid values and undecodable audio.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("invalid color '{value}': expected three components 0-255 as r,g,b")]
    InvalidColor { value: String },

    #[error("invalid pair '{value}': expected two numbers as first,second")]
    InvalidPair { value: String },

    #[error("invalid setting '{name}': {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("invalid audio data: {0}")]
    InvalidAudio(String),

    #[error("unsupported audio format: {0}")]
    UnsupportedAudio(String),
}

impl DomainError {
    pub(crate) fn setting(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name,
            reason: reason.into(),
        }
    }
}
