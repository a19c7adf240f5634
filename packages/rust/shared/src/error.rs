//! Error types for LeadScout.
//!
//! Library crates use [`LeadScoutError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! No error ever escapes the discovery pipeline itself — adapters and the
//! verifier recover internally and degrade to empty or fallback output.
//! These variants exist for the inner seams (config loading, provider
//! internals, the CLI surface) where a `Result` is still the right shape.

use thiserror::Error;

/// Top-level error type for all LeadScout operations.
#[derive(Debug, Error)]
pub enum LeadScoutError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while talking to a data provider.
    #[error("network error: {0}")]
    Network(String),

    /// Provider payload could not be parsed into person records.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Input validation error (empty company name, malformed website, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Email verification collaborator error.
    #[error("verification error: {0}")]
    Verification(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LeadScoutError>;

impl LeadScoutError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = LeadScoutError::config("missing provider key");
        assert_eq!(err.to_string(), "config error: missing provider key");

        let err = LeadScoutError::validation("company name is empty");
        assert!(err.to_string().contains("company name is empty"));
    }
}
