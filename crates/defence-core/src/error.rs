//! Error types.
//!
//! Per-frame operations are infallible: absent capabilities, pool
//! exhaustion and redundant releases degrade to `None` or a no-op. The only
//! fallible surface is loading a [`SimConfig`](crate::config::SimConfig).

/// Configuration loading and validation errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The JSON text could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is outside its valid range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    /// Builds a [`ConfigError::Invalid`].
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
