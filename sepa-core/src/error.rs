//! Error types for SEPA message construction

use thiserror::Error;

/// Result type for SEPA operations
pub type Result<T> = std::result::Result<T, Error>;

/// SEPA errors
#[derive(Error, Debug)]
pub enum Error {
    /// A supplied value violates a length, pattern, checksum or amount rule.
    /// Raised before the builder state is touched.
    #[error("Validation error on {field}: {reason}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Builder used out of order (header set twice, group before header)
    #[error("Invalid builder state: {0}")]
    InvalidState(String),

    /// The document could not be marshaled
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Inbound statement does not match the camt.053 schema
    #[error("Malformed statement: {0}")]
    MalformedStatement(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True for [`Error::Validation`]
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}
