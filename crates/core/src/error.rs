//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Store operations themselves never fail on data: lookups that miss are
/// no-ops and dangling references are tolerated. What remains are parse
/// failures at the edges and misuse of the access pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The API was used outside of the context it requires
    /// (e.g. reading the active store outside a store scope).
    #[error("usage error: {0}")]
    Usage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// True for misuse of the API, as opposed to a data-level condition.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
