//! Error model for identifier parsing and configuration.

use thiserror::Error;

/// Result type used by the core crates.
pub type CoreResult<T> = Result<T, CoreError>;

/// Core-level error.
///
/// Scope resolution itself never fails; missing data is "not ready", not an
/// error. These variants cover the edges where a caller asks for something
/// strict (parsing an identifier, loading configuration).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An identifier was blank or otherwise unusable.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
