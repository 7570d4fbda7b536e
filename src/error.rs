//! Error types for the layout subsystem.

use thiserror::Error;

/// Errors produced by measurement and layout operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A layout bound was out of range (for example a wrap width of zero).
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: String,
    },

    /// Font metrics could not be initialised. Every measurement fails with
    /// this error once initialisation has failed.
    #[error("text metrics unavailable: {0}")]
    Unavailable(String),

    /// Metrics were installed after the process-wide source was already set.
    #[error("text metrics already initialised")]
    AlreadyInitialized,
}

impl LayoutError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
