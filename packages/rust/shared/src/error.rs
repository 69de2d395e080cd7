//! Error types for ReviewHarvest.
//!
//! Library crates use [`HarvestError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all ReviewHarvest operations.
///
/// Only [`HarvestError::MalformedReference`] and [`HarvestError::Config`] abort
/// a harvest run; network and parse failures are absorbed per region.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// The source reference carries no numeric product identifier.
    #[error("malformed reference '{reference}': expected an /id<digits> segment")]
    MalformedReference { reference: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error (client construction, request, body read).
    #[error("network error: {0}")]
    Network(String),

    /// Response body or entry decoding error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Tabular export error.
    #[error("export error: {0}")]
    Export(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HarvestError>;

impl HarvestError {
    /// Create a malformed-reference error for the given input.
    pub fn malformed_reference(reference: impl Into<String>) -> Self {
        Self::MalformedReference {
            reference: reference.into(),
        }
    }

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

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error must abort a run before any network activity.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedReference { .. } | Self::Config { .. })
    }
}
