//! Error and warning types for the exporter.

use thiserror::Error;

/// Main error type for export operations.
///
/// Every variant is fatal: the export is aborted and no document is written.
/// Conditions that only affect a single object are reported as
/// [`ExportWarning`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid export configuration (bad sample rate, empty frame range,
    /// unresolvable output path)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Object not found in the scene (deleted, renamed, or never existed)
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// Document carries a version tag this crate does not understand
    #[error("Unsupported document version: {0}")]
    UnsupportedVersion(u64),

    /// Invalid data structure in a scene snapshot or document
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    /// Whether this error was raised by configuration validation.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal problem recorded while exporting a single object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportWarning {
    /// The object's world transform could not be decomposed; the object was skipped.
    #[error("Skipped '{object}': transform at frame {frame} is not decomposable")]
    DegenerateTransform { object: String, frame: i64 },

    /// The object disappeared mid-sweep; its track ends at the last sampled frame.
    #[error("Lost '{object}' at frame {frame}; track truncated")]
    ObjectLost { object: String, frame: i64 },

    /// The object was gone before it could be sampled; the object was skipped.
    #[error("Skipped '{object}': not found at frame {frame}")]
    ObjectMissing { object: String, frame: i64 },
}

impl ExportWarning {
    /// Name of the object the warning refers to.
    pub fn object(&self) -> &str {
        match self {
            Self::DegenerateTransform { object, .. }
            | Self::ObjectLost { object, .. }
            | Self::ObjectMissing { object, .. } => object,
        }
    }
}
