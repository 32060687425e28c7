//! Error types shared by the introspection, transformation and rendering crates.

use thiserror::Error;

/// Errors raised while inspecting, transforming or rendering records.
#[derive(Debug, Error)]
pub enum Error {
    /// The value does not have the shape the operation needs.
    #[error("unsupported input: expected {expected}, found {found}")]
    UnsupportedInputShape {
        expected: &'static str,
        found: String,
    },

    /// A segment of a dotted path names no field of the current record.
    #[error("field '{segment}' not found while resolving '{path}'")]
    FieldNotFound { path: String, segment: String },

    /// An intermediate path segment resolved to something other than a record.
    #[error("'{segment}' in '{path}' is not a record")]
    NotARecord { path: String, segment: String },

    /// The field kind cannot be used by the operation (e.g. sorting on a record).
    #[error("field '{field}' of kind {kind} cannot be used here")]
    TypeMismatch { field: String, kind: &'static str },

    /// A malformed argument: bad pattern, bad width, ragged grid and so on.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Shorthand for [`Error::UnsupportedInputShape`].
    pub fn unsupported(expected: &'static str, found: impl Into<String>) -> Self {
        Error::UnsupportedInputShape {
            expected,
            found: found.into(),
        }
    }
}

/// Result type for tabula operations.
pub type Result<T> = std::result::Result<T, Error>;
