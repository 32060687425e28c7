//! Dotted-path resolution.
//!
//! Paths such as `"User.Credentials.Name"` are walked one segment at a time.
//! The walk reports its outcome as a [`Lookup`] instead of an error so callers
//! can decide whether a miss is fatal.

use crate::error::{Error, Result};

/// Outcome of walking a dotted path.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// Every segment resolved.
    Found(T),
    /// The named segment does not exist in the record reached so far.
    NotFound(String),
    /// The named segment exists but is not a record, so the walk cannot go on.
    NotARecord(String),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::NotFound(s) => Lookup::NotFound(s),
            Lookup::NotARecord(s) => Lookup::NotARecord(s),
        }
    }

    /// Converts the outcome into a `Result`, naming `path` in the error.
    pub fn into_result(self, path: &str) -> Result<T> {
        match self {
            Lookup::Found(v) => Ok(v),
            Lookup::NotFound(segment) => Err(Error::FieldNotFound {
                path: path.to_string(),
                segment,
            }),
            Lookup::NotARecord(segment) => Err(Error::NotARecord {
                path: path.to_string(),
                segment,
            }),
        }
    }
}

/// Splits a dotted path into its segments.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('.')
}
