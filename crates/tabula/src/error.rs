//! Error type for script evaluation, configuration and help lookup.

use thiserror::Error;

/// Errors returned by the `tabula` entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// An introspection or conversion error outside of a template.
    #[error(transparent)]
    Reflect(#[from] tabula_reflect::Error),

    /// Template syntax error, or an error raised while rendering. Errors from
    /// the table functions are kept as the source.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Writing to the output sink or reading a config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Help was requested for a function that is not enabled.
    #[error("function '{0}' is not enabled")]
    UnknownFunction(String),

    /// A custom function was registered under a name already in use.
    #[error("function '{0}' is already defined")]
    DuplicateFunction(String),
}

/// Result type for the `tabula` entry points.
pub type Result<T> = std::result::Result<T, Error>;
