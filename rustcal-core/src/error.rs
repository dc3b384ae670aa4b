//! Error types for rustcal-core.

use thiserror::Error;

/// Result type alias for rustcal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for rustcal operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid detector constant value.
    #[error("invalid detector constant {name}: {value}")]
    InvalidConstant { name: &'static str, value: f64 },

    /// Event sink rejected a digitized event.
    #[error("event sink error: {0}")]
    Sink(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
