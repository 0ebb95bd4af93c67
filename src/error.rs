//! Error types for the streaming reconciliation engine.

use thiserror::Error;

/// Result type alias for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur while mutating the host document.
///
/// The engine itself raises no errors beyond what the host editor reports:
/// empty inputs are defined no-ops, not failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StreamError {
    /// Index out of bounds for node list operations.
    #[error("Index {index} out of bounds for document of length {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    /// Host editor failure, propagated to the caller unchanged.
    /// No partial-state repair is attempted.
    #[error("Host editor error: {0}")]
    Host(String),
}

impl StreamError {
    /// Creates an IndexOutOfBounds error.
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::IndexOutOfBounds { index, length }
    }

    /// Creates a Host error.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }
}
