//! Backend error type shared by all sinks.

use thiserror::Error;

/// Failure reported by the graph backend while executing a statement.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// An equivalent schema rule (constraint or index) already exists.
    #[error("schema rule already exists ({code}): {message}")]
    AlreadyExists { code: String, message: String },

    /// The backend refused the statement.
    #[error("statement rejected ({code}): {message}")]
    Rejected { code: String, message: String },

    /// Connection error
    #[error("connection error: {0}")]
    Connection(String),

    /// Transaction could not be opened, committed or rolled back.
    #[error("transaction error: {0}")]
    Transaction(String),
}

impl BackendError {
    pub fn is_already_exists(&self) -> bool {
        matches!(self, BackendError::AlreadyExists { .. })
    }
}
