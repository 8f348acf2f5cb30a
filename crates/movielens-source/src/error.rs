//! Error types for MovieLens import.

use graph_sink::BackendError;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Errors that abort an import routine.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The input could not be opened or read.
    #[error("Failed to read {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// A row has fewer columns than the layout requires.
    #[error("{source_name} line {line}: missing column '{field}'")]
    MissingField {
        source_name: String,
        line: usize,
        field: &'static str,
    },

    #[error("{source_name} line {line}: invalid integer for '{field}': '{value}' ({source})")]
    InvalidInteger {
        source_name: String,
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{source_name} line {line}: invalid number for '{field}': '{value}' ({source})")]
    InvalidFloat {
        source_name: String,
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend rejected a statement. `line` is the first row of the failed
    /// batch, or 0 for schema statements.
    #[error("{source_name} line {line}: {source}")]
    Backend {
        source_name: String,
        line: usize,
        #[source]
        source: BackendError,
    },
}

impl ImportError {
    /// Whether the failure came from malformed input rather than the backend.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ImportError::MissingField { .. }
                | ImportError::InvalidInteger { .. }
                | ImportError::InvalidFloat { .. }
        )
    }

    pub fn backend_error(&self) -> Option<&BackendError> {
        match self {
            ImportError::Backend { source, .. } => Some(source),
            _ => None,
        }
    }
}
