//! Mapping of driver errors onto `BackendError`.

use graph_sink::BackendError;

/// Classify a `neo4rs` error.
///
/// Server-side failures keep their status code so callers can tell an
/// already-existing schema rule apart from a genuine rejection.
pub fn classify(err: neo4rs::Error) -> BackendError {
    match err {
        neo4rs::Error::Neo4j(e) => from_status(e.code(), e.message()),
        neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError => {
            BackendError::Connection(err.to_string())
        }
        other => BackendError::Rejected {
            code: "Driver".to_string(),
            message: other.to_string(),
        },
    }
}

/// Classify a Neo4j status code (e.g. `Neo.ClientError.Schema.EquivalentSchemaRuleAlreadyExists`).
pub(crate) fn from_status(code: &str, message: &str) -> BackendError {
    if code.ends_with("AlreadyExists") {
        BackendError::AlreadyExists {
            code: code.to_string(),
            message: message.to_string(),
        }
    } else {
        BackendError::Rejected {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}
