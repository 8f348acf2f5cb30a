//! Uniqueness constraints declared before any node is written.

use crate::error::ImportError;
use crate::statements::Constraint;
use graph_sink::GraphSink;
use tracing::{error, info, warn};

/// Declare the given unique constraints, in order.
///
/// Re-declaring an existing constraint is a no-op: the templates use
/// `IF NOT EXISTS`, and a backend that still reports the rule as already
/// existing is tolerated. Any other backend error aborts the import.
///
/// Returns the number of statements sent to the sink.
pub async fn ensure_constraints<S: GraphSink>(
    sink: &S,
    constraints: &[Constraint],
    source_name: &str,
) -> Result<u64, ImportError> {
    let mut executed = 0;

    for constraint in constraints {
        info!(
            "Ensuring unique constraint {} on :{}({})",
            constraint.name, constraint.label, constraint.property
        );
        executed += 1;

        match sink.execute(&constraint.statement()).await {
            Ok(()) => {}
            Err(e) if e.is_already_exists() => {
                warn!("Constraint {} already exists: {e}", constraint.name);
            }
            Err(e) => {
                error!(
                    source = source_name,
                    constraint = constraint.name,
                    statement = constraint.template(),
                    "Failed to declare constraint: {e}"
                );
                return Err(ImportError::Backend {
                    source_name: source_name.to_string(),
                    line: 0,
                    source: e,
                });
            }
        }
    }

    Ok(executed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::{MOVIE_CONSTRAINTS, RATING_CONSTRAINTS};
    use crate::testing::MemoryGraph;
    use graph_sink::BackendError;

    #[tokio::test]
    async fn test_declares_constraints() {
        let graph = MemoryGraph::new();
        let executed = ensure_constraints(&graph, MOVIE_CONSTRAINTS, "movies.csv")
            .await
            .unwrap();

        assert_eq!(executed, 2);
        let state = graph.snapshot();
        assert!(state.constraints.contains("unique_movie_id"));
        assert!(state.constraints.contains("unique_genre_name"));
        assert!(!state.constraints.contains("unique_user_id"));
    }

    #[tokio::test]
    async fn test_twice_is_not_an_error() {
        let graph = MemoryGraph::new();
        for _ in 0..2 {
            ensure_constraints(&graph, RATING_CONSTRAINTS, "ratings.csv")
                .await
                .unwrap();
        }
        assert_eq!(graph.snapshot().constraints.len(), 1);
    }

    #[tokio::test]
    async fn test_already_exists_error_is_tolerated() {
        let graph = MemoryGraph::new().with_strict_schema();
        ensure_constraints(&graph, MOVIE_CONSTRAINTS, "movies.csv")
            .await
            .unwrap();
        // The strict graph reports AlreadyExists on re-declaration.
        ensure_constraints(&graph, MOVIE_CONSTRAINTS, "movies.csv")
            .await
            .unwrap();
        assert_eq!(graph.snapshot().constraints.len(), 2);
    }

    #[tokio::test]
    async fn test_other_errors_abort() {
        let graph = MemoryGraph::new().failing_after(1);
        let err = ensure_constraints(&graph, MOVIE_CONSTRAINTS, "movies.csv")
            .await
            .unwrap_err();

        assert!(matches!(
            err.backend_error(),
            Some(BackendError::Connection(_))
        ));
        assert!(matches!(err, ImportError::Backend { line: 0, .. }));
        assert_eq!(graph.snapshot().constraints.len(), 1);
    }
}
