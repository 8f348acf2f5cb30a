//! GraphSink trait definition.

use crate::{BackendError, Statement};

/// Trait for executing parameterized write statements against a graph store.
///
/// # Usage Pattern
///
/// Importers use generics for zero-cost dispatch:
///
/// ```ignore
/// pub async fn import_movies<S: GraphSink>(sink: &S, config: &ImportConfig) -> Result<()> {
///     sink.execute(&statement).await?;
/// }
/// ```
///
/// The CLI entry point picks the sink once (live backend or dry run) and
/// everything below it is monomorphized for that implementation.
#[async_trait::async_trait]
pub trait GraphSink: Send + Sync {
    /// Execute one statement in its own implicit transaction.
    async fn execute(&self, statement: &Statement) -> Result<(), BackendError>;

    /// Execute statements in order as one unit.
    ///
    /// The default runs them one at a time, so a failure leaves the earlier
    /// statements applied. Backends with explicit transactions override this
    /// to make the whole batch atomic.
    async fn execute_batch(&self, statements: &[Statement]) -> Result<(), BackendError> {
        for statement in statements {
            self.execute(statement).await?;
        }
        Ok(())
    }
}
