//! Sink that accepts everything and writes nothing.

use crate::{BackendError, GraphSink, Statement};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// A `GraphSink` for dry runs: every statement succeeds and is only logged.
#[derive(Debug, Default)]
pub struct DryRunSink {
    executed: AtomicU64,
}

impl DryRunSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of statements that would have been sent to the backend.
    pub fn executed(&self) -> u64 {
        self.executed.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl GraphSink for DryRunSink {
    async fn execute(&self, statement: &Statement) -> Result<(), BackendError> {
        debug!("Dry run: would execute {statement}");
        self.executed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
