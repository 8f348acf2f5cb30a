//! Ordered, optionally batched statement writer.

use crate::error::ImportError;
use graph_sink::{GraphSink, Statement};
use tracing::{debug, error};

/// Sends the statements of each row to the sink, in row order.
///
/// Without a batch size every statement is executed as soon as its row is
/// pushed. With a batch size the statements of up to that many rows are held
/// back and sent as one transaction.
pub(crate) struct BatchWriter<'a, S> {
    sink: &'a S,
    source_name: &'a str,
    batch_size: Option<usize>,
    pending: Vec<Statement>,
    pending_rows: usize,
    first_line: usize,
    last_line: usize,
    statements: u64,
    batches: u64,
}

impl<'a, S: GraphSink> BatchWriter<'a, S> {
    pub(crate) fn new(sink: &'a S, source_name: &'a str, batch_size: Option<usize>) -> Self {
        Self {
            sink,
            source_name,
            batch_size,
            pending: Vec::new(),
            pending_rows: 0,
            first_line: 0,
            last_line: 0,
            statements: 0,
            batches: 0,
        }
    }

    /// Queue (or send) the statements produced by the row at `line`.
    pub(crate) async fn push_row(
        &mut self,
        line: usize,
        statements: Vec<Statement>,
    ) -> Result<(), ImportError> {
        let Some(batch_size) = self.batch_size else {
            for statement in &statements {
                self.statements += 1;
                self.batches += 1;
                if let Err(e) = self.sink.execute(statement).await {
                    error!(
                        source = self.source_name,
                        line,
                        statement = %statement,
                        "Statement failed: {e}"
                    );
                    return Err(ImportError::Backend {
                        source_name: self.source_name.to_string(),
                        line,
                        source: e,
                    });
                }
            }
            return Ok(());
        };

        if self.pending_rows == 0 {
            self.first_line = line;
        }
        self.last_line = line;
        self.pending.extend(statements);
        self.pending_rows += 1;

        if self.pending_rows >= batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Send everything still queued.
    pub(crate) async fn flush(&mut self) -> Result<(), ImportError> {
        if self.pending.is_empty() {
            self.pending_rows = 0;
            return Ok(());
        }

        let statements = std::mem::take(&mut self.pending);
        let rows = std::mem::take(&mut self.pending_rows);
        self.statements += statements.len() as u64;
        self.batches += 1;

        debug!(
            "Writing batch {} from {}: {} rows (lines {}-{}), {} statements",
            self.batches,
            self.source_name,
            rows,
            self.first_line,
            self.last_line,
            statements.len()
        );

        if let Err(e) = self.sink.execute_batch(&statements).await {
            error!(
                source = self.source_name,
                first_line = self.first_line,
                last_line = self.last_line,
                statements = statements.len(),
                first_statement = %statements[0],
                "Batch failed: {e}"
            );
            return Err(ImportError::Backend {
                source_name: self.source_name.to_string(),
                line: self.first_line,
                source: e,
            });
        }
        Ok(())
    }

    /// Flush rows accepted before `err` and hand `err` back.
    ///
    /// If that flush fails too, the backend error is logged and dropped: the
    /// caller only sees `err`.
    pub(crate) async fn abort(&mut self, err: ImportError) -> ImportError {
        if let Err(flush_err) = self.flush().await {
            error!("Could not write rows preceding the failure ({err}): {flush_err}");
        }
        err
    }

    pub(crate) fn statements(&self) -> u64 {
        self.statements
    }

    pub(crate) fn batches(&self) -> u64 {
        self.batches
    }
}
