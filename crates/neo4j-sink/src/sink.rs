//! `GraphSink` implementation backed by a `neo4rs::Graph`.

use crate::args::Neo4jOpts;
use crate::error::classify;
use graph_sink::{BackendError, GraphSink, Param, Statement};
use neo4rs::{query, ConfigBuilder, Graph, Query};
use tracing::{debug, info, warn};

/// Neo4j-backed sink.
///
/// The sink owns its `Graph` handle; dropping the sink closes the pool. The
/// target database is fixed by the `Graph` configuration.
pub struct Neo4jSink {
    graph: Graph,
}

impl Neo4jSink {
    /// Connect to Neo4j using the given options.
    pub fn connect(opts: &Neo4jOpts) -> Result<Self, BackendError> {
        let password = opts.neo4j_password.as_deref().ok_or_else(|| {
            BackendError::Connection(
                "no Neo4j password configured (use --neo4j-password or NEO4J_PASSWORD)"
                    .to_string(),
            )
        })?;

        let config = ConfigBuilder::default()
            .uri(opts.neo4j_uri.as_str())
            .user(opts.neo4j_username.as_str())
            .password(password)
            .db(opts.neo4j_database.as_str())
            .build()
            .map_err(|e| BackendError::Connection(format!("invalid configuration: {e}")))?;

        let graph = Graph::connect(config).map_err(|e| BackendError::Connection(e.to_string()))?;

        info!(
            "Connected to Neo4j at {} (database: {})",
            opts.neo4j_uri, opts.neo4j_database
        );

        Ok(Self::with_graph(graph))
    }

    /// Create a sink from an existing Graph connection.
    pub fn with_graph(graph: Graph) -> Self {
        Self { graph }
    }

    /// Underlying driver handle, for queries outside the import path.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

/// Convert a backend-agnostic statement into a `neo4rs` query.
pub fn to_query(statement: &Statement) -> Query {
    statement
        .params()
        .iter()
        .fold(query(statement.template()), |q, (key, value)| match value {
            Param::Int(i) => q.param(key, *i),
            Param::Float(f) => q.param(key, *f),
            Param::Text(s) => q.param(key, s.clone()),
        })
}

#[async_trait::async_trait]
impl GraphSink for Neo4jSink {
    async fn execute(&self, statement: &Statement) -> Result<(), BackendError> {
        debug!("Neo4j query: {statement}");
        self.graph.run(to_query(statement)).await.map_err(classify)
    }

    async fn execute_batch(&self, statements: &[Statement]) -> Result<(), BackendError> {
        if statements.is_empty() {
            return Ok(());
        }

        let mut txn = self
            .graph
            .start_txn()
            .await
            .map_err(|e| BackendError::Transaction(format!("failed to start transaction: {e}")))?;

        for statement in statements {
            debug!("Neo4j query (txn): {statement}");
            if let Err(e) = txn.run(to_query(statement)).await {
                let err = classify(e);
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("Rollback after failed statement also failed: {rollback_err}");
                }
                return Err(err);
            }
        }

        txn.commit()
            .await
            .map_err(|e| BackendError::Transaction(format!("failed to commit transaction: {e}")))
    }
}
