//! Neo4j sink for movielens-graph.
//!
//! Wraps a `neo4rs::Graph` bound to one named database and implements
//! `graph_sink::GraphSink` on top of it. Single statements run in an
//! implicit transaction; batches run inside an explicit transaction that is
//! rolled back on the first failure.
//!
//! # Example
//!
//! ```ignore
//! use graph_sink::{GraphSink, Statement};
//! use neo4j_sink::{Neo4jOpts, Neo4jSink};
//!
//! let sink = Neo4jSink::connect(&opts)?;
//! sink.execute(&Statement::new("CREATE (:Movie {movieId: $id})").param("id", 1i64))
//!     .await?;
//! ```

mod args;
mod error;
mod sink;

pub use args::Neo4jOpts;
pub use error::classify;
pub use sink::{to_query, Neo4jSink};
