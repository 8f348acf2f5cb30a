//! Graph sink trait abstraction.
//!
//! This crate defines the `GraphSink` trait that importers write through.
//! Importers build backend-agnostic `Statement`s (a query template plus named
//! parameters) and hand them to a sink; the sink owns the connection and the
//! transaction scope.

mod dry_run;
mod error;
mod statement;
mod traits;

pub use dry_run::DryRunSink;
pub use error::BackendError;
pub use statement::{Param, Statement};
pub use traits::GraphSink;
