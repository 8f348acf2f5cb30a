//! movielens-graph library
//!
//! Loads the MovieLens `movies.csv` and `ratings.csv` datasets into Neo4j as
//! `Movie`, `Genre` and `User` nodes with `HAS` and `RATED` relationships.
//!
//! # Crates
//!
//! - `movielens_source` - CSV splitting, schema setup and the two importers
//! - `graph_sink` - the `GraphSink` statement-executor trait and dry-run sink
//! - `neo4j_sink` - `GraphSink` over the `neo4rs` driver
//!
//! # CLI Usage
//!
//! ```bash
//! # Movies first, then ratings
//! movielens-graph all --movies-file ml-latest-small/movies.csv \
//!   --ratings-file ml-latest-small/ratings.csv --neo4j-password secret
//!
//! # Parse and count statements without touching the database
//! movielens-graph movies --file ml-latest-small/movies.csv --dry-run
//! ```

use clap::Args;
use std::path::PathBuf;

pub mod import;

pub use graph_sink;
pub use movielens_source as source;
pub use neo4j_sink;

/// Options shared by every import routine.
#[derive(Args, Clone, Debug)]
pub struct ImportOpts {
    /// Rows per transaction (default: every statement runs in its own transaction)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// CSV field delimiter
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Dry run mode - parse input and log statements without connecting to Neo4j
    #[arg(long)]
    pub dry_run: bool,

    /// Append one JSON line of statistics per import routine to this file
    #[arg(long, value_name = "PATH")]
    pub stats_output: Option<PathBuf>,
}

impl From<&ImportOpts> for source::ImportConfig {
    fn from(opts: &ImportOpts) -> Self {
        Self {
            delimiter: opts.delimiter,
            batch_size: opts.batch_size,
            ..Default::default()
        }
    }
}
