//! Import routine handlers.
//!
//! Each routine owns its own sink: the Neo4j connection is opened when the
//! routine starts and dropped when it returns, on success or failure.

use crate::ImportOpts;
use anyhow::Context;
use graph_sink::{DryRunSink, GraphSink};
use movielens_source::{import_movies, import_ratings, ImportConfig, ImportStats};
use neo4j_sink::{Neo4jOpts, Neo4jSink};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Which dataset a routine imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Routine {
    Movies,
    Ratings,
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Routine::Movies => write!(f, "movies"),
            Routine::Ratings => write!(f, "ratings"),
        }
    }
}

/// Run one import routine against Neo4j (or the dry-run sink).
pub async fn run(
    routine: Routine,
    neo4j: &Neo4jOpts,
    opts: &ImportOpts,
    file: &Path,
) -> anyhow::Result<ImportStats> {
    let config = ImportConfig::from(opts);

    let stats = if opts.dry_run {
        tracing::info!("Running in dry-run mode - no data will be written");
        let sink = DryRunSink::new();
        let stats = import_with(&sink, routine, &config, file).await?;
        tracing::info!(
            "Dry run: {} statements would have been executed",
            sink.executed()
        );
        stats
    } else {
        tracing::info!(
            "Target: {} (database: {})",
            neo4j.neo4j_uri,
            neo4j.neo4j_database
        );
        let sink = Neo4jSink::connect(neo4j).context("Failed to connect to Neo4j")?;
        import_with(&sink, routine, &config, file).await?
    };

    if let Some(path) = &opts.stats_output {
        append_stats(path, routine, &stats).await?;
    }

    Ok(stats)
}

/// Run one import routine against any sink.
pub async fn import_with<S: GraphSink>(
    sink: &S,
    routine: Routine,
    config: &ImportConfig,
    file: &Path,
) -> anyhow::Result<ImportStats> {
    let stats = match routine {
        Routine::Movies => import_movies(sink, config, file).await,
        Routine::Ratings => import_ratings(sink, config, file).await,
    }
    .with_context(|| format!("Failed to import {routine} from {}", file.display()))?;

    Ok(stats)
}

/// One line of the stats output file.
#[derive(Debug, Serialize)]
pub struct StatsEntry<'a> {
    pub finished_at: String,
    pub routine: Routine,
    #[serde(flatten)]
    pub stats: &'a ImportStats,
    pub rows_per_sec: f64,
}

/// Append a JSON line describing a finished routine.
pub async fn append_stats(path: &Path, routine: Routine, stats: &ImportStats) -> anyhow::Result<()> {
    let entry = StatsEntry {
        finished_at: chrono::Utc::now().to_rfc3339(),
        routine,
        stats,
        rows_per_sec: stats.rows_per_second(),
    };
    let json_line = serde_json::to_string(&entry)?;

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open stats output {}", path.display()))?;
    file.write_all(json_line.as_bytes()).await?;
    file.write_all(b"\n").await?;
    file.flush().await?;

    Ok(())
}
