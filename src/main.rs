//! Command-line interface for movielens-graph
//!
//! # Usage Examples
//!
//! ```bash
//! # Import movies, then ratings, into the default database
//! NEO4J_PASSWORD=secret movielens-graph all \
//!   --movies-file ml-latest-small/movies.csv \
//!   --ratings-file ml-latest-small/ratings.csv
//!
//! # Ratings only, 500 rows per transaction, stats appended to a file
//! movielens-graph ratings --file ml-latest-small/ratings.csv \
//!   --neo4j-uri bolt://graph:7687 --neo4j-password secret \
//!   --batch-size 500 --stats-output import-stats.jsonl
//! ```
//!
//! Ratings reference movies by id, so import movies first.

use clap::{Parser, Subcommand};
use movielens_graph::import::{self, Routine};
use movielens_graph::ImportOpts;
use neo4j_sink::Neo4jOpts;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "movielens-graph")]
#[command(about = "Load the MovieLens movies and ratings datasets into Neo4j")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import movies.csv: Movie nodes, Genre nodes and HAS relationships
    Movies {
        /// Path to the movies CSV file
        #[arg(long, default_value = "ml-latest-small/movies.csv")]
        file: PathBuf,

        #[command(flatten)]
        neo4j: Neo4jOpts,

        #[command(flatten)]
        import: ImportOpts,
    },

    /// Import ratings.csv: User nodes and RATED relationships (movies must be imported first)
    Ratings {
        /// Path to the ratings CSV file
        #[arg(long, default_value = "ml-latest-small/ratings.csv")]
        file: PathBuf,

        #[command(flatten)]
        neo4j: Neo4jOpts,

        #[command(flatten)]
        import: ImportOpts,
    },

    /// Import movies, then ratings
    All {
        /// Path to the movies CSV file
        #[arg(long, default_value = "ml-latest-small/movies.csv")]
        movies_file: PathBuf,

        /// Path to the ratings CSV file
        #[arg(long, default_value = "ml-latest-small/ratings.csv")]
        ratings_file: PathBuf,

        #[command(flatten)]
        neo4j: Neo4jOpts,

        #[command(flatten)]
        import: ImportOpts,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Movies {
            file,
            neo4j,
            import,
        } => {
            import::run(Routine::Movies, &neo4j, &import, &file).await?;
        }
        Commands::Ratings {
            file,
            neo4j,
            import,
        } => {
            import::run(Routine::Ratings, &neo4j, &import, &file).await?;
        }
        Commands::All {
            movies_file,
            ratings_file,
            neo4j,
            import,
        } => {
            let movies = import::run(Routine::Movies, &neo4j, &import, &movies_file).await?;
            let ratings = import::run(Routine::Ratings, &neo4j, &import, &ratings_file).await?;
            tracing::info!(
                "Import completed: {} movies, {} ratings in {:?}",
                movies.rows,
                ratings.rows,
                movies.duration + ratings.duration
            );
        }
    }

    Ok(())
}
