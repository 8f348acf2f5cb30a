//! MovieLens CSV import into a property graph.
//!
//! This crate maps the MovieLens `movies.csv` and `ratings.csv` datasets onto
//! a graph of `Movie`, `Genre` and `User` nodes connected by `HAS` and `RATED`
//! relationships. All writes go through a `graph_sink::GraphSink`, so the
//! same importers run against Neo4j, a dry-run sink, or the in-memory graph
//! in [`testing`].
//!
//! # Import order
//!
//! Ratings reference movies by id, so `import_movies` must run before
//! `import_ratings`. A rating whose movie was never imported creates its
//! `User` node but no `RATED` relationship, and is not reported as an error.
//!
//! # Example
//!
//! ```ignore
//! use movielens_source::{import_movies, import_ratings, ImportConfig};
//!
//! let config = ImportConfig::default();
//! let movies = import_movies(&sink, &config, "ml-latest-small/movies.csv".as_ref()).await?;
//! let ratings = import_ratings(&sink, &config, "ml-latest-small/ratings.csv".as_ref()).await?;
//! println!("{} movies, {} ratings", movies.rows, ratings.rows);
//! ```

mod config;
mod error;
mod lines;
mod movies;
mod ratings;
mod row;
mod schema;
mod split;
pub mod statements;
mod stats;
pub mod testing;
mod writer;

pub use config::ImportConfig;
pub use error::ImportError;
pub use movies::{import_movies, import_movies_from_reader, MovieRow};
pub use ratings::{import_ratings, import_ratings_from_reader, RatingRow};
pub use schema::ensure_constraints;
pub use split::{split_fields, split_genres, GENRE_DELIMITER};
pub use stats::ImportStats;
