//! Rating import: one RATED relationship per row, User nodes merged by id.

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::lines::DataLines;
use crate::row::Fields;
use crate::schema::ensure_constraints;
use crate::statements::{rate_movie, RATING_CONSTRAINTS};
use crate::stats::ImportStats;
use crate::writer::BatchWriter;
use graph_sink::{GraphSink, Statement};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// One row of `ratings.csv`: `userId,movieId,rating,timestamp`.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRow {
    pub user_id: i64,
    pub movie_id: i64,
    pub rating: f64,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl RatingRow {
    pub fn parse(
        line: &str,
        delimiter: char,
        line_no: usize,
        source_name: &str,
    ) -> Result<Self, ImportError> {
        let fields = Fields::split(line, delimiter, line_no, source_name);
        Ok(Self {
            user_id: fields.int(0, "userId")?,
            movie_id: fields.int(1, "movieId")?,
            rating: fields.float(2, "rating")?,
            timestamp: fields.int(3, "timestamp")?,
        })
    }

    pub fn statement(&self) -> Statement {
        rate_movie(self.user_id, self.movie_id, self.rating, self.timestamp)
    }
}

/// Import a ratings CSV file.
pub async fn import_ratings<S: GraphSink>(
    sink: &S,
    config: &ImportConfig,
    path: &Path,
) -> Result<ImportStats, ImportError> {
    let source_name = path.display().to_string();
    let file = File::open(path).map_err(|source| ImportError::Io {
        source_name: source_name.clone(),
        source,
    })?;
    import_ratings_from_reader(sink, config, BufReader::new(file), &source_name).await
}

/// Import ratings from any buffered reader.
///
/// Movies must already be imported. A rating for an unknown movie still
/// merges its User node but creates no relationship, and is not an error.
pub async fn import_ratings_from_reader<S: GraphSink, R: BufRead>(
    sink: &S,
    config: &ImportConfig,
    reader: R,
    source_name: &str,
) -> Result<ImportStats, ImportError> {
    config.validate()?;
    let start_time = Instant::now();
    let mut stats = ImportStats::new(source_name);

    info!("Importing ratings from {source_name}");
    let schema_statements = ensure_constraints(sink, RATING_CONSTRAINTS, source_name).await?;

    let mut writer = BatchWriter::new(sink, source_name, config.batch_size);

    for entry in DataLines::new(reader, source_name, config.skip_header) {
        let parsed = entry.and_then(|(line_no, line)| {
            RatingRow::parse(&line, config.delimiter, line_no, source_name)
                .map(|rating| (line_no, rating))
        });
        let (line_no, rating) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => return Err(writer.abort(e).await),
        };

        info!(
            "userId: {} - movieId: {} - rating: {} - timestamp: {}",
            rating.user_id, rating.movie_id, rating.rating, rating.timestamp
        );

        writer.push_row(line_no, vec![rating.statement()]).await?;
        stats.rows += 1;
    }
    writer.flush().await?;

    stats.statements = schema_statements + writer.statements();
    stats.batches = schema_statements + writer.batches();
    stats.duration = start_time.elapsed();

    info!(
        "Rating import complete: {} ratings, {} statements in {:?} ({:.2} rows/sec)",
        stats.rows,
        stats.statements,
        stats.duration,
        stats.rows_per_second()
    );

    Ok(stats)
}
