//! Movie import: one Movie node per row, one HAS relationship per genre.

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::lines::DataLines;
use crate::row::Fields;
use crate::schema::ensure_constraints;
use crate::split::split_genres;
use crate::statements::{create_movie, link_genre, MOVIE_CONSTRAINTS};
use crate::stats::ImportStats;
use crate::writer::BatchWriter;
use graph_sink::{GraphSink, Statement};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// One row of `movies.csv`: `movieId,title,genres`.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRow {
    pub movie_id: i64,
    /// Title exactly as it appears in the file, quotes included.
    pub title: String,
    pub genres: Vec<String>,
}

impl MovieRow {
    pub fn parse(
        line: &str,
        delimiter: char,
        line_no: usize,
        source_name: &str,
    ) -> Result<Self, ImportError> {
        let fields = Fields::split(line, delimiter, line_no, source_name);
        let movie_id = fields.int(0, "movieId")?;
        let title = fields.text(1, "title")?;
        let genres = fields.text(2, "genres")?;

        Ok(Self {
            movie_id,
            title: title.to_string(),
            genres: split_genres(genres).map(str::to_string).collect(),
        })
    }

    /// The node statement followed by one relationship statement per genre.
    pub fn statements(&self) -> Vec<Statement> {
        let mut statements = Vec::with_capacity(1 + self.genres.len());
        statements.push(create_movie(self.movie_id, &self.title));
        statements.extend(
            self.genres
                .iter()
                .map(|genre| link_genre(self.movie_id, genre)),
        );
        statements
    }
}

/// Import a movies CSV file.
pub async fn import_movies<S: GraphSink>(
    sink: &S,
    config: &ImportConfig,
    path: &Path,
) -> Result<ImportStats, ImportError> {
    let source_name = path.display().to_string();
    let file = File::open(path).map_err(|source| ImportError::Io {
        source_name: source_name.clone(),
        source,
    })?;
    import_movies_from_reader(sink, config, BufReader::new(file), &source_name).await
}

/// Import movies from any buffered reader.
///
/// Declares the Movie and Genre constraints, then writes each row in file
/// order. The first parse or backend error stops the import; rows accepted
/// before a parse error are still written.
pub async fn import_movies_from_reader<S: GraphSink, R: BufRead>(
    sink: &S,
    config: &ImportConfig,
    reader: R,
    source_name: &str,
) -> Result<ImportStats, ImportError> {
    config.validate()?;
    let start_time = Instant::now();
    let mut stats = ImportStats::new(source_name);

    info!("Importing movies from {source_name}");
    let schema_statements = ensure_constraints(sink, MOVIE_CONSTRAINTS, source_name).await?;

    let mut writer = BatchWriter::new(sink, source_name, config.batch_size);

    for entry in DataLines::new(reader, source_name, config.skip_header) {
        let parsed = entry.and_then(|(line_no, line)| {
            MovieRow::parse(&line, config.delimiter, line_no, source_name)
                .map(|movie| (line_no, movie))
        });
        let (line_no, movie) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => return Err(writer.abort(e).await),
        };

        info!("id: {} - title: {}", movie.movie_id, movie.title);
        for genre in &movie.genres {
            info!("==> movie: {} - genre: {}", movie.title, genre);
        }

        writer.push_row(line_no, movie.statements()).await?;
        stats.rows += 1;
    }
    writer.flush().await?;

    stats.statements = schema_statements + writer.statements();
    stats.batches = schema_statements + writer.batches();
    stats.duration = start_time.elapsed();

    info!(
        "Movie import complete: {} movies, {} statements in {:?} ({:.2} rows/sec)",
        stats.rows,
        stats.statements,
        stats.duration,
        stats.rows_per_second()
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::{CREATE_MOVIE, MERGE_GENRE_HAS};

    #[test]
    fn test_parse_row() {
        let row = MovieRow::parse("1,Toy Story (1995),Adventure|Animation|Children", ',', 2, "m")
            .unwrap();
        assert_eq!(
            row,
            MovieRow {
                movie_id: 1,
                title: "Toy Story (1995)".to_string(),
                genres: vec![
                    "Adventure".to_string(),
                    "Animation".to_string(),
                    "Children".to_string()
                ],
            }
        );
    }

    #[test]
    fn test_parse_quoted_title() {
        let row = MovieRow::parse("1,\"Toy Story, The\",Animation|Comedy", ',', 2, "m").unwrap();
        assert_eq!(row.title, "\"Toy Story, The\"");
        assert_eq!(row.genres, vec!["Animation", "Comedy"]);
    }

    #[test]
    fn test_parse_requires_three_fields() {
        let err = MovieRow::parse("1,Toy Story", ',', 9, "m").unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingField { line: 9, field: "genres", .. }
        ));
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let row = MovieRow::parse("5,Title,Drama,extra", ',', 2, "m").unwrap();
        assert_eq!(row.genres, vec!["Drama"]);
    }

    #[test]
    fn test_node_statement_comes_first() {
        let row = MovieRow::parse("1,A,Animation|Comedy", ',', 2, "m").unwrap();
        let templates: Vec<&str> = row.statements().iter().map(|s| s.template()).collect();
        assert_eq!(templates, vec![CREATE_MOVIE, MERGE_GENRE_HAS, MERGE_GENRE_HAS]);
    }
}
