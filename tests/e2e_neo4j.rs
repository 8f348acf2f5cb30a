//! End-to-end import against a running Neo4j.
//!
//! Run with `cargo test --test e2e_neo4j -- --ignored`. Connection settings
//! come from `NEO4J_TEST_URL`, `NEO4J_TEST_USER` and `NEO4J_TEST_PASSWORD`.

use movielens_graph::source::{import_movies_from_reader, import_ratings_from_reader, ImportConfig};
use neo4j_sink::{Neo4jOpts, Neo4jSink};
use neo4rs::query;
use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

// Node ids are offset per run so parallel and repeated runs do not collide
// with the movieId uniqueness constraint.
fn generate_test_id() -> i64 {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64;
    let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    (timestamp.wrapping_add(counter) % 1_000_000_000) as i64
}

fn test_opts() -> Neo4jOpts {
    Neo4jOpts {
        neo4j_uri: std::env::var("NEO4J_TEST_URL")
            .unwrap_or_else(|_| "bolt://neo4j:7687".to_string()),
        neo4j_username: std::env::var("NEO4J_TEST_USER").unwrap_or_else(|_| "neo4j".to_string()),
        neo4j_password: Some(
            std::env::var("NEO4J_TEST_PASSWORD").unwrap_or_else(|_| "password".to_string()),
        ),
        neo4j_database: "neo4j".to_string(),
    }
}

async fn count(sink: &Neo4jSink, cypher: &str, base: i64) -> Result<i64, Box<dyn std::error::Error>> {
    let mut result = sink
        .graph()
        .execute(query(cypher).param("base", base))
        .await?;
    let row = result.next().await?.ok_or("count query returned no rows")?;
    Ok(row.get::<i64>("c")?)
}

async fn cleanup(sink: &Neo4jSink, base: i64, genre: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cleanup_query = query(
        "MATCH (n) WHERE (n:Movie AND n.movieId >= $base AND n.movieId < $base + 100) \
         OR (n:User AND n.userId >= $base AND n.userId < $base + 100) \
         OR (n:Genre AND n.name STARTS WITH $genre) \
         DETACH DELETE n",
    )
    .param("base", base)
    .param("genre", genre);
    let mut result = sink.graph().execute(cleanup_query).await?;
    while result.next().await?.is_some() {}
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Neo4j instance"]
async fn test_movielens_import_e2e() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("movielens_source=debug,neo4j_sink=debug")
        .try_init()
        .ok();

    let base = generate_test_id() * 1000;
    let genre = format!("E2E{base}");
    let sink = Neo4jSink::connect(&test_opts())?;

    let movies = format!(
        "movieId,title,genres\n\
         {m1},\"American President, The (1995)\",{genre}Comedy|{genre}Drama\n\
         {m2},Heat (1995),{genre}Drama\n",
        m1 = base + 1,
        m2 = base + 2,
    );
    let ratings = format!(
        "userId,movieId,rating,timestamp\n\
         {u1},{m1},4.0,964982703\n\
         {u1},{m2},3.5,964981247\n\
         {u2},{m1},5.0,964982224\n\
         {u2},{missing},1.0,964983815\n",
        u1 = base + 11,
        u2 = base + 12,
        m1 = base + 1,
        m2 = base + 2,
        missing = base + 99,
    );

    let config = ImportConfig {
        batch_size: Some(2),
        ..Default::default()
    };

    let movie_stats =
        import_movies_from_reader(&sink, &config, Cursor::new(movies), "movies.csv").await?;
    let rating_stats =
        import_ratings_from_reader(&sink, &config, Cursor::new(ratings), "ratings.csv").await?;
    assert_eq!(movie_stats.rows, 2);
    assert_eq!(rating_stats.rows, 4);

    let movie_count = count(
        &sink,
        "MATCH (m:Movie) WHERE m.movieId >= $base AND m.movieId < $base + 100 RETURN count(m) AS c",
        base,
    )
    .await?;
    assert_eq!(movie_count, 2);

    let quoted_title = count(
        &sink,
        "MATCH (m:Movie {movieId: $base + 1}) \
         WHERE m.title = '\"American President, The (1995)\"' RETURN count(m) AS c",
        base,
    )
    .await?;
    assert_eq!(quoted_title, 1, "quoted title should be stored with its quotes");

    let has_count = count(
        &sink,
        "MATCH (m:Movie)-[:HAS]->(:Genre) WHERE m.movieId >= $base AND m.movieId < $base + 100 \
         RETURN count(*) AS c",
        base,
    )
    .await?;
    assert_eq!(has_count, 3);

    let rated_count = count(
        &sink,
        "MATCH (u:User)-[:RATED]->(:Movie) WHERE u.userId >= $base AND u.userId < $base + 100 \
         RETURN count(*) AS c",
        base,
    )
    .await?;
    assert_eq!(rated_count, 3, "rating for an unknown movie should be dropped");

    cleanup(&sink, base, &genre).await?;
    Ok(())
}
