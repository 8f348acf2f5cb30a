//! Statement templates issued by the importers.
//!
//! Every statement is Cypher with named parameters. Genre and User nodes are
//! written with `MERGE` so that they are found by their unique key or created
//! once; Movie nodes use plain `CREATE`.

use graph_sink::Statement;

/// A unique-property constraint declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    pub name: &'static str,
    pub label: &'static str,
    pub property: &'static str,
    template: &'static str,
}

impl Constraint {
    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn statement(&self) -> Statement {
        Statement::new(self.template)
    }
}

pub const MOVIE_ID_UNIQUE: Constraint = Constraint {
    name: "unique_movie_id",
    label: "Movie",
    property: "movieId",
    template: "CREATE CONSTRAINT unique_movie_id IF NOT EXISTS FOR (m:Movie) REQUIRE m.movieId IS UNIQUE",
};

pub const GENRE_NAME_UNIQUE: Constraint = Constraint {
    name: "unique_genre_name",
    label: "Genre",
    property: "name",
    template: "CREATE CONSTRAINT unique_genre_name IF NOT EXISTS FOR (g:Genre) REQUIRE g.name IS UNIQUE",
};

pub const USER_ID_UNIQUE: Constraint = Constraint {
    name: "unique_user_id",
    label: "User",
    property: "userId",
    template: "CREATE CONSTRAINT unique_user_id IF NOT EXISTS FOR (u:User) REQUIRE u.userId IS UNIQUE",
};

/// Constraints declared before importing movies.
pub const MOVIE_CONSTRAINTS: &[Constraint] = &[MOVIE_ID_UNIQUE, GENRE_NAME_UNIQUE];

/// Constraints declared before importing ratings.
pub const RATING_CONSTRAINTS: &[Constraint] = &[USER_ID_UNIQUE];

pub const CREATE_MOVIE: &str = "CREATE (:Movie {movieId: $movieId, title: $title})";

pub const MERGE_GENRE_HAS: &str = "MERGE (g:Genre {name: $genre}) \
     WITH g \
     MATCH (m:Movie {movieId: $movieId}) \
     CREATE (m)-[:HAS]->(g)";

pub const MERGE_USER_RATED: &str = "MERGE (u:User {userId: $userId}) \
     WITH u \
     MATCH (m:Movie {movieId: $movieId}) \
     CREATE (u)-[:RATED {rating: $rating, timestamp: $timestamp}]->(m)";

pub fn create_movie(movie_id: i64, title: &str) -> Statement {
    Statement::new(CREATE_MOVIE)
        .param("movieId", movie_id)
        .param("title", title)
}

pub fn link_genre(movie_id: i64, genre: &str) -> Statement {
    Statement::new(MERGE_GENRE_HAS)
        .param("genre", genre)
        .param("movieId", movie_id)
}

pub fn rate_movie(user_id: i64, movie_id: i64, rating: f64, timestamp: i64) -> Statement {
    Statement::new(MERGE_USER_RATED)
        .param("userId", user_id)
        .param("movieId", movie_id)
        .param("rating", rating)
        .param("timestamp", timestamp)
}
