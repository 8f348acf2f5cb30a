//! In-memory graph used by tests.
//!
//! `MemoryGraph` understands the statements in [`crate::statements`] and
//! applies them with the same semantics a Neo4j server would: unique
//! constraints reject duplicate nodes, `MERGE` finds or creates, a `MATCH`
//! that finds nothing creates no relationship, and `execute_batch` is
//! all-or-nothing.

use crate::statements::{
    Constraint, CREATE_MOVIE, GENRE_NAME_UNIQUE, MERGE_GENRE_HAS, MERGE_USER_RATED,
    MOVIE_ID_UNIQUE, USER_ID_UNIQUE,
};
use graph_sink::{BackendError, GraphSink, Param, Statement};
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

const ALL_CONSTRAINTS: [Constraint; 3] = [MOVIE_ID_UNIQUE, GENRE_NAME_UNIQUE, USER_ID_UNIQUE];

#[derive(Debug, Clone, PartialEq)]
pub struct MovieNode {
    pub movie_id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatedEdge {
    pub user_id: i64,
    pub movie_id: i64,
    pub rating: f64,
    pub timestamp: i64,
}

/// Contents of the graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphState {
    /// Names of declared constraints.
    pub constraints: BTreeSet<&'static str>,
    pub movies: Vec<MovieNode>,
    pub genres: Vec<String>,
    pub users: Vec<i64>,
    /// `(movieId, genre name)` per HAS relationship.
    pub has: Vec<(i64, String)>,
    pub rated: Vec<RatedEdge>,
}

impl GraphState {
    pub fn movies_with_id(&self, movie_id: i64) -> usize {
        self.movies.iter().filter(|m| m.movie_id == movie_id).count()
    }

    pub fn genres_named(&self, name: &str) -> usize {
        self.genres.iter().filter(|g| g.as_str() == name).count()
    }

    pub fn users_with_id(&self, user_id: i64) -> usize {
        self.users.iter().filter(|u| **u == user_id).count()
    }

    /// Genres linked from a movie, in creation order.
    pub fn genres_of(&self, movie_id: i64) -> Vec<&str> {
        self.has
            .iter()
            .filter(|(id, _)| *id == movie_id)
            .map(|(_, genre)| genre.as_str())
            .collect()
    }

    /// Number of HAS relationships pointing at a genre.
    pub fn has_edges_to(&self, genre: &str) -> usize {
        self.has.iter().filter(|(_, g)| g == genre).count()
    }

    fn constrained(&self, constraint: &Constraint) -> bool {
        self.constraints.contains(constraint.name)
    }

    fn apply(&mut self, statement: &Statement, strict_schema: bool) -> Result<(), BackendError> {
        let template = statement.template();

        if let Some(constraint) = ALL_CONSTRAINTS.iter().find(|c| c.template() == template) {
            if !self.constraints.insert(constraint.name) && strict_schema {
                return Err(BackendError::AlreadyExists {
                    code: "Neo.ClientError.Schema.EquivalentSchemaRuleAlreadyExists".to_string(),
                    message: format!("constraint {} already exists", constraint.name),
                });
            }
            return Ok(());
        }

        match template {
            CREATE_MOVIE => {
                let movie_id = int_param(statement, "movieId")?;
                let title = text_param(statement, "title")?;
                if self.constrained(&MOVIE_ID_UNIQUE) && self.movies_with_id(movie_id) > 0 {
                    return Err(constraint_violation("Movie", "movieId", movie_id));
                }
                self.movies.push(MovieNode {
                    movie_id,
                    title: title.to_string(),
                });
            }
            MERGE_GENRE_HAS => {
                let genre = text_param(statement, "genre")?;
                let movie_id = int_param(statement, "movieId")?;
                if self.genres_named(genre) == 0 {
                    self.genres.push(genre.to_string());
                }
                for _ in 0..self.movies_with_id(movie_id) {
                    self.has.push((movie_id, genre.to_string()));
                }
            }
            MERGE_USER_RATED => {
                let user_id = int_param(statement, "userId")?;
                let movie_id = int_param(statement, "movieId")?;
                let rating = float_param(statement, "rating")?;
                let timestamp = int_param(statement, "timestamp")?;
                if self.users_with_id(user_id) == 0 {
                    self.users.push(user_id);
                }
                for _ in 0..self.movies_with_id(movie_id) {
                    self.rated.push(RatedEdge {
                        user_id,
                        movie_id,
                        rating,
                        timestamp,
                    });
                }
            }
            other => {
                return Err(BackendError::Rejected {
                    code: "Neo.ClientError.Statement.SyntaxError".to_string(),
                    message: format!("unsupported statement: {other}"),
                })
            }
        }
        Ok(())
    }
}

fn missing_param(name: &str) -> BackendError {
    BackendError::Rejected {
        code: "Neo.ClientError.Statement.ParameterMissing".to_string(),
        message: format!("Expected parameter(s): {name}"),
    }
}

fn int_param(statement: &Statement, name: &str) -> Result<i64, BackendError> {
    match statement.get(name) {
        Some(Param::Int(i)) => Ok(*i),
        _ => Err(missing_param(name)),
    }
}

fn float_param(statement: &Statement, name: &str) -> Result<f64, BackendError> {
    match statement.get(name) {
        Some(Param::Float(f)) => Ok(*f),
        _ => Err(missing_param(name)),
    }
}

fn text_param<'s>(statement: &'s Statement, name: &str) -> Result<&'s str, BackendError> {
    match statement.get(name) {
        Some(Param::Text(s)) => Ok(s.as_str()),
        _ => Err(missing_param(name)),
    }
}

fn constraint_violation(label: &str, property: &str, value: i64) -> BackendError {
    BackendError::Rejected {
        code: "Neo.ClientError.Schema.ConstraintValidationFailed".to_string(),
        message: format!(
            "Node already exists with label `{label}` and property `{property}` = {value}"
        ),
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: GraphState,
    executed: Vec<Statement>,
    /// Statements left before every call fails; `None` never fails.
    budget: Option<usize>,
    strict_schema: bool,
}

impl Inner {
    fn spend(&mut self) -> Result<(), BackendError> {
        match self.budget.as_mut() {
            Some(0) => Err(BackendError::Connection(
                "connection to the server was lost".to_string(),
            )),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// In-memory `GraphSink`.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    inner: Mutex<Inner>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `statements` statements, then fail every call with a
    /// connection error.
    pub fn failing_after(self, statements: usize) -> Self {
        self.lock().budget = Some(statements);
        self
    }

    /// Report re-declared constraints as `AlreadyExists` instead of
    /// honouring `IF NOT EXISTS`.
    pub fn with_strict_schema(self) -> Self {
        self.lock().strict_schema = true;
        self
    }

    /// Copy of the committed graph.
    pub fn snapshot(&self) -> GraphState {
        self.lock().state.clone()
    }

    /// Committed statements, in execution order.
    pub fn executed(&self) -> Vec<Statement> {
        self.lock().executed.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl GraphSink for MemoryGraph {
    async fn execute(&self, statement: &Statement) -> Result<(), BackendError> {
        let mut inner = self.lock();
        inner.spend()?;
        let strict = inner.strict_schema;
        inner.state.apply(statement, strict)?;
        inner.executed.push(statement.clone());
        Ok(())
    }

    async fn execute_batch(&self, statements: &[Statement]) -> Result<(), BackendError> {
        let mut inner = self.lock();
        let strict = inner.strict_schema;
        let mut txn = inner.state.clone();
        for statement in statements {
            inner.spend()?;
            txn.apply(statement, strict)?;
        }
        inner.state = txn;
        inner.executed.extend_from_slice(statements);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::{create_movie, link_genre, rate_movie};

    #[tokio::test]
    async fn test_merge_and_match_semantics() {
        let graph = MemoryGraph::new();
        graph.execute(&create_movie(1, "A")).await.unwrap();
        graph.execute(&link_genre(1, "Drama")).await.unwrap();
        graph.execute(&link_genre(42, "Drama")).await.unwrap();
        graph.execute(&rate_movie(7, 42, 3.0, 0)).await.unwrap();

        let state = graph.snapshot();
        assert_eq!(state.genres, vec!["Drama".to_string()]);
        assert_eq!(state.has, vec![(1, "Drama".to_string())]);
        assert_eq!(state.users, vec![7]);
        assert!(state.rated.is_empty());
    }

    #[tokio::test]
    async fn test_unique_movie_constraint() {
        let graph = MemoryGraph::new();
        graph.execute(&MOVIE_ID_UNIQUE.statement()).await.unwrap();
        graph.execute(&create_movie(1, "A")).await.unwrap();
        let err = graph.execute(&create_movie(1, "A")).await.unwrap_err();
        assert!(matches!(err, BackendError::Rejected { ref code, .. } if code.ends_with("ConstraintValidationFailed")));
    }

    #[tokio::test]
    async fn test_batch_is_atomic() {
        let graph = MemoryGraph::new();
        let err = graph
            .execute_batch(&[create_movie(1, "A"), Statement::new("DROP EVERYTHING")])
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::Rejected { .. }));
        assert_eq!(graph.snapshot(), GraphState::default());
        assert!(graph.executed().is_empty());
    }

    #[tokio::test]
    async fn test_missing_parameter() {
        let graph = MemoryGraph::new();
        let err = graph
            .execute(&Statement::new(CREATE_MOVIE).param("movieId", 1i64))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("title"));
    }
}
