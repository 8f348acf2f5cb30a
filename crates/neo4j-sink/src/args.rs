//! CLI argument definitions for the Neo4j connection.

use clap::Args;

/// Neo4j connection arguments.
#[derive(Args, Clone, Debug)]
pub struct Neo4jOpts {
    /// Neo4j connection URI (e.g., bolt://localhost:7687)
    #[arg(long, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    pub neo4j_uri: String,

    /// Neo4j username
    #[arg(long, env = "NEO4J_USERNAME", default_value = "neo4j")]
    pub neo4j_username: String,

    /// Neo4j password (required unless running with --dry-run)
    #[arg(long, env = "NEO4J_PASSWORD")]
    pub neo4j_password: Option<String>,

    /// Neo4j database name
    #[arg(long, env = "NEO4J_DATABASE", default_value = "neo4j")]
    pub neo4j_database: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        neo4j: Neo4jOpts,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["test", "--neo4j-password", "secret"]);
        assert_eq!(cli.neo4j.neo4j_uri, "bolt://localhost:7687");
        assert_eq!(cli.neo4j.neo4j_username, "neo4j");
        assert_eq!(cli.neo4j.neo4j_password.as_deref(), Some("secret"));
        assert_eq!(cli.neo4j.neo4j_database, "neo4j");
    }

    #[test]
    fn test_overrides() {
        let cli = TestCli::parse_from([
            "test",
            "--neo4j-uri",
            "neo4j://graph:7687",
            "--neo4j-username",
            "loader",
            "--neo4j-password",
            "pw",
            "--neo4j-database",
            "movielens",
        ]);
        assert_eq!(cli.neo4j.neo4j_uri, "neo4j://graph:7687");
        assert_eq!(cli.neo4j.neo4j_username, "loader");
        assert_eq!(cli.neo4j.neo4j_database, "movielens");
    }

    #[test]
    fn test_password_is_optional() {
        std::env::remove_var("NEO4J_PASSWORD");
        let cli = TestCli::parse_from(["test"]);
        assert!(cli.neo4j.neo4j_password.is_none());
    }
}
