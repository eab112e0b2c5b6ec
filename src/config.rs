use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Neo4j connection configuration, flattened from NEO4J_* env vars
    #[serde(flatten)]
    pub neo4j: Neo4jConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    /// Neo4j bolt URI, e.g. bolt://localhost:7687
    #[serde(rename = "NEO4J_URI", default = "default_neo4j_uri")]
    pub uri: String,
    /// Neo4j username from secret
    #[serde(rename = "NEO4J_USER", default = "default_neo4j_user")]
    pub user: String,
    /// Neo4j password from secret
    #[serde(rename = "NEO4J_PASSWORD", default = "default_neo4j_password")]
    pub password: String,
}

fn default_neo4j_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_neo4j_user() -> String {
    "neo4j".to_string()
}

fn default_neo4j_password() -> String {
    "CHANGE_ME".to_string()
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // NEO4J_* variables: use env when present, otherwise sensible defaults so
        // the shell can still start (and fail the health check) instead of bailing.
        let uri = env::var("NEO4J_URI").unwrap_or_else(|_| default_neo4j_uri());
        let user = env::var("NEO4J_USER").unwrap_or_else(|_| default_neo4j_user());
        let password = env::var("NEO4J_PASSWORD").unwrap_or_else(|_| default_neo4j_password());

        Ok(Self {
            neo4j: Neo4jConfig {
                uri,
                user,
                password,
            },
        })
    }
}
