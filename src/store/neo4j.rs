use std::sync::Arc;

use neo4rs::{query, Graph, Query};
use tracing::debug;

use super::{GraphStore, Row, Scalar, Statement};
use crate::error::{GraphError, GraphResult};

/// Gateway to a Neo4j deployment, reached over Bolt.
///
/// Constructed once from configuration and shared via `Arc`; safe for
/// concurrent use. Every statement runs in its own auto-commit
/// transaction at the store.
#[derive(Clone)]
pub struct Neo4jStore {
    graph: Arc<Graph>,
}

impl Neo4jStore {
    pub fn connect(uri: &str, user: &str, password: &str) -> GraphResult<Self> {
        let graph = Graph::new(uri, user, password).map_err(GraphError::StoreUnavailable)?;

        Ok(Self {
            graph: Arc::new(graph),
        })
    }

    /// Health check - verify the Neo4j connection
    pub async fn health_check(&self) -> GraphResult<bool> {
        let mut result = self.graph.execute(query("RETURN 1 AS health")).await?;

        if let Some(row) = result.next().await? {
            let health: i64 = row.get("health").unwrap_or(0);
            Ok(health == 1)
        } else {
            Ok(false)
        }
    }

    fn build_query(stmt: &Statement) -> Query {
        let mut q = query(stmt.cypher);
        for (name, value) in &stmt.params {
            q = match value {
                Scalar::String(s) => q.param(name, s.as_str()),
                Scalar::Int(i) => q.param(name, *i),
                // no operation issues null parameters
                Scalar::Null => q,
            };
        }
        q
    }

    async fn run(&self, stmt: &Statement) -> GraphResult<Vec<Row>> {
        let mut result = self.graph.execute(Self::build_query(stmt)).await?;

        let mut rows = Vec::new();
        while let Some(record) = result.next().await? {
            let mut row = Row::default();
            for &column in stmt.columns {
                let value = if let Ok(s) = record.get::<String>(column) {
                    Scalar::String(s)
                } else if let Ok(i) = record.get::<i64>(column) {
                    Scalar::Int(i)
                } else {
                    Scalar::Null
                };
                row.insert(column, value);
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

#[async_trait::async_trait]
impl GraphStore for Neo4jStore {
    async fn run_read(&self, stmt: Statement) -> GraphResult<Vec<Row>> {
        let rows = self.run(&stmt).await?;
        debug!(rows = rows.len(), "read statement completed");
        Ok(rows)
    }

    async fn run_write(&self, stmt: Statement) -> GraphResult<Vec<Row>> {
        let rows = self.run(&stmt).await?;
        debug!(rows = rows.len(), "write statement completed");
        Ok(rows)
    }
}
