mod neo4j;

pub use neo4j::Neo4jStore;

use std::collections::HashMap;

use crate::error::{GraphError, GraphResult};

/// Scalar value crossing the store boundary, as a statement parameter or
/// a result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    String(String),
    Int(i64),
    Null,
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

/// One parameterized Cypher statement together with the columns its
/// RETURN clause projects.
#[derive(Debug, Clone)]
pub struct Statement {
    pub cypher: &'static str,
    pub params: Vec<(&'static str, Scalar)>,
    pub columns: &'static [&'static str],
}

impl Statement {
    pub fn new(cypher: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            cypher,
            params: Vec::new(),
            columns,
        }
    }

    pub fn param(mut self, name: &'static str, value: impl Into<Scalar>) -> Self {
        self.params.push((name, value.into()));
        self
    }
}

/// One result record: projected column name to scalar value.
#[derive(Debug, Clone, Default)]
pub struct Row {
    values: HashMap<String, Scalar>,
}

impl Row {
    pub fn insert(&mut self, column: &str, value: Scalar) {
        self.values.insert(column.to_owned(), value);
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.values.get(column)
    }

    pub fn require_str(&self, column: &'static str) -> GraphResult<&str> {
        self.get(column)
            .and_then(Scalar::as_str)
            .ok_or(GraphError::MalformedRow { column })
    }

    pub fn require_i64(&self, column: &'static str) -> GraphResult<i64> {
        self.get(column)
            .and_then(Scalar::as_i64)
            .ok_or(GraphError::MalformedRow { column })
    }
}

/// The narrow interface through which domain operations reach the
/// external graph store. Implementations must be safe for concurrent
/// use; each call is one unit of work at the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GraphStore: Send + Sync {
    /// Execute a read-only pattern match. Never mutates state and may be
    /// retried by the caller.
    async fn run_read(&self, stmt: Statement) -> GraphResult<Vec<Row>>;

    /// Execute one atomic mutation. All contained graph writes commit
    /// together or not at all; conflicting concurrent writes serialize
    /// at the store.
    async fn run_write(&self, stmt: Statement) -> GraphResult<Vec<Row>>;
}
