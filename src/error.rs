/// Error types for the social graph
use thiserror::Error;

use crate::domain::models::PostId;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph store unavailable: {0}")]
    StoreUnavailable(#[source] neo4rs::Error),

    #[error("user {id} not found")]
    UserNotFound { id: String },

    #[error("author {id} not found")]
    AuthorNotFound { id: String },

    #[error("post {post_id} not found")]
    PostNotFound { post_id: PostId },

    #[error("user {id} cannot follow themselves")]
    SelfFollow { id: String },

    #[error("write conflict reported by the graph store: {0}")]
    WriteConflict(#[source] neo4rs::Error),

    #[error("graph store error: {0}")]
    Store(#[source] neo4rs::Error),

    #[error("result row missing column `{column}`")]
    MalformedRow { column: &'static str },
}

impl GraphError {
    /// Returns whether the caller may retry the failed operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GraphError::WriteConflict(_))
    }
}

impl From<neo4rs::Error> for GraphError {
    fn from(err: neo4rs::Error) -> Self {
        if matches!(err, neo4rs::Error::IOError { .. }) {
            return GraphError::StoreUnavailable(err);
        }
        // Neo4j reports transaction conflicts under the TransientError
        // status class, e.g. Neo.TransientError.Transaction.DeadlockDetected.
        if err.to_string().contains("TransientError") {
            return GraphError::WriteConflict(err);
        }
        GraphError::Store(err)
    }
}

/// Result type alias for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_map_to_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = GraphError::from(neo4rs::Error::IOError { detail: io });
        assert!(matches!(err, GraphError::StoreUnavailable(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_only_conflicts_are_retryable() {
        let err = GraphError::UserNotFound { id: "u1".into() };
        assert!(!err.is_retryable());
    }
}
