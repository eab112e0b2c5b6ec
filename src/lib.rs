pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;

pub use config::Config;
pub use domain::models::{Comment, Post, PostId, Relationship, User};
pub use error::{GraphError, GraphResult};
pub use service::SocialGraphService;
pub use store::{GraphStore, Neo4jStore, Row, Scalar, Statement};
