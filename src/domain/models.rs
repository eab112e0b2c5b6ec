use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User node - a member of the social graph, keyed by a caller-supplied
/// stable id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: i64,
}

/// Post node - authored by exactly one user, immutable after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: PostId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Comment node - linked to one author and one target post at creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Identifier of a post: the author id joined with the creation time
/// truncated to whole seconds.
///
/// Two posts by the same author within the same second collide; callers
/// needing a denser id space must supply distinct timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn derive(author_id: &str, timestamp: DateTime<Utc>) -> Self {
        Self(format!("{}_{}", author_id, timestamp.timestamp()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PostId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for PostId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

/// 關係的類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Follows,
    Posted,
    Wrote,
    CommentedOn,
    On,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Follows => "FOLLOWS",
            Relationship::Posted => "POSTED",
            Relationship::Wrote => "WROTE",
            Relationship::CommentedOn => "COMMENTED_ON",
            Relationship::On => "ON",
        }
    }
}
