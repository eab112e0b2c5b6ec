use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::models::{Comment, Post, PostId, Relationship, User};
use crate::error::{GraphError, GraphResult};
use crate::store::{GraphStore, Statement};

/// Domain operations over the social graph.
///
/// Stateless: every call opens exactly one unit of work against the
/// injected store (plus one existence read on not-found error paths).
#[derive(Clone)]
pub struct SocialGraphService {
    store: Arc<dyn GraphStore>,
}

impl SocialGraphService {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// All users currently in the graph. Result order is whatever the
    /// store returns; callers must not assume one.
    pub async fn list_users(&self) -> GraphResult<Vec<User>> {
        let cypher = "MATCH (u:User) RETURN u.id AS id, u.name AS name, u.age AS age";

        let rows = self
            .store
            .run_read(Statement::new(cypher, &["id", "name", "age"]))
            .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in &rows {
            users.push(User {
                id: row.require_str("id")?.to_owned(),
                name: row.require_str("name")?.to_owned(),
                age: row.require_i64("age")?,
            });
        }

        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    /// Create the user if absent, then overwrite name and age. Repeated
    /// calls with the same id converge to the latest values.
    pub async fn upsert_user(&self, id: &str, name: &str, age: i64) -> GraphResult<()> {
        let cypher = "MERGE (u:User {id: $id}) SET u.name = $name, u.age = $age";

        self.store
            .run_write(
                Statement::new(cypher, &[])
                    .param("id", id)
                    .param("name", name)
                    .param("age", age),
            )
            .await?;

        debug!(%id, "upserted user");
        Ok(())
    }

    /// Create a post authored by `author_id`. The post id is derived
    /// from the author and the second-truncated timestamp before the
    /// write is issued, so the caller can use it immediately.
    ///
    /// A zero-row result means the author match failed and nothing was
    /// created.
    pub async fn create_post(
        &self,
        author_id: &str,
        content: &str,
        timestamp: DateTime<Utc>,
    ) -> GraphResult<PostId> {
        let post = Post {
            post_id: PostId::derive(author_id, timestamp),
            content: content.to_owned(),
            timestamp,
        };

        let cypher = r#"
            MATCH (u:User {id: $author_id})
            CREATE (p:Post {post_id: $post_id, content: $content, timestamp: $timestamp})
            MERGE (u)-[:POSTED]->(p)
            RETURN p.post_id AS post_id
        "#;

        let rows = self
            .store
            .run_write(
                Statement::new(cypher, &["post_id"])
                    .param("author_id", author_id)
                    .param("post_id", post.post_id.as_str())
                    .param("content", post.content.as_str())
                    .param("timestamp", post.timestamp.to_rfc3339()),
            )
            .await?;

        if rows.is_empty() {
            return Err(GraphError::AuthorNotFound {
                id: author_id.to_owned(),
            });
        }

        debug!(post_id = %post.post_id, edge = Relationship::Posted.as_str(), "created post");
        Ok(post.post_id)
    }

    /// Record that `follower_id` follows `followee_id`. Idempotent: the
    /// edge is merged, so repeat calls never produce a duplicate.
    /// Reflexive follows are rejected before any store call.
    pub async fn follow_user(&self, follower_id: &str, followee_id: &str) -> GraphResult<()> {
        if follower_id == followee_id {
            return Err(GraphError::SelfFollow {
                id: follower_id.to_owned(),
            });
        }

        let cypher = r#"
            MATCH (a:User {id: $follower_id}), (b:User {id: $followee_id})
            MERGE (a)-[:FOLLOWS]->(b)
            RETURN b.id AS id
        "#;

        let rows = self
            .store
            .run_write(
                Statement::new(cypher, &["id"])
                    .param("follower_id", follower_id)
                    .param("followee_id", followee_id),
            )
            .await?;

        if rows.is_empty() {
            // Zero rows means an endpoint match failed; users are never
            // deleted, so exactly one of the two is missing.
            let missing = if !self.user_exists(follower_id).await? {
                follower_id
            } else {
                followee_id
            };
            return Err(GraphError::UserNotFound {
                id: missing.to_owned(),
            });
        }

        debug!(%follower_id, %followee_id, edge = Relationship::Follows.as_str(), "follow recorded");
        Ok(())
    }

    /// Attach a comment to the post identified by `post_id`.
    ///
    /// The target is matched by its unique id, never by content. The
    /// comment and its WROTE, COMMENTED_ON and ON edges are created in
    /// one write unit. COMMENTED_ON is redundant with WROTE plus ON;
    /// existing graph consumers traverse it directly, so it is kept.
    pub async fn comment_on_post(
        &self,
        author_id: &str,
        post_id: &PostId,
        content: &str,
        timestamp: DateTime<Utc>,
    ) -> GraphResult<()> {
        let comment = Comment {
            content: content.to_owned(),
            timestamp,
        };

        let cypher = r#"
            MATCH (u:User {id: $author_id}), (p:Post {post_id: $post_id})
            CREATE (c:Comment {content: $content, timestamp: $timestamp})
            CREATE (u)-[:WROTE]->(c)
            CREATE (u)-[:COMMENTED_ON]->(p)
            CREATE (c)-[:ON]->(p)
            RETURN p.post_id AS post_id
        "#;

        let rows = self
            .store
            .run_write(
                Statement::new(cypher, &["post_id"])
                    .param("author_id", author_id)
                    .param("post_id", post_id.as_str())
                    .param("content", comment.content.as_str())
                    .param("timestamp", comment.timestamp.to_rfc3339()),
            )
            .await?;

        if rows.is_empty() {
            if !self.user_exists(author_id).await? {
                return Err(GraphError::UserNotFound {
                    id: author_id.to_owned(),
                });
            }
            return Err(GraphError::PostNotFound {
                post_id: post_id.clone(),
            });
        }

        debug!(%author_id, %post_id, edge = Relationship::On.as_str(), "comment recorded");
        Ok(())
    }

    /// Ids of the users following `id`. An unknown id yields an empty
    /// sequence, indistinguishable from a user with no followers;
    /// callers that need to know whether the subject exists must check
    /// `user_exists` separately.
    pub async fn list_followers(&self, id: &str) -> GraphResult<Vec<String>> {
        let cypher = "MATCH (f:User)-[:FOLLOWS]->(u:User {id: $id}) RETURN f.id AS follower_id";

        let rows = self
            .store
            .run_read(Statement::new(cypher, &["follower_id"]).param("id", id))
            .await?;

        let mut followers = Vec::with_capacity(rows.len());
        for row in &rows {
            followers.push(row.require_str("follower_id")?.to_owned());
        }

        debug!(%id, count = followers.len(), "listed followers");
        Ok(followers)
    }

    /// Whether a user node with this id exists.
    pub async fn user_exists(&self, id: &str) -> GraphResult<bool> {
        let cypher = "MATCH (u:User {id: $id}) RETURN u.id AS id";

        let rows = self
            .store
            .run_read(Statement::new(cypher, &["id"]).param("id", id))
            .await?;

        Ok(!rows.is_empty())
    }
}
