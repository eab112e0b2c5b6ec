//! End-to-end flow against a running Neo4j instance.
//!
//! These tests require a live store and are ignored by default:
//!   docker run -p 7687:7687 -e NEO4J_AUTH=neo4j/password neo4j:5
//!   cargo test -- --ignored

use std::sync::Arc;

use chrono::Utc;
use social_graph::{
    GraphError, GraphStore, Neo4jStore, PostId, SocialGraphService, Statement,
};

fn connect() -> Neo4jStore {
    let uri = std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string());
    let user = std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());
    let password = std::env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "password".to_string());
    Neo4jStore::connect(&uri, &user, &password).expect("Failed to connect to Neo4j")
}

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, Utc::now().timestamp_millis())
}

#[tokio::test]
#[ignore] // Ignore by default, run manually with: cargo test -- --ignored
async fn test_upsert_converges_to_latest_values() {
    let store = connect();
    let service = SocialGraphService::new(Arc::new(store));

    let id = unique("user");
    service
        .upsert_user(&id, "Ann", 30)
        .await
        .expect("first upsert failed");
    service
        .upsert_user(&id, "Anna", 31)
        .await
        .expect("second upsert failed");

    let users = service.list_users().await.expect("list_users failed");
    let matching: Vec<_> = users.iter().filter(|u| u.id == id).collect();

    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].name, "Anna");
    assert_eq!(matching[0].age, 31);
}

#[tokio::test]
#[ignore]
async fn test_repeated_follow_yields_one_edge() {
    let store = connect();
    let service = SocialGraphService::new(Arc::new(store));

    let follower = unique("follower");
    let followee = unique("followee");
    service
        .upsert_user(&follower, "Bo", 25)
        .await
        .expect("upsert failed");
    service
        .upsert_user(&followee, "Ann", 30)
        .await
        .expect("upsert failed");

    service
        .follow_user(&follower, &followee)
        .await
        .expect("first follow failed");
    service
        .follow_user(&follower, &followee)
        .await
        .expect("second follow failed");

    let followers = service
        .list_followers(&followee)
        .await
        .expect("list_followers failed");

    assert_eq!(
        followers.iter().filter(|id| **id == follower).count(),
        1,
        "repeat follows must not duplicate the edge"
    );
}

#[tokio::test]
#[ignore]
async fn test_create_post_requires_existing_author() {
    let store = connect();
    let service = SocialGraphService::new(Arc::new(store.clone()));

    let ghost = unique("ghost");
    let ts = Utc::now();
    let err = service
        .create_post(&ghost, "hello", ts)
        .await
        .expect_err("expected AuthorNotFound");

    assert!(matches!(err, GraphError::AuthorNotFound { id } if id == ghost));

    // The failed match left no orphan Post behind.
    let orphan = PostId::derive(&ghost, ts);
    let rows = store
        .run_read(
            Statement::new(
                "MATCH (p:Post {post_id: $post_id}) RETURN p.post_id AS post_id",
                &["post_id"],
            )
            .param("post_id", orphan.as_str()),
        )
        .await
        .expect("orphan check failed");

    assert!(rows.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_comment_requires_existing_post() {
    let store = connect();
    let service = SocialGraphService::new(Arc::new(store));

    let author = unique("author");
    service
        .upsert_user(&author, "Ann", 30)
        .await
        .expect("upsert failed");

    let missing = PostId::from(unique("nope").as_str());
    let err = service
        .comment_on_post(&author, &missing, "nice!", Utc::now())
        .await
        .expect_err("expected PostNotFound");

    assert!(matches!(err, GraphError::PostNotFound { .. }));
}

#[tokio::test]
#[ignore]
async fn test_full_social_flow() {
    let store = connect();
    let service = SocialGraphService::new(Arc::new(store.clone()));

    let u1 = unique("u1");
    let u2 = unique("u2");

    service
        .upsert_user(&u1, "Ann", 30)
        .await
        .expect("upsert u1 failed");
    service
        .upsert_user(&u2, "Bo", 25)
        .await
        .expect("upsert u2 failed");

    service
        .follow_user(&u2, &u1)
        .await
        .expect("follow failed");
    assert_eq!(
        service.list_followers(&u1).await.expect("list failed"),
        vec![u2.clone()]
    );

    let ts = Utc::now();
    let post_id = service
        .create_post(&u1, "hello world", ts)
        .await
        .expect("create_post failed");
    assert_eq!(post_id.as_str(), format!("{}_{}", u1, ts.timestamp()));

    service
        .comment_on_post(&u2, &post_id, "nice!", Utc::now())
        .await
        .expect("comment failed");

    // The comment reaches the post via its ON edge.
    let rows = store
        .run_read(
            Statement::new(
                "MATCH (c:Comment)-[:ON]->(p:Post {post_id: $post_id}) \
                 RETURN c.content AS content",
                &["content"],
            )
            .param("post_id", post_id.as_str()),
        )
        .await
        .expect("traversal failed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].require_str("content").unwrap(), "nice!");

    // Exactly one WROTE edge from the commenter to that comment.
    let rows = store
        .run_read(
            Statement::new(
                "MATCH (u:User {id: $id})-[:WROTE]->(c:Comment)-[:ON]->(p:Post {post_id: $post_id}) \
                 RETURN c.content AS content",
                &["content"],
            )
            .param("id", u2.as_str())
            .param("post_id", post_id.as_str()),
        )
        .await
        .expect("traversal failed");

    assert_eq!(rows.len(), 1);

    // The redundant COMMENTED_ON edge is written as well.
    let rows = store
        .run_read(
            Statement::new(
                "MATCH (u:User {id: $id})-[:COMMENTED_ON]->(p:Post {post_id: $post_id}) \
                 RETURN p.post_id AS post_id",
                &["post_id"],
            )
            .param("id", u2.as_str())
            .param("post_id", post_id.as_str()),
        )
        .await
        .expect("traversal failed");

    assert_eq!(rows.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_self_follow_is_rejected() {
    let store = connect();
    let service = SocialGraphService::new(Arc::new(store));

    let id = unique("narcissist");
    service
        .upsert_user(&id, "Cy", 40)
        .await
        .expect("upsert failed");

    let err = service
        .follow_user(&id, &id)
        .await
        .expect_err("expected SelfFollow");

    assert!(matches!(err, GraphError::SelfFollow { .. }));
}
