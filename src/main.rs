use std::io::{self, BufRead, Lines, StdinLock, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use social_graph::{Config, Neo4jStore, PostId, SocialGraphService};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const MENU: &str = "\nChoose a function:\n\
    1. Create user\n\
    2. Create post\n\
    3. Follow user\n\
    4. Comment on post\n\
    5. List followers of user\n\
    6. Get all users\n\
    >>> ";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_graph=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting social graph shell");

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    info!("Configuration loaded: Neo4j URI = {}", config.neo4j.uri);

    let store = Neo4jStore::connect(&config.neo4j.uri, &config.neo4j.user, &config.neo4j.password)
        .context("Failed to initialize Neo4j store")?;

    if !store
        .health_check()
        .await
        .context("Neo4j health check failed")?
    {
        anyhow::bail!("Neo4j is not healthy");
    }

    info!("Connected to Neo4j");

    let service = SocialGraphService::new(Arc::new(store));
    run_shell(&service).await
}

async fn run_shell(service: &SocialGraphService) -> Result<()> {
    let mut lines = io::stdin().lock().lines();

    let users = service.list_users().await?;
    for user in &users {
        println!("{}", serde_json::to_string(user)?);
    }
    let mut user_counter = users.len();

    while let Some(option) = prompt(&mut lines, MENU)? {
        let outcome = match option.trim() {
            "1" => create_user(service, &mut lines, &mut user_counter).await,
            "2" => create_post(service, &mut lines).await,
            "3" => follow_user(service, &mut lines).await,
            "4" => comment_on_post(service, &mut lines).await,
            "5" => list_followers(service, &mut lines).await,
            "6" => list_all_users(service).await,
            _ => {
                println!("Invalid option. Please choose a valid number.");
                Ok(())
            }
        };

        if let Err(err) = outcome {
            println!("{err}");
        }
    }

    Ok(())
}

fn prompt(lines: &mut Lines<StdinLock<'_>>, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    Ok(lines.next().transpose()?)
}

async fn create_user(
    service: &SocialGraphService,
    lines: &mut Lines<StdinLock<'_>>,
    user_counter: &mut usize,
) -> Result<()> {
    let Some(name) = prompt(lines, "Enter user name: ")? else {
        return Ok(());
    };
    let Some(age_input) = prompt(lines, "Enter user age: ")? else {
        return Ok(());
    };
    let Ok(age) = age_input.trim().parse::<i64>() else {
        println!("Age must be a whole number.");
        return Ok(());
    };

    let user_id = format!("user{}", *user_counter + 1);
    service.upsert_user(&user_id, name.trim(), age).await?;
    *user_counter += 1;
    println!("User {user_id} created.");
    Ok(())
}

async fn create_post(
    service: &SocialGraphService,
    lines: &mut Lines<StdinLock<'_>>,
) -> Result<()> {
    let Some(id) = prompt(lines, "Enter user ID: ")? else {
        return Ok(());
    };
    let Some(content) = prompt(lines, "Enter post content: ")? else {
        return Ok(());
    };

    let post_id = service
        .create_post(id.trim(), &content, Utc::now())
        .await?;
    println!("Post {post_id} created.");
    Ok(())
}

async fn follow_user(
    service: &SocialGraphService,
    lines: &mut Lines<StdinLock<'_>>,
) -> Result<()> {
    let Some(follower_id) = prompt(lines, "Enter follower ID: ")? else {
        return Ok(());
    };
    let Some(followee_id) = prompt(lines, "Enter followee ID: ")? else {
        return Ok(());
    };

    service
        .follow_user(follower_id.trim(), followee_id.trim())
        .await?;
    println!("Followed.");
    Ok(())
}

async fn comment_on_post(
    service: &SocialGraphService,
    lines: &mut Lines<StdinLock<'_>>,
) -> Result<()> {
    let Some(user_id) = prompt(lines, "Enter your user ID: ")? else {
        return Ok(());
    };
    let Some(post_id) = prompt(lines, "Enter post ID: ")? else {
        return Ok(());
    };
    let Some(comment) = prompt(lines, "Enter your comment: ")? else {
        return Ok(());
    };

    service
        .comment_on_post(
            user_id.trim(),
            &PostId::from(post_id.trim()),
            &comment,
            Utc::now(),
        )
        .await?;
    println!("Comment added.");
    Ok(())
}

async fn list_followers(
    service: &SocialGraphService,
    lines: &mut Lines<StdinLock<'_>>,
) -> Result<()> {
    let Some(id) = prompt(lines, "Enter user ID to list their followers: ")? else {
        return Ok(());
    };

    let followers = service.list_followers(id.trim()).await?;
    println!("Followers of {}: {:?}", id.trim(), followers);
    Ok(())
}

async fn list_all_users(service: &SocialGraphService) -> Result<()> {
    for user in service.list_users().await? {
        println!("{}", serde_json::to_string(&user)?);
    }
    Ok(())
}
