//! List, create and drop collections
//!
//! Walks through the collection lifecycle against a live Data API endpoint.
//!
//! Prerequisites:
//! 1. A database with the Data API enabled
//! 2. `ASTRA_DB_API_ENDPOINT` and `ASTRA_DB_APPLICATION_TOKEN` set
//! 3. Optionally a `stragollum.json` config file next to the working directory
//!
//! Run with: RUST_LOG=stragollum_rs=debug cargo run --example list_collections

use serde_json::json;
use stragollum_rs::{Client, ClientConfig, CollectionDefinition};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stragollum_rs=info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()?;

    let config = ClientConfig::load("stragollum.json").unwrap_or_else(|_| {
        tracing::warn!("Failed to load stragollum.json, using defaults");
        ClientConfig::default()
    });

    let endpoint = std::env::var("ASTRA_DB_API_ENDPOINT")?;
    let token = std::env::var("ASTRA_DB_APPLICATION_TOKEN")?;
    let keyspace = std::env::var("ASTRA_DB_KEYSPACE").ok();

    let client = Client::from_config(&config.with_token(token))?;
    let db = client.get_database(endpoint, None, keyspace.as_deref());
    println!("Keyspace: {} ({})", db.keyspace(), client.environment());

    for name in db.list_collection_names().await? {
        println!("  - {}", name);
    }

    let definition = CollectionDefinition::new().with_lexical("standard");

    let collection = db.create_collection("stragollum_example", &definition).await?;
    let id = collection
        .insert_one(&json!({"title": "Dune", "author": "Frank Herbert"}))
        .await?;
    println!("Inserted document {}", id);

    db.drop_collection(collection.name()).await?;
    println!("Dropped {}", collection.name());

    Ok(())
}
