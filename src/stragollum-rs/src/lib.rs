//! Stragollum Client Library
//!
//! HTTP client for the Data API. Handles narrow from a [`Client`] to a
//! [`Database`] (one keyspace) to a [`Collection`]:
//!
//! ```rust,no_run
//! use stragollum_rs::{Client, CollectionDefinition};
//! use serde_json::json;
//!
//! # async fn run() -> stragollum_rs::Result<()> {
//! let client = Client::new(None, Some("AstraCS:...".to_string()));
//! let db = client.get_database("https://my-db.apps.example.com", None, Some("ks1"));
//!
//! let books = db
//!     .create_collection("books", &CollectionDefinition::new().with_lexical("standard"))
//!     .await?;
//! let id = books.insert_one(&json!({"title": "Dune"})).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod collection;
mod commander;
mod database;

pub use client::Client;
pub use collection::Collection;
pub use commander::{DataApiCommander, TOKEN_HEADER};
pub use database::Database;
pub use stragollum_core::{
    ClientConfig, CollectionDefinition, Environment, ServiceOptions, ValidationError,
    VectorOptions, DEFAULT_KEYSPACE,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Server error: status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to serialize request: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Failed to deserialize response: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("Unexpected response from server: {0}")]
    UnexpectedResponse(String),

    #[error("Empty result: {0}")]
    EmptyResult(String),

    #[error("Invalid collection definition: {0}")]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
