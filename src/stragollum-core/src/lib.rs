//! Stragollum Core Library
//!
//! Transport-free building blocks shared by the Data API client:
//! - Deployment environments
//! - Collection definitions and their validation
//! - Command envelopes and response shapes
//! - Client configuration

pub mod config;
pub mod definition;
pub mod environment;
pub mod models;

// Re-export commonly used types
pub use config::ClientConfig;
pub use definition::{
    CollectionDefinition, DefaultIdOptions, LexicalOptions, RerankOptions,
    RerankServiceOptions, ServiceOptions, ValidationError, VectorOptions, VectorServiceOptions,
};
pub use environment::Environment;
pub use models::{API_PATH, DEFAULT_KEYSPACE};
