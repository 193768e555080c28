/// Timeline Service Library
///
/// Assembles reverse-chronological home timelines for the Ripple platform
/// and keeps the Redis timeline cache coherent with the Postgres source of
/// truth. Owns tweet posting, the follow graph, and the fan-out
/// invalidation that runs on every write.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers for tweets, timelines, and follows
/// - `models`: Tweet data structures and timeline ranking
/// - `services`: Business logic for reads, writes, and follow management
/// - `db`: Postgres repositories for users, tweets, and follow edges
/// - `cache`: Timeline cache port and its Redis adapter
/// - `events`: Tweet-posted event publishing over Kafka
/// - `middleware`: Caller identity extraction
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
