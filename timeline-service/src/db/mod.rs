/// Database access layer
///
/// Each collaborator the timeline core depends on is a trait with a
/// Postgres-backed implementation, so services can be wired against
/// in-memory fakes in tests.
pub mod follow_graph;
pub mod tweet_store;
pub mod user_directory;

pub use follow_graph::{FollowGraph, PgFollowGraph};
pub use tweet_store::{PgTweetStore, TweetStore};
pub use user_directory::{PgUserDirectory, UserDirectory};
