/// Data models for timeline-service
///
/// This module defines structures for:
/// - Tweet: an immutable posted message
/// - Timeline ranking: the total order cached and returned to viewers
pub mod tweet;

pub use tweet::{rank_timeline, Tweet};
