/// Timeline caching and invalidation
pub mod timeline_cache;

pub use timeline_cache::{RedisTimelineCache, TimelineCache};
