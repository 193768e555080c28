use async_trait::async_trait;
use ripple_cache::{CacheKey, RippleCache};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::metrics::{
    TIMELINE_CACHE_EVENTS, TIMELINE_CACHE_WRITE_TOTAL, TIMELINE_INVALIDATIONS_TOTAL,
};
use crate::models::Tweet;

/// Per-viewer cached prefix of the ranked timeline.
///
/// `put` always receives the complete, already-ranked, already-truncated
/// sequence and replaces any previous entry in full; no sorting, merging,
/// or truncation happens here.
#[async_trait]
pub trait TimelineCache: Send + Sync {
    /// Cached timeline for a viewer, if an entry is present.
    async fn get(&self, viewer_id: Uuid) -> Result<Option<Vec<Tweet>>>;

    /// Replace the viewer's entry with `tweets` for `ttl_seconds`.
    async fn put(&self, viewer_id: Uuid, tweets: &[Tweet], ttl_seconds: u64) -> Result<()>;

    /// Drop the viewer's entry. Invalidating an absent entry is a no-op.
    async fn invalidate(&self, viewer_id: Uuid) -> Result<()>;
}

/// Redis-backed timeline cache
#[derive(Clone)]
pub struct RedisTimelineCache {
    cache: RippleCache,
}

impl RedisTimelineCache {
    pub fn new(cache: RippleCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl TimelineCache for RedisTimelineCache {
    async fn get(&self, viewer_id: Uuid) -> Result<Option<Vec<Tweet>>> {
        let key = CacheKey::timeline(viewer_id);

        match self.cache.get::<Vec<Tweet>>(&key).await {
            Ok(hit) => {
                let event = if hit.is_some() { "hit" } else { "miss" };
                TIMELINE_CACHE_EVENTS.with_label_values(&[event]).inc();
                Ok(hit)
            }
            Err(e) => {
                TIMELINE_CACHE_EVENTS.with_label_values(&["error"]).inc();
                Err(e.into())
            }
        }
    }

    async fn put(&self, viewer_id: Uuid, tweets: &[Tweet], ttl_seconds: u64) -> Result<()> {
        let key = CacheKey::timeline(viewer_id);

        match self.cache.set(&key, &tweets, ttl_seconds).await {
            Ok(()) => {
                debug!(%viewer_id, entries = tweets.len(), "Timeline cache WRITE");
                TIMELINE_CACHE_WRITE_TOTAL
                    .with_label_values(&["success"])
                    .inc();
                Ok(())
            }
            Err(e) => {
                TIMELINE_CACHE_WRITE_TOTAL
                    .with_label_values(&["error"])
                    .inc();
                Err(e.into())
            }
        }
    }

    async fn invalidate(&self, viewer_id: Uuid) -> Result<()> {
        let key = CacheKey::timeline(viewer_id);
        self.cache.del(&key).await?;

        debug!(%viewer_id, "Timeline cache INVALIDATE");
        TIMELINE_INVALIDATIONS_TOTAL.inc();
        Ok(())
    }
}
