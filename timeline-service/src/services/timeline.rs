use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::TimelineCache;
use crate::db::{FollowGraph, TweetStore, UserDirectory};
use crate::error::{AppError, Result};
use crate::models::{rank_timeline, Tweet};

/// Read path: resolves a viewer's timeline, preferring the cache and
/// falling back to a merge-and-rank rebuild from the tweet store.
pub struct TimelineService {
    users: Arc<dyn UserDirectory>,
    follows: Arc<dyn FollowGraph>,
    tweets: Arc<dyn TweetStore>,
    cache: Arc<dyn TimelineCache>,
    page_size: usize,
    cache_ttl_seconds: u64,
}

impl TimelineService {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        follows: Arc<dyn FollowGraph>,
        tweets: Arc<dyn TweetStore>,
        cache: Arc<dyn TimelineCache>,
        page_size: usize,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            users,
            follows,
            tweets,
            cache,
            page_size,
            cache_ttl_seconds,
        }
    }

    /// Return the viewer's timeline, newest first, at most one page.
    ///
    /// A present, non-empty cache entry is returned verbatim; staleness is
    /// bounded only by the TTL and by invalidation from the post path. On
    /// a miss the timeline is rebuilt from the viewer's fan-in set (the
    /// viewer plus everyone they follow) and, when non-empty, written
    /// back. An unreachable cache degrades to the rebuild; it never fails
    /// the request.
    pub async fn get_timeline(&self, viewer_id: Uuid) -> Result<Vec<Tweet>> {
        if !self.users.exists(viewer_id).await? {
            return Err(AppError::NotFound(format!(
                "user {} does not exist",
                viewer_id
            )));
        }

        match self.cache.get(viewer_id).await {
            Ok(Some(cached)) if !cached.is_empty() => {
                debug!(%viewer_id, entries = cached.len(), "timeline served from cache");
                return Ok(cached);
            }
            // An empty entry is indistinguishable from a feed that gained
            // its first tweet since caching; treat it as a miss.
            Ok(_) => {}
            Err(e) => {
                warn!(%viewer_id, "timeline cache read failed, rebuilding: {}", e);
            }
        }

        let mut authors = self.follows.followees_of(viewer_id).await?;
        authors.push(viewer_id);

        let mut timeline = self.tweets.fetch_by_authors(&authors).await?;
        rank_timeline(&mut timeline, self.page_size);

        // Empty results are not cached: an empty entry would pin an empty
        // feed through a whole TTL window after the user's first follow.
        if !timeline.is_empty() {
            if let Err(e) = self
                .cache
                .put(viewer_id, &timeline, self.cache_ttl_seconds)
                .await
            {
                warn!(%viewer_id, "timeline cache write failed: {}", e);
            }
        }

        debug!(%viewer_id, entries = timeline.len(), "timeline rebuilt from store");
        Ok(timeline)
    }
}
