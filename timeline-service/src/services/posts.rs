use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::TimelineCache;
use crate::db::{FollowGraph, TweetStore, UserDirectory};
use crate::error::{AppError, Result};
use crate::events::{EventPublisher, TweetPostedEvent};
use crate::models::Tweet;

/// Write path: persists a tweet, then fans out cache invalidation to the
/// author and every follower, then emits the tweet-posted event.
pub struct PostService {
    users: Arc<dyn UserDirectory>,
    follows: Arc<dyn FollowGraph>,
    tweets: Arc<dyn TweetStore>,
    cache: Arc<dyn TimelineCache>,
    events: Arc<dyn EventPublisher>,
}

impl PostService {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        follows: Arc<dyn FollowGraph>,
        tweets: Arc<dyn TweetStore>,
        cache: Arc<dyn TimelineCache>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            users,
            follows,
            tweets,
            cache,
            events,
        }
    }

    /// Persist a new tweet and propagate its effects.
    ///
    /// The durable write completes before any fan-out begins, so an
    /// invalidated follower's next rebuild always finds the new tweet.
    /// Invalidation deletes rather than updates: each follower's feed
    /// composition depends on their own followee set, which the poster
    /// does not know. Cache and event failures are logged and swallowed;
    /// the caller still gets the persisted tweet.
    pub async fn post_tweet(&self, author_id: Uuid, content: String) -> Result<Tweet> {
        if !self.users.exists(author_id).await? {
            return Err(AppError::NotFound(format!(
                "user {} does not exist",
                author_id
            )));
        }

        let tweet = Tweet::new(author_id, content);
        self.tweets.save(&tweet).await?;

        let mut fan_out = self.follows.followers_of(author_id).await?;
        fan_out.push(author_id);

        for viewer_id in &fan_out {
            if let Err(e) = self.cache.invalidate(*viewer_id).await {
                warn!(%viewer_id, tweet_id = %tweet.id, "timeline invalidation failed: {}", e);
            }
        }

        let event = TweetPostedEvent::from_tweet(&tweet);
        if let Err(e) = self.events.publish(&event).await {
            warn!(tweet_id = %tweet.id, "tweet-posted event dropped: {}", e);
        }

        info!(
            tweet_id = %tweet.id,
            author_id = %author_id,
            fan_out = fan_out.len(),
            "tweet posted"
        );

        Ok(tweet)
    }
}
