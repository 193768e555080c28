use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable posted message. Created once at post time, never mutated
/// or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tweet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Tweet {
    /// Construct a new tweet with a fresh id and the current timestamp.
    pub fn new(user_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Sort tweets into timeline order and truncate to the page size.
///
/// Timeline order is newest-first by `created_at`, ties broken by `id`
/// descending so the order is total and truncation is deterministic.
pub fn rank_timeline(tweets: &mut Vec<Tweet>, page_size: usize) {
    tweets.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    tweets.truncate(page_size);
}
