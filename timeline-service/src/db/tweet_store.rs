/// Tweet persistence
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Tweet;

/// Authoritative, append-mostly store of posted tweets.
#[async_trait]
pub trait TweetStore: Send + Sync {
    /// Durably persist a new tweet. Must not silently drop writes.
    async fn save(&self, tweet: &Tweet) -> Result<()>;

    /// Fetch every tweet authored by any of the given users in a single
    /// query. Returned order is unspecified; ranking is the caller's
    /// concern.
    async fn fetch_by_authors(&self, author_ids: &[Uuid]) -> Result<Vec<Tweet>>;
}

/// Postgres-backed tweet store
pub struct PgTweetStore {
    pool: PgPool,
}

impl PgTweetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TweetStore for PgTweetStore {
    async fn save(&self, tweet: &Tweet) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tweets (id, user_id, content, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(tweet.id)
        .bind(tweet.user_id)
        .bind(&tweet.content)
        .bind(tweet.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch_by_authors(&self, author_ids: &[Uuid]) -> Result<Vec<Tweet>> {
        let tweets = sqlx::query_as::<_, Tweet>(
            r#"
            SELECT id, user_id, content, created_at
            FROM tweets
            WHERE user_id = ANY($1)
            "#,
        )
        .bind(author_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(tweets)
    }
}
