/// Follow graph persistence
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

/// Authoritative set of follower/followee edges.
#[async_trait]
pub trait FollowGraph: Send + Sync {
    /// Users the given user follows. Empty when there are none.
    async fn followees_of(&self, user_id: Uuid) -> Result<Vec<Uuid>>;

    /// Users following the given user. Empty when there are none.
    async fn followers_of(&self, user_id: Uuid) -> Result<Vec<Uuid>>;

    /// Whether the edge follower -> followee exists.
    async fn edge_exists(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    /// Insert the edge follower -> followee.
    async fn save_edge(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()>;

    /// Delete the edge follower -> followee.
    async fn delete_edge(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()>;
}

/// Postgres-backed follow graph
pub struct PgFollowGraph {
    pool: PgPool,
}

impl PgFollowGraph {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowGraph for PgFollowGraph {
    async fn followees_of(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let followees = sqlx::query_scalar(
            r#"
            SELECT followee_id
            FROM follows
            WHERE follower_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(followees)
    }

    async fn followers_of(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let followers = sqlx::query_scalar(
            r#"
            SELECT follower_id
            FROM follows
            WHERE followee_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(followers)
    }

    async fn edge_exists(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM follows
                WHERE follower_id = $1 AND followee_id = $2
            )
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn save_edge(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        // Races with a concurrent identical follow resolve silently; the
        // duplicate check belongs to the service layer.
        sqlx::query(
            r#"
            INSERT INTO follows (follower_id, followee_id)
            VALUES ($1, $2)
            ON CONFLICT (follower_id, followee_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_edge(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM follows
            WHERE follower_id = $1 AND followee_id = $2
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
