/// User existence checks
///
/// Users are provisioned out of band; this service only ever asks whether
/// an id references one.
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

/// Existence predicate over provisioned users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether `user_id` references an existing user.
    async fn exists(&self, user_id: Uuid) -> Result<bool>;
}

/// Postgres-backed user directory
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn exists(&self, user_id: Uuid) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)"#)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
