use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::db::{FollowGraph, UserDirectory};
use crate::error::{AppError, Result};

/// Follow graph management.
///
/// Follow changes do not touch the timeline cache; they become visible to
/// the follower's feed no later than TTL expiry.
pub struct FollowService {
    users: Arc<dyn UserDirectory>,
    follows: Arc<dyn FollowGraph>,
}

impl FollowService {
    pub fn new(users: Arc<dyn UserDirectory>, follows: Arc<dyn FollowGraph>) -> Self {
        Self { users, follows }
    }

    /// Create the edge follower -> followee.
    pub async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        if follower_id == followee_id {
            return Err(AppError::BadRequest("cannot follow yourself".to_string()));
        }

        self.ensure_exists(follower_id).await?;
        self.ensure_exists(followee_id).await?;

        if self.follows.edge_exists(follower_id, followee_id).await? {
            return Err(AppError::Conflict(format!(
                "already following user {}",
                followee_id
            )));
        }

        self.follows.save_edge(follower_id, followee_id).await?;
        info!(%follower_id, %followee_id, "follow edge created");
        Ok(())
    }

    /// Remove the edge follower -> followee.
    pub async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        if follower_id == followee_id {
            return Err(AppError::BadRequest("cannot unfollow yourself".to_string()));
        }

        self.ensure_exists(follower_id).await?;
        self.ensure_exists(followee_id).await?;

        if !self.follows.edge_exists(follower_id, followee_id).await? {
            return Err(AppError::Conflict(format!(
                "not following user {}",
                followee_id
            )));
        }

        self.follows.delete_edge(follower_id, followee_id).await?;
        info!(%follower_id, %followee_id, "follow edge removed");
        Ok(())
    }

    async fn ensure_exists(&self, user_id: Uuid) -> Result<()> {
        if !self.users.exists(user_id).await? {
            return Err(AppError::NotFound(format!(
                "user {} does not exist",
                user_id
            )));
        }
        Ok(())
    }
}
