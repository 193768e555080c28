/// Follow graph handlers
use actix_web::{delete, post, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::UserId;

/// Follow request payload
#[derive(Debug, Deserialize)]
pub struct FollowRequest {
    /// User ID to follow
    pub followee_id: Uuid,
}

/// POST /api/v1/follows
/// Follow a user as the calling user
#[post("/follows")]
pub async fn follow_user(
    user: UserId,
    body: web::Json<FollowRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    state.follows.follow(user.0, body.followee_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/v1/follows/{followee_id}
/// Unfollow a user as the calling user
#[delete("/follows/{followee_id}")]
pub async fn unfollow_user(
    user: UserId,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    state.follows.unfollow(user.0, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
