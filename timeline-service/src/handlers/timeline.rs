/// Timeline read handlers
use actix_web::{get, web, HttpResponse};

use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::UserId;

/// GET /api/v1/timeline
/// Read the calling user's timeline, newest first
#[get("/timeline")]
pub async fn get_timeline(user: UserId, state: web::Data<AppState>) -> Result<HttpResponse> {
    let tweets = state.timeline.get_timeline(user.0).await?;

    Ok(HttpResponse::Ok().json(tweets))
}
