/// Tweet posting handlers
use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::handlers::AppState;
use crate::middleware::UserId;

/// Longest accepted tweet, in characters.
pub const MAX_TWEET_CHARS: usize = 280;

/// Tweet creation payload
#[derive(Debug, Deserialize)]
pub struct TweetRequest {
    pub content: String,
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(AppError::ValidationError(
            "content must not be blank".to_string(),
        ));
    }
    if content.chars().count() > MAX_TWEET_CHARS {
        return Err(AppError::ValidationError(format!(
            "content exceeds {} characters",
            MAX_TWEET_CHARS
        )));
    }
    Ok(())
}

/// POST /api/v1/tweets
/// Post a new tweet as the calling user
#[post("/tweets")]
pub async fn post_tweet(
    user: UserId,
    body: web::Json<TweetRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let TweetRequest { content } = body.into_inner();
    validate_content(&content)?;

    let tweet = state.posts.post_tweet(user.0, content).await?;

    Ok(HttpResponse::Created().json(tweet))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_rejected() {
        assert!(validate_content("").is_err());
        assert!(validate_content("   ").is_err());
        assert!(validate_content("\n\t").is_err());
    }

    #[test]
    fn test_280_chars_accepted() {
        let content = "a".repeat(280);
        assert!(validate_content(&content).is_ok());
    }

    #[test]
    fn test_281_chars_rejected() {
        let content = "a".repeat(281);
        assert!(validate_content(&content).is_err());
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 280 multibyte characters are within the limit
        let content = "é".repeat(280);
        assert!(validate_content(&content).is_ok());
    }
}
