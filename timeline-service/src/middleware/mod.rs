/// HTTP middleware utilities for timeline-service
///
/// Caller identity arrives as an `X-User-Id` header set by the upstream
/// gateway; this service trusts it and only checks that it parses. The
/// extractor rejects requests without a usable id before the handler body
/// runs.
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extracted caller identity.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::BadRequest(format!("missing {} header", USER_ID_HEADER)))
            .and_then(|raw| {
                Uuid::parse_str(raw).map_err(|_| {
                    AppError::BadRequest(format!("invalid {} header", USER_ID_HEADER))
                })
            })
            .map(UserId);

        ready(parsed)
    }
}
