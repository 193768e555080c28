//! Cache key schema
//!
//! All services must build keys through these generators so invalidation
//! and population agree on the exact key text.

use uuid::Uuid;

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Cached timeline prefix for a viewer
    /// Format: timeline:{user_id}
    pub fn timeline(user_id: Uuid) -> String {
        format!("timeline:{}", user_id)
    }
}
