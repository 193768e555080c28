//! Ripple shared caching layer
//!
//! Provides a consistent caching strategy across services with:
//! - Unified key schema
//! - JSON document values with full-replace SETEX writes
//! - TTL jitter to spread expiry of entries written together
//! - Corrupted-entry eviction on deserialization failure

mod error;
mod keys;

pub use error::{CacheError, CacheResult};
pub use keys::CacheKey;

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

/// Default TTL values (seconds)
pub mod ttl {
    pub const TIMELINE: u64 = 300; // 5 minutes
}

/// Ripple cache client.
///
/// Clones of the underlying [`ConnectionManager`] are taken per operation;
/// the manager multiplexes over one connection and no lock is held across
/// an awaited Redis call.
#[derive(Clone)]
pub struct RippleCache {
    redis: ConnectionManager,
}

impl RippleCache {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    /// Add jitter to TTL to prevent thundering herd
    fn add_jitter(ttl_secs: u64) -> u64 {
        let jitter_percent = (rand::random::<u32>() % 10) as f64 / 100.0;
        let jitter = (ttl_secs as f64 * jitter_percent).round() as u64;
        ttl_secs + jitter
    }

    /// Get a JSON value from cache.
    ///
    /// An entry that no longer deserializes is deleted and reported as a
    /// miss rather than an error.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        let mut conn = self.redis.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(data)) => match serde_json::from_str::<T>(&data) {
                Ok(value) => {
                    debug!(key = %key, "Cache hit");
                    Ok(Some(value))
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Cache deserialization failed");
                    let _ = conn.del::<_, ()>(key).await;
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!(key = %key, "Cache miss");
                Ok(None)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Redis get error");
                Err(CacheError::Redis(e))
            }
        }
    }

    /// Set a JSON value with TTL. Replaces any existing entry in one SETEX.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) -> CacheResult<()> {
        let data = serde_json::to_string(value).map_err(CacheError::Serialization)?;
        let ttl_with_jitter = Self::add_jitter(ttl_secs);

        let mut conn = self.redis.clone();
        conn.set_ex::<_, _, ()>(key, data, ttl_with_jitter)
            .await
            .map_err(CacheError::Redis)?;

        debug!(key = %key, ttl = ttl_with_jitter, "Cache set");
        Ok(())
    }

    /// Delete a key. Deleting an absent key is a no-op.
    pub async fn del(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.redis.clone();
        conn.del::<_, ()>(key).await.map_err(CacheError::Redis)?;

        debug!(key = %key, "Cache delete");
        Ok(())
    }
}
