/// Configuration management for Timeline Service
///
/// Loads configuration from environment variables.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Redis configuration
    pub redis: RedisConfig,
    /// Kafka configuration
    pub kafka: KafkaConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Timeline assembly tuning
    pub timeline: TimelineConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
    /// Min connections in pool
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis URL (redis://host:port)
    pub url: String,
}

/// Kafka configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaConfig {
    /// Broker list; absent selects the no-op event publisher
    pub brokers: Option<String>,
    /// Topic for tweet-posted events
    pub topic: String,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins; "*" allows any
    pub allowed_origins: String,
}

/// Timeline assembly tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Page size N: the cached/returned timeline never exceeds this
    pub page_size: usize,
    /// Cache TTL in seconds
    pub ttl_seconds: u64,
}

// Default values
fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_page_size() -> usize {
    50
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
        };

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL environment variable not set")?,
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_max_connections),
            min_connections: std::env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_min_connections),
        };

        let redis = RedisConfig {
            url: std::env::var("REDIS_URL").context("REDIS_URL environment variable not set")?,
        };

        let kafka = KafkaConfig {
            brokers: std::env::var("KAFKA_BROKERS").ok(),
            topic: std::env::var("KAFKA_TOPIC")
                .unwrap_or_else(|_| "tweet-posted-events".to_string()),
        };

        let cors = CorsConfig {
            allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".into()),
        };

        let timeline = TimelineConfig {
            page_size: std::env::var("TIMELINE_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_page_size),
            ttl_seconds: std::env::var("TIMELINE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(ripple_cache::ttl::TIMELINE),
        };

        Ok(Config {
            app,
            database,
            redis,
            kafka,
            cors,
            timeline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_default_values() {
        std::env::set_var("DATABASE_URL", "postgres://test");
        std::env::set_var("REDIS_URL", "redis://localhost");
        std::env::remove_var("TIMELINE_PAGE_SIZE");
        std::env::remove_var("TIMELINE_TTL_SECONDS");
        std::env::remove_var("KAFKA_BROKERS");

        let config = Config::from_env().unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 2);
        assert_eq!(config.kafka.topic, "tweet-posted-events");
        assert!(config.kafka.brokers.is_none());
        assert_eq!(config.cors.allowed_origins, "*");
        assert_eq!(config.timeline.page_size, 50);
        assert_eq!(config.timeline.ttl_seconds, 300);
    }

    #[test]
    #[serial]
    fn test_timeline_overrides() {
        std::env::set_var("DATABASE_URL", "postgres://test");
        std::env::set_var("REDIS_URL", "redis://localhost");
        std::env::set_var("TIMELINE_PAGE_SIZE", "20");
        std::env::set_var("TIMELINE_TTL_SECONDS", "60");

        let config = Config::from_env().unwrap();

        assert_eq!(config.timeline.page_size, 20);
        assert_eq!(config.timeline.ttl_seconds, 60);

        std::env::remove_var("TIMELINE_PAGE_SIZE");
        std::env::remove_var("TIMELINE_TTL_SECONDS");
    }
}
