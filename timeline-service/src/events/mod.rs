//! Kafka event publishing for timeline-service
//!
//! Publishes tweet-posted events for downstream consumers (notifications,
//! analytics). Delivery is at-most-once: failures are logged and dropped,
//! never retried and never surfaced to the posting caller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rdkafka::producer::{FutureProducer, FutureRecord};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::metrics::TWEET_EVENTS_PUBLISHED;
use crate::models::Tweet;

/// Event payload published after a tweet is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetPostedEvent {
    pub tweet_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub posted_at: DateTime<Utc>,
}

impl TweetPostedEvent {
    pub fn from_tweet(tweet: &Tweet) -> Self {
        Self {
            tweet_id: tweet.id,
            user_id: tweet.user_id,
            content: tweet.content.clone(),
            posted_at: tweet.created_at,
        }
    }
}

/// Outbound sink for tweet-posted facts.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &TweetPostedEvent) -> Result<()>;
}

/// Kafka-backed event publisher
#[derive(Clone)]
pub struct KafkaEventPublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaEventPublisher {
    /// Create a new Kafka event publisher
    pub fn new(brokers: &str, topic: String) -> anyhow::Result<Self> {
        let producer = rdkafka::config::ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("client.id", "timeline-service")
            // Idempotency and reliability settings
            .set("enable.idempotence", "true")
            .set("acks", "all")
            .set("retries", "3")
            .set("linger.ms", "5")
            .create::<FutureProducer>()?;

        info!(
            brokers = %brokers,
            topic = %topic,
            "Timeline service Kafka producer initialized"
        );

        Ok(Self { producer, topic })
    }
}

#[async_trait]
impl EventPublisher for KafkaEventPublisher {
    async fn publish(&self, event: &TweetPostedEvent) -> Result<()> {
        let payload = serde_json::to_string(event)?;
        // Key by tweet id so replays of one tweet land on one partition
        let partition_key = event.tweet_id.to_string();

        let record = FutureRecord::to(&self.topic)
            .key(&partition_key)
            .payload(&payload);

        match self.producer.send(record, Duration::from_secs(5)).await {
            Ok(_) => {
                info!(
                    tweet_id = %event.tweet_id,
                    user_id = %event.user_id,
                    "Published tweet-posted event to Kafka"
                );
                TWEET_EVENTS_PUBLISHED.with_label_values(&["success"]).inc();
                Ok(())
            }
            Err((err, _)) => {
                warn!(
                    error = ?err,
                    tweet_id = %event.tweet_id,
                    "Failed to publish tweet-posted event to Kafka"
                );
                TWEET_EVENTS_PUBLISHED.with_label_values(&["error"]).inc();
                Err(crate::error::AppError::Internal(format!(
                    "Failed to publish event: {}",
                    err
                )))
            }
        }
    }
}

/// Publisher used when no broker is configured; logs and drops.
pub struct NoopEventPublisher;

#[async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish(&self, event: &TweetPostedEvent) -> Result<()> {
        debug!(tweet_id = %event.tweet_id, "Kafka not configured, dropping tweet-posted event");
        TWEET_EVENTS_PUBLISHED.with_label_values(&["dropped"]).inc();
        Ok(())
    }
}
