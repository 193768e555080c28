use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ripple_cache::RippleCache;
use timeline_service::cache::RedisTimelineCache;
use timeline_service::db::{PgFollowGraph, PgTweetStore, PgUserDirectory};
use timeline_service::events::{EventPublisher, KafkaEventPublisher, NoopEventPublisher};
use timeline_service::handlers::health::{
    health_summary, liveness_check, readiness_summary, HealthState,
};
use timeline_service::handlers::{self, AppState};
use timeline_service::services::{FollowService, PostService, TimelineService};
use timeline_service::Config;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,timeline_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting timeline-service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Configuration loaded: env={}, port={}, page_size={}, cache_ttl={}s",
        config.app.env, config.app.port, config.timeline.page_size, config.timeline.ttl_seconds
    );

    // Initialize database connection pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    // Verify database connection
    sqlx::query("SELECT 1")
        .execute(&pg_pool)
        .await
        .context("Failed to verify database connection")?;
    info!("Database pool created and verified");

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    // Initialize Redis connection
    let redis_client =
        redis::Client::open(config.redis.url.as_str()).context("Failed to create Redis client")?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client)
        .await
        .context("Failed to connect to Redis")?;
    info!("Redis connection established");

    // Initialize Kafka event publisher (optional)
    let events: Arc<dyn EventPublisher> = match config.kafka.brokers.as_deref() {
        Some(brokers) => match KafkaEventPublisher::new(brokers, config.kafka.topic.clone()) {
            Ok(publisher) => {
                info!("Kafka producer initialized (brokers: {})", brokers);
                Arc::new(publisher)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize Kafka producer: {}. Tweet events will be dropped",
                    e
                );
                Arc::new(NoopEventPublisher)
            }
        },
        None => {
            info!("KAFKA_BROKERS not configured, tweet events will be dropped");
            Arc::new(NoopEventPublisher)
        }
    };

    // Wire repositories and services
    let users = Arc::new(PgUserDirectory::new(pg_pool.clone()));
    let follow_graph = Arc::new(PgFollowGraph::new(pg_pool.clone()));
    let tweets = Arc::new(PgTweetStore::new(pg_pool.clone()));
    let cache = Arc::new(RedisTimelineCache::new(RippleCache::new(
        redis_conn.clone(),
    )));

    let timeline = Arc::new(TimelineService::new(
        users.clone(),
        follow_graph.clone(),
        tweets.clone(),
        cache.clone(),
        config.timeline.page_size,
        config.timeline.ttl_seconds,
    ));
    let posts = Arc::new(PostService::new(
        users.clone(),
        follow_graph.clone(),
        tweets.clone(),
        cache.clone(),
        events,
    ));
    let follows = Arc::new(FollowService::new(users, follow_graph));

    let app_state = web::Data::new(AppState {
        timeline,
        posts,
        follows,
    });
    let health_state = web::Data::new(HealthState::new(pg_pool.clone(), redis_conn.clone()));

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        // Build CORS configuration
        let cors_builder = Cors::default();
        let mut cors = cors_builder;
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(app_state.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route(
                "/metrics",
                web::get().to(timeline_service::metrics::serve_metrics),
            )
            // Health check endpoints
            .route("/health", web::get().to(health_summary))
            .route("/health/ready", web::get().to(readiness_summary))
            .route("/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1")
                    .service(handlers::tweets::post_tweet)
                    .service(handlers::timeline::get_timeline)
                    .service(handlers::follows::follow_user)
                    .service(handlers::follows::unfollow_user),
            )
    })
    .bind(&bind_address)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")
}
