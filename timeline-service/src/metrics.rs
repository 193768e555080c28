/// Observability and metrics collection
use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Timeline cache lookups by outcome (hit/miss/error).
    pub static ref TIMELINE_CACHE_EVENTS: IntCounterVec = register_int_counter_vec!(
        "timeline_cache_events_total",
        "Timeline cache lookups segmented by outcome",
        &["event"]
    )
    .expect("failed to register timeline_cache_events_total");

    /// Timeline cache write results (success/error).
    pub static ref TIMELINE_CACHE_WRITE_TOTAL: IntCounterVec = register_int_counter_vec!(
        "timeline_cache_write_total",
        "Timeline cache write attempts segmented by outcome",
        &["result"]
    )
    .expect("failed to register timeline_cache_write_total");

    /// Fan-out invalidations issued on the post path.
    pub static ref TIMELINE_INVALIDATIONS_TOTAL: IntCounter = register_int_counter!(
        "timeline_invalidations_total",
        "Timeline cache invalidations issued by the post path"
    )
    .expect("failed to register timeline_invalidations_total");

    /// Tweet-posted event publish results (success/error/dropped).
    pub static ref TWEET_EVENTS_PUBLISHED: IntCounterVec = register_int_counter_vec!(
        "tweet_events_published_total",
        "Tweet-posted event publish attempts segmented by outcome",
        &["result"]
    )
    .expect("failed to register tweet_events_published_total");
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
