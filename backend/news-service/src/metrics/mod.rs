//! Prometheus metrics for news-service.
//!
//! Exposes content-activity collectors and an HTTP handler for the
//! `/metrics` endpoint.

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

/// Articles created since process start
pub static NEWS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("news_created_total", "Number of news articles created")
        .expect("register news_created_total")
});

/// Articles deleted since process start
pub static NEWS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("news_deleted_total", "Number of news articles deleted")
        .expect("register news_deleted_total")
});

/// Counter increments served, labelled by kind (view/like/dislike)
pub static REACTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "news_reactions_total",
        "Number of counter increments applied to articles",
        &["kind"]
    )
    .expect("register news_reactions_total")
});

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
