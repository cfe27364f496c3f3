use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, GaugeVec, HistogramOpts, HistogramVec, IntCounter, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all guchi metrics
const PREFIX: &str = "guchi";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Generation Metrics
    pub static ref GENERATED_NAMES_TOTAL: IntCounter = IntCounter::new(
        format!("{PREFIX}_generated_names_total"),
        "Total number of name cards returned"
    ).expect("Failed to create generated_names_total metric");

    pub static ref GENERATION_SHORTFALL_TOTAL: IntCounter = IntCounter::new(
        format!("{PREFIX}_generation_shortfall_total"),
        "Generation requests that returned fewer cards than requested"
    ).expect("Failed to create generation_shortfall_total metric");

    // Corpus Metrics
    pub static ref CORPUS_WORKS_TOTAL: GaugeVec = GaugeVec::new(
        Opts::new(format!("{PREFIX}_corpus_works_total"), "Works in the corpus per source"),
        &["source"]
    ).expect("Failed to create corpus_works_total metric");

    // Translation Metrics
    pub static ref TRANSLATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_translations_total"), "Translation requests by outcome"),
        &["outcome"]
    ).expect("Failed to create translations_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(GENERATED_NAMES_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(GENERATION_SHORTFALL_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CORPUS_WORKS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(TRANSLATIONS_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Publish the number of works per source
pub fn init_corpus_metrics(source_counts: &[(String, usize)]) {
    for (source, count) in source_counts {
        CORPUS_WORKS_TOTAL
            .with_label_values(&[source.as_str()])
            .set(*count as f64);
    }

    tracing::info!(
        "Corpus metrics initialized: {} works over {} sources",
        source_counts.iter().map(|(_, count)| count).sum::<usize>(),
        source_counts.len()
    );
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record the result of one generation request
pub fn record_generation(requested: usize, returned: usize) {
    GENERATED_NAMES_TOTAL.inc_by(returned as u64);
    if returned < requested {
        GENERATION_SHORTFALL_TOTAL.inc();
    }
}

pub fn record_translation(outcome: &str) {
    TRANSLATIONS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_default();
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
