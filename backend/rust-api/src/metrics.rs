use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, Encoder, HistogramVec,
    IntCounterVec, IntGauge, TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Hunt Metrics
    pub static ref HUNT_SESSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "hunt_sessions_total",
        "Hunt sessions by lifecycle event",
        &["event"]
    )
    .unwrap();

    pub static ref HUNT_SESSIONS_ACTIVE: IntGauge = register_int_gauge!(
        "hunt_sessions_active",
        "Sessions currently playing a step"
    )
    .unwrap();

    pub static ref ACTIVATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "hunt_activations_total",
        "Activation attempts by outcome",
        &["outcome"]
    )
    .unwrap();

    pub static ref ANSWERS_SUBMITTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "hunt_answers_submitted_total",
        "Answers submitted by correctness and rule kind",
        &["correct", "rule"]
    )
    .unwrap();

    pub static ref HINTS_REQUESTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "hunt_hints_requested_total",
        "Hint requests by outcome",
        &["outcome"]
    )
    .unwrap();

    // Booking Metrics
    pub static ref RESERVATIONS_CREATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "reservations_created_total",
        "Reservations created by activity type",
        &["activity_type"]
    )
    .unwrap();

    pub static ref COUNTDOWN_STREAMS_ACTIVE: IntGauge = register_int_gauge!(
        "countdown_streams_active",
        "Open countdown SSE streams"
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Decrements a gauge when dropped, e.g. when an SSE client goes away.
pub struct GaugeGuard(&'static IntGauge);

impl GaugeGuard {
    pub fn inc(gauge: &'static IntGauge) -> Self {
        gauge.inc();
        Self(gauge)
    }
}

impl Drop for GaugeGuard {
    fn drop(&mut self) {
        self.0.dec();
    }
}
