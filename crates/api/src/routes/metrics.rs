//! Prometheus metrics endpoint and metric descriptions.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

/// Registers help text for the counters the cart crates emit.
///
/// Call once after the recorder is installed.
pub fn describe() {
    metrics::describe_counter!(
        "cart_mutations_total",
        "Committed cart mutations, by operation"
    );
    metrics::describe_counter!(
        "cart_notifications_total",
        "Notifications emitted for cart operations, by operation and kind"
    );
    metrics::describe_counter!(
        "catalog_requests_total",
        "Requests sent to the catalog API, by resource"
    );
}

/// GET /metrics — returns Prometheus-formatted metrics.
pub async fn get(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        handle.render(),
    )
}
