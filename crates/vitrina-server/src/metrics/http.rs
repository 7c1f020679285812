//! HTTP metrics middleware.

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use metrics::{counter, gauge, histogram};
use std::time::Instant;

const REQUESTS_TOTAL: &str = "vitrina_http_requests_total";
const REQUEST_DURATION: &str = "vitrina_http_request_duration_seconds";
const REQUESTS_IN_FLIGHT: &str = "vitrina_http_requests_in_flight";
const UNMATCHED_ROUTE: &str = "unmatched";

/// Etiqueta de ruta: el template (`/cache/keys/{key}`), nunca la URI concreta,
/// para no abrir una serie por cada key invalidada.
fn route_label(matched_path: Option<&MatchedPath>) -> String {
    matched_path.map_or(UNMATCHED_ROUTE, MatchedPath::as_str).to_owned()
}

/// Registra contador, latencia e in-flight para cada request.
pub async fn http_metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().as_str().to_owned();
    let route = route_label(matched_path.as_ref());

    let in_flight = gauge!(REQUESTS_IN_FLIGHT);
    in_flight.increment(1.0);
    let started = Instant::now();

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    in_flight.decrement(1.0);

    counter!(
        REQUESTS_TOTAL,
        "method" => method.clone(),
        "path" => route.clone(),
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);
    histogram!(REQUEST_DURATION, "method" => method, "path" => route)
        .record(elapsed.as_secs_f64());

    response
}

/// Registra las descripciones de las metricas HTTP.
pub fn register_http_metrics() {
    metrics::describe_counter!(REQUESTS_TOTAL, "Total number of HTTP requests");
    metrics::describe_histogram!(
        REQUEST_DURATION,
        metrics::Unit::Seconds,
        "HTTP request duration in seconds"
    );
    metrics::describe_gauge!(REQUESTS_IN_FLIGHT, "HTTP requests currently being served");
}
