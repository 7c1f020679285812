mod helpers;

use axum::http::StatusCode;
use metrics_exporter_prometheus::PrometheusBuilder;
use vitrina_cache::{CacheConfig, TtlCache};
use vitrina_server::{AppState, create_router_with_metrics};

use helpers::{TestClient, client_with_cache, seeded_cache};

#[tokio::test]
async fn health_check_returns_up() {
    let (cache, _) = seeded_cache();
    let response = client_with_cache(cache).get("/health").await;

    response.assert_status(StatusCode::OK);
    assert!(response.header("content-type").unwrap().contains("application/json"));
    assert_eq!(response.json()["status"], "UP");
}

#[tokio::test]
async fn request_id_is_generated() {
    let (cache, _) = seeded_cache();
    let response = client_with_cache(cache).get("/health").await;

    let request_id = response.header("x-request-id").expect("missing x-request-id");
    assert_eq!(request_id.len(), 36);
}

#[tokio::test]
async fn request_id_is_propagated() {
    let (cache, _) = seeded_cache();
    let response = client_with_cache(cache)
        .get_with_headers("/health", vec![("x-request-id", "req-123")])
        .await;

    assert_eq!(response.header("x-request-id"), Some("req-123"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let (cache, _) = seeded_cache();
    client_with_cache(cache)
        .get("/nope")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    // Recorder local: no se instala globalmente
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let cache: TtlCache<serde_json::Value> = TtlCache::new(CacheConfig::default());
    let client = TestClient::new(create_router_with_metrics(AppState::new(cache), handle));

    let response = client.get("/metrics").await;
    response.assert_status(StatusCode::OK);
    assert!(response.header("content-type").unwrap().starts_with("text/plain"));
}
