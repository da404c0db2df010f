//! Ops Endpoint Tests

use axum::http::StatusCode;

use crate::common::TestOps;

#[tokio::test]
async fn test_health_check_returns_ok() {
    let ops = TestOps::new();

    let (status, json) = ops.get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_liveness_probe() {
    let ops = TestOps::new();

    let (status, json) = ops.get_json("/health/live").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "alive");
}

#[tokio::test]
async fn test_readiness_degraded_until_gateway_ready() {
    let ops = TestOps::new();

    let (status, json) = ops.get_json("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "healthy");
    assert_eq!(json["checks"]["gateway"]["status"], "degraded");
}

#[tokio::test]
async fn test_readiness_healthy_once_connected() {
    let ops = TestOps::new();
    ops.gateway.set_connected(true);

    let (status, json) = ops.get_json("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_endpoint_serves_prometheus_text() {
    let ops = TestOps::new();

    let response = ops.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let ops = TestOps::new();

    let response = ops.get("/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
