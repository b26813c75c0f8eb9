use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::pipeline::domain::ProjectType;
use crate::pipeline::router::{impact_router, simulate_handler};

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn simulate_route_returns_the_full_nested_result() {
    let pipeline = Arc::new(build_pipeline(Arc::new(StaticProvider::full())));
    let router = impact_router(pipeline);

    let payload = json!({
        "project_type": "commercial",
        "size_sqft": 100000.0,
        "latitude": 40.7128,
        "longitude": -74.006,
        "city": "Springfield",
        "parking_spaces": 500,
        "green_space_percent": 10.0
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/impact/simulate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    for section in ["congestion", "environmental", "socioeconomic", "infrastructure"] {
        assert!(body.get(section).is_some(), "missing section {section}");
    }
    assert!(body.get("unified_impact_score").is_some());
    assert_eq!(
        body.pointer("/congestion/data_sources/traffic_api"),
        Some(&json!(true))
    );
}

#[tokio::test]
async fn simulate_route_rejects_invalid_input_with_422() {
    let pipeline = Arc::new(build_pipeline(Arc::new(AbsentProvider)));
    let router = impact_router(pipeline);

    let payload = json!({
        "project_type": "commercial",
        "size_sqft": -10.0,
        "latitude": 40.7128,
        "longitude": -74.006,
        "city": "Springfield"
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/impact/simulate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("size_sqft"));
}

#[tokio::test]
async fn simulate_route_rejects_unknown_project_types_before_scoring() {
    let pipeline = Arc::new(build_pipeline(Arc::new(AbsentProvider)));
    let router = impact_router(pipeline);

    let payload = json!({
        "project_type": "stadium",
        "size_sqft": 10000.0,
        "latitude": 40.7128,
        "longitude": -74.006,
        "city": "Springfield"
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/impact/simulate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    // The closed enum fails deserialization inside the Json extractor.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn simulate_handler_serves_degraded_results_directly() {
    let pipeline = Arc::new(build_pipeline(Arc::new(FailingProvider)));

    let response = simulate_handler::<FailingProvider>(
        State(pipeline),
        axum::Json(project(ProjectType::Residential, 80_000.0)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body.pointer("/congestion/data_sources/traffic_api"),
        Some(&json!(false))
    );
    assert_eq!(
        body.pointer("/congestion/data_sources/fallback"),
        Some(&json!(false))
    );
}
