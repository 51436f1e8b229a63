//! Router-level tests for the JSON API.
//!
//! Run with: cargo test --package verrux-web --test api

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use verrux_model::{CatalogOptions, ModelArtifacts};
use verrux_ranker::{CostEstimator, EngineSettings, PredictionContext};
use verrux_test_utils::{fixed_artifacts, logistic_artifacts};
use verrux_web::{router::build_router, state::AppState};

fn app(artifacts: ModelArtifacts, settings: EngineSettings) -> Router {
    let context = PredictionContext::new(
        artifacts,
        &CatalogOptions::default(),
        CostEstimator::default(),
        settings,
    )
    .unwrap();
    build_router(AppState::new(context))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|v| v.to_string()).unwrap_or_default()).await
}

async fn send_raw(app: Router, method: &str, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(fixed_artifacts(0.5), EngineSettings::default()), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_predict_plantar_cryotherapy() {
    let body = json!({
        "age": 30,
        "gender": "Male",
        "lesion_type": "Plantar",
        "side_effects": "None",
        "treatment_method": "Cryotherapy"
    });
    let (status, out) = send(
        app(fixed_artifacts(0.82), EngineSettings::default()),
        "POST",
        "/api/predict",
        Some(body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(out["estimated_cost"], 3738);
    assert_eq!(out["success_rate"], "82.0%");
    assert_eq!(out["high_success"], true);
    assert_eq!(out["banner"], "high");
}

#[tokio::test]
async fn test_predict_low_banner() {
    let body = json!({
        "age": 64,
        "gender": "Female",
        "lesion_type": "Mosaic",
        "side_effects": "Severe",
        "treatment_method": "Topical",
        "cost_override": 250
    });
    let (status, out) = send(
        app(fixed_artifacts(0.31), EngineSettings::default()),
        "POST",
        "/api/predict",
        Some(body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(out["estimated_cost"], 250);
    assert_eq!(out["high_success"], false);
    assert_eq!(out["message"], "Low probability of treatment success");
}

#[tokio::test]
async fn test_rank_returns_sorted_treatments() {
    let artifacts = logistic_artifacts(
        &[("Treatment Method_Laser", 2.0), ("Treatment Method_Topical", -2.0)],
        0.0,
    );
    let body = json!({ "age": 40, "gender": "Male", "lesion_type": "Genital", "side_effects": "Mild" });
    let (status, out) = send(app(artifacts, EngineSettings::default()), "POST", "/api/rank", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    let rows = out["treatments"].as_array().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(out["recommended"]["treatment_method"], "Laser");
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[6]["treatment_method"], "Topical");

    let probs: Vec<f64> = rows.iter().map(|r| r["probability"].as_f64().unwrap()).collect();
    assert!(probs.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_catalog_lists_discovered_categories() {
    let (status, out) = send(app(fixed_artifacts(0.5), EngineSettings::default()), "GET", "/api/catalog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(out["lesion_types"][0], "Common");
    assert_eq!(out["treatment_methods"][0], "Cryotherapy");
    assert_eq!(out["side_effects"], json!(["None", "Mild", "Severe"]));
    assert_eq!(out["age"]["max"], 100);
}

#[tokio::test]
async fn test_out_of_range_age_is_unprocessable() {
    let body = json!({ "age": 120, "gender": "Male", "lesion_type": "Flat" });
    let (status, out) = send(app(fixed_artifacts(0.5), EngineSettings::default()), "POST", "/api/rank", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(out["error"].as_str().unwrap().contains("age"));
}

#[tokio::test]
async fn test_strict_mode_rejects_unknown_lesion() {
    let settings = EngineSettings { strict_categories: true, ..Default::default() };
    let body = json!({
        "age": 30,
        "gender": "Male",
        "lesion_type": "Ringworm",
        "treatment_method": "Laser"
    });
    let (status, _) = send(app(fixed_artifacts(0.5), settings), "POST", "/api/predict", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_negative_age_is_unprocessable() {
    let body = json!({ "age": -5, "gender": "Male", "lesion_type": "Flat" });
    let (status, out) = send(app(fixed_artifacts(0.5), EngineSettings::default()), "POST", "/api/rank", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(out["error"].as_str().unwrap().contains("-5"));
}

#[tokio::test]
async fn test_wrong_field_type_is_unprocessable() {
    let body = json!({ "age": "thirty" });
    let (status, out) = send(app(fixed_artifacts(0.5), EngineSettings::default()), "POST", "/api/predict", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(out["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (status, out) = send_raw(
        app(fixed_artifacts(0.5), EngineSettings::default()),
        "POST",
        "/api/predict",
        "{\"age\": 30,".to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(out["error"].is_string());
}
