// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end POST /predict tests against the real artifacts.
//!
//! These require the trained models under ./models and are ignored by
//! default; run with `cargo test -- --ignored` on a machine that has them.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use tower::util::ServiceExt;

use vehicle_price_node::api::http_server::{build_router, AppState};
use vehicle_price_node::pricing::{FeatureAssembler, FeatureEncoder, KmScaler, PriceRegressor};
use vehicle_price_node::vision::DamageClassifier;

const DAMAGE_MODEL_PATH: &str = "./models/damage_classifier.onnx";
const PRICE_MODEL_PATH: &str = "./models/price_model.onnx";
const ENCODER_PATH: &str = "./models/encoder.json";
const SCALER_PATH: &str = "./models/scaler_km.json";

const BOUNDARY: &str = "predict-test-boundary";

// 1x1 red PNG image (base64)
const TINY_PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

async fn setup_state() -> AppState {
    let classifier = DamageClassifier::new(DAMAGE_MODEL_PATH)
        .await
        .expect("Failed to load damage classifier");
    let scaler = KmScaler::load(SCALER_PATH).expect("Failed to load scaler");
    let encoder = FeatureEncoder::load(ENCODER_PATH).expect("Failed to load encoder");
    let assembler = FeatureAssembler::new(scaler, encoder);
    let regressor = PriceRegressor::new(PRICE_MODEL_PATH, assembler.feature_width())
        .await
        .expect("Failed to load price model");

    AppState {
        classifier: Arc::new(classifier),
        assembler: Arc::new(assembler),
        regressor: Arc::new(regressor),
    }
}

fn corolla_fields() -> Vec<(&'static str, String)> {
    vec![
        ("brand", "Toyota".to_string()),
        ("model", "Corolla".to_string()),
        ("year", "2018".to_string()),
        ("kmDriven", "45000.0".to_string()),
        ("fuel", "Petrol".to_string()),
        ("transmission", "Manual".to_string()),
        ("owners", "1".to_string()),
        ("color", "White".to_string()),
    ]
}

fn multipart_body(fields: &[(&str, String)], files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{name}.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn predict_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_full_pipeline_success() {
    let app = build_router(setup_state().await);
    let png = STANDARD.decode(TINY_PNG_BASE64).unwrap();
    let files: Vec<(&str, &[u8])> = vec![
        ("frontImage", &png),
        ("backImage", &png),
        ("leftImage", &png),
        ("rightImage", &png),
    ];
    let body = multipart_body(&corolla_fields(), &files);

    let response = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let price = json["predicted_price"].as_str().unwrap();
    assert!(price.starts_with('₹'));
    assert!(price.contains('.'));

    for side in ["front", "back", "left", "right"] {
        let label = json["damage_summary"][side].as_str().unwrap();
        assert!(matches!(label, "no_damage" | "scratch" | "dent"));
    }
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_full_pipeline_is_idempotent() {
    let state = setup_state().await;
    let png = STANDARD.decode(TINY_PNG_BASE64).unwrap();
    let files: Vec<(&str, &[u8])> = vec![
        ("frontImage", &png),
        ("backImage", &png),
        ("leftImage", &png),
        ("rightImage", &png),
    ];

    let first = json_body(
        build_router(state.clone())
            .oneshot(predict_request(multipart_body(&corolla_fields(), &files)))
            .await
            .unwrap(),
    )
    .await;
    let second = json_body(
        build_router(state)
            .oneshot(predict_request(multipart_body(&corolla_fields(), &files)))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first, second);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_non_image_front_file_yields_error_response() {
    let app = build_router(setup_state().await);
    let png = STANDARD.decode(TINY_PNG_BASE64).unwrap();
    let files: Vec<(&str, &[u8])> = vec![
        ("frontImage", b"this is a text file, not a photo".as_slice()),
        ("backImage", &png),
        ("leftImage", &png),
        ("rightImage", &png),
    ];
    let body = multipart_body(&corolla_fields(), &files);

    let response = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = json_body(response).await;
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_missing_image_field_yields_error_response() {
    let app = build_router(setup_state().await);
    let png = STANDARD.decode(TINY_PNG_BASE64).unwrap();
    let files: Vec<(&str, &[u8])> = vec![
        ("frontImage", &png),
        ("backImage", &png),
        ("leftImage", &png),
    ];
    let body = multipart_body(&corolla_fields(), &files);

    let response = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().contains("rightImage"));
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_health_endpoint() {
    let app = build_router(setup_state().await);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
}
