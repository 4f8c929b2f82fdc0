// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! The observable error contract: every pipeline failure is a 500 with a
//! non-empty `error` string, never a partial success.

use axum::http::StatusCode;
use axum::response::IntoResponse;

use vehicle_price_node::api::errors::{PredictError, RequestError};
use vehicle_price_node::pricing::PricingError;
use vehicle_price_node::vision::{decode_image_bytes, ImageError};

async fn error_body(err: PredictError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_request_error_surfaces_as_500() {
    let (status, body) = error_body(PredictError::from(RequestError::MissingField("fuel"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("fuel"));
}

#[tokio::test]
async fn test_decode_error_surfaces_as_500() {
    // A text file submitted as an image field
    let decode_err = decode_image_bytes(b"definitely not a photograph").unwrap_err();
    assert!(matches!(decode_err, ImageError::UnsupportedFormat));

    let (status, body) = error_body(PredictError::from(decode_err)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_category_surfaces_as_500() {
    let err = PricingError::UnknownCategory {
        column: "Fuel Type".to_string(),
        value: "Steam".to_string(),
    };
    let (status, body) = error_body(PredictError::from(err)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Fuel Type"));
    assert!(message.contains("Steam"));
}

#[tokio::test]
async fn test_schema_mismatch_surfaces_as_500() {
    let err = PricingError::SchemaMismatch("feature vector has 3 values, model expects 20".into());
    let (status, body) = error_body(PredictError::from(err)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("mismatch"));
}

#[tokio::test]
async fn test_error_body_has_no_success_fields() {
    let (_, body) = error_body(PredictError::from(RequestError::MissingField("brand"))).await;
    assert!(body.get("predicted_price").is_none());
    assert!(body.get("damage_summary").is_none());
}
