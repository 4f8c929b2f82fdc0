// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the prediction API

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Failures while reading the multipart prediction request
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("Malformed multipart body: {0}")]
    Multipart(String),
}

/// Catch-all error envelope for POST /predict.
///
/// Every failure anywhere in the pipeline - bad multipart, undecodable
/// image, unknown category, schema mismatch, inference error - collapses to
/// a 500 with `{"error": "<message>"}`. The typed taxonomy underneath is
/// kept for logging, not for status-code mapping; there is no retry and no
/// partial success.
pub struct PredictError(pub anyhow::Error);

impl<E> From<E> for PredictError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        warn!("Prediction pipeline failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}
