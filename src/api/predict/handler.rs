// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use tracing::{debug, info};

use super::request::PredictRequest;
use super::response::{DamageSummary, PredictResponse};
use crate::api::errors::PredictError;
use crate::api::http_server::AppState;
use crate::pricing::{DamageObservation, Side};
use crate::vision::decode_image_bytes;

/// POST /predict - Estimate the resale price of a used vehicle
///
/// Accepts a multipart form with the tabular attributes (brand, model, year,
/// kmDriven, fuel, transmission, owners, color) and four side photographs
/// (frontImage, backImage, leftImage, rightImage).
///
/// Pipeline: classify each photo independently, map the labels to severity
/// scores, assemble and encode the feature row, run the price regressor,
/// format the result. The four classifications have no cross-dependency and
/// are joined concurrently; assembly and regression run strictly after.
///
/// # Response
/// - `predicted_price`: "₹"-prefixed price with Indian numbering grouping
/// - `damage_summary`: per-side damage labels
///
/// # Errors
/// Any failure anywhere in the pipeline returns 500 with
/// `{"error": "<message>"}`. All-or-nothing: no partial summaries.
pub async fn predict_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PredictResponse>, PredictError> {
    let request = PredictRequest::from_multipart(multipart).await?;
    debug!(
        "Prediction request: {} {} ({}), {} km",
        request.attributes.brand,
        request.attributes.model,
        request.attributes.year,
        request.attributes.km_driven
    );

    let (front_img, _) = decode_image_bytes(&request.front_image)?;
    let (back_img, _) = decode_image_bytes(&request.back_image)?;
    let (left_img, _) = decode_image_bytes(&request.left_image)?;
    let (right_img, _) = decode_image_bytes(&request.right_image)?;

    // The four classifications only read their own image; join order is
    // irrelevant to the result
    let (front, back, left, right) = tokio::try_join!(
        state.classifier.classify(&front_img),
        state.classifier.classify(&back_img),
        state.classifier.classify(&left_img),
        state.classifier.classify(&right_img),
    )?;

    info!(
        "Damage classified: front={} back={} left={} right={}",
        front, back, left, right
    );

    let observations = [
        DamageObservation::new(Side::Front, front),
        DamageObservation::new(Side::Back, back),
        DamageObservation::new(Side::Left, left),
        DamageObservation::new(Side::Right, right),
    ];

    let features = state.assembler.assemble(&request.attributes, &observations)?;
    let price = state.regressor.predict(&features).await?;

    info!("Predicted resale price: {:.2}", price);

    Ok(Json(PredictResponse::new(
        f64::from(price),
        DamageSummary {
            front,
            back,
            left,
            right,
        },
    )))
}
