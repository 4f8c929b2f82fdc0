// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gradient-boosted price model behind ONNX Runtime

use anyhow::{Context, Result};
use ndarray::Array2;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

use super::PricingError;

/// Gradient-boosted tree ensemble exported to ONNX.
///
/// One forward pass maps the encoded feature vector to a single price in the
/// training target currency. Inference is deterministic; the raw output is
/// not clamped, so a pathological input can yield a negative price.
///
/// # Thread Safety
/// The session is wrapped in Arc<Mutex> for cheap cloning and shared access;
/// concurrent requests serialize on the forward pass.
#[derive(Clone)]
pub struct PriceRegressor {
    session: Arc<Mutex<Session>>,

    /// Feature width fixed by the encoder artifact the model was trained with
    feature_width: usize,
}

impl std::fmt::Debug for PriceRegressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceRegressor")
            .field("feature_width", &self.feature_width)
            .finish_non_exhaustive()
    }
}

impl PriceRegressor {
    /// Load the regressor from an ONNX file.
    ///
    /// `feature_width` comes from the encoder artifact; the two were fit
    /// together and must agree. Fails at startup if the model file is
    /// missing or unreadable, never per-request.
    pub async fn new<P: AsRef<Path>>(model_path: P, feature_width: usize) -> Result<Self> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            anyhow::bail!("Price model file not found: {}", model_path.display());
        }

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load price model from {}",
                model_path.display()
            ))?;

        info!(
            "Price regressor loaded from {} (feature width {})",
            model_path.display(),
            feature_width
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            feature_width,
        })
    }

    /// Predict a resale price from an encoded feature vector.
    ///
    /// A vector whose length disagrees with the trained width is a
    /// SchemaMismatch; any runtime failure inside the ensemble is surfaced
    /// as an Inference error.
    pub async fn predict(&self, features: &[f32]) -> Result<f32, PricingError> {
        if features.len() != self.feature_width {
            return Err(PricingError::SchemaMismatch(format!(
                "feature vector has {} values, model expects {}",
                features.len(),
                self.feature_width
            )));
        }

        let input = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| PricingError::SchemaMismatch(e.to_string()))?;
        let input_value =
            Value::from_array(input).map_err(|e| PricingError::Inference(e.to_string()))?;

        // "float_input" is the skl2onnx export convention for tree ensembles
        let mut session_guard = self.session.lock().unwrap();
        let outputs = session_guard
            .run(ort::inputs!["float_input" => input_value])
            .map_err(|e| PricingError::Inference(e.to_string()))?;

        let prediction = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| PricingError::Inference(e.to_string()))?;

        prediction
            .iter()
            .next()
            .copied()
            .ok_or_else(|| PricingError::Inference("model returned an empty prediction".to_string()))
    }

    pub fn feature_width(&self) -> usize {
        self.feature_width
    }
}
