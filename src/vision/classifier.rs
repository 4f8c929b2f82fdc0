// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ONNX damage classifier for vehicle exterior photographs
//!
//! Wraps an EfficientNet-style backbone fine-tuned to three damage classes.
//! Preprocessing reproduces the training transform exactly: 224x224 resize,
//! RGB, ImageNet mean/std normalization. Getting these constants wrong does
//! not fail - it silently degrades predictions - so they live here as part
//! of the model contract.

use anyhow::{Context, Result};
use image::DynamicImage;
use ndarray::Array4;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::pricing::DamageLabel;

/// Input resolution the classifier was trained with
pub const CLASSIFIER_INPUT_SIZE: u32 = 224;

/// Mean values for normalization (ImageNet)
pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// Std values for normalization (ImageNet)
pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Class index order fixed when the classifier head was trained
const CLASS_LABELS: [DamageLabel; 3] = [
    DamageLabel::Dent,
    DamageLabel::NoDamage,
    DamageLabel::Scratch,
];

/// Damage classifier behind an ONNX Runtime session.
///
/// # Thread Safety
/// The session is wrapped in Arc<Mutex> for cheap cloning and shared access;
/// the four per-request classifications serialize on the forward pass.
#[derive(Clone)]
pub struct DamageClassifier {
    session: Arc<Mutex<Session>>,
}

impl std::fmt::Debug for DamageClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DamageClassifier").finish_non_exhaustive()
    }
}

impl DamageClassifier {
    /// Load the classifier from an ONNX file.
    ///
    /// Fails if the file is missing or unreadable. Callers treat this as
    /// fatal at startup; a request never sees a missing classifier.
    pub async fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            anyhow::bail!(
                "Damage classifier model not found: {}",
                model_path.display()
            );
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
                "Failed to load damage classifier from {}",
                model_path.display()
            ))?;

        info!("Damage classifier loaded from {}", model_path.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
        })
    }

    /// Classify one photograph into a damage category.
    ///
    /// Argmax over the three logits, lowest index winning ties. The
    /// tie-break is a fixed rule, not configurable.
    pub async fn classify(&self, image: &DynamicImage) -> Result<DamageLabel> {
        let tensor = preprocess(image);

        let mut session_guard = self.session.lock().unwrap();
        let outputs = session_guard
            .run(ort::inputs!["input" => Value::from_array(tensor)?])
            .context("Classifier forward pass failed")?;

        let logits = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract classifier output")?;
        let scores: Vec<f32> = logits.iter().copied().collect();

        if scores.len() != CLASS_LABELS.len() {
            anyhow::bail!(
                "Classifier produced {} scores (expected {})",
                scores.len(),
                CLASS_LABELS.len()
            );
        }

        Ok(CLASS_LABELS[argmax(&scores)])
    }
}

/// Convert a decoded photograph into the classifier's input tensor.
///
/// Resizes to exactly 224x224 (no aspect preservation - the training
/// transform did the same), then normalizes each RGB channel with the
/// ImageNet mean/std into NCHW layout [1, 3, 224, 224].
pub fn preprocess(image: &DynamicImage) -> Array4<f32> {
    let resized = image.resize_exact(
        CLASSIFIER_INPUT_SIZE,
        CLASSIFIER_INPUT_SIZE,
        image::imageops::FilterType::Triangle,
    );
    let rgb = resized.to_rgb8();

    let size = CLASSIFIER_INPUT_SIZE as usize;
    let mut tensor = Array4::zeros((1, 3, size, size));

    for y in 0..size {
        for x in 0..size {
            let pixel = rgb.get_pixel(x as u32, y as u32);
            for c in 0..3 {
                let normalized = (pixel[c] as f32 / 255.0 - MEAN[c]) / STD[c];
                tensor[[0, c, y, x]] = normalized;
            }
        }
    }

    tensor
}

/// Index of the maximum score; the first maximum wins on ties
fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (i, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = i;
        }
    }
    best
}
