// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Standard scaler for the kilometers-driven feature

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Standard scaler fit during training, loaded from a JSON artifact.
///
/// Applied to kilometers driven alone; the transform is (x - mean) / scale,
/// matching what the regressor saw at fit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KmScaler {
    pub mean: f32,
    pub scale: f32,
}

impl KmScaler {
    /// Load the scaler artifact from disk.
    ///
    /// Fails if the file is missing, not valid JSON, or carries parameters
    /// that cannot be applied (zero or non-finite scale). Fatal at startup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .context(format!("Failed to read scaler artifact {}", path.display()))?;
        let scaler: KmScaler = serde_json::from_str(&raw)
            .context(format!("Invalid scaler artifact {}", path.display()))?;

        if scaler.scale == 0.0 || !scaler.scale.is_finite() || !scaler.mean.is_finite() {
            anyhow::bail!(
                "Scaler artifact {} has unusable parameters (mean={}, scale={})",
                path.display(),
                scaler.mean,
                scaler.scale
            );
        }

        Ok(scaler)
    }

    /// Apply the training-time transform to a raw kilometer reading
    pub fn transform(&self, km: f32) -> f32 {
        (km - self.mean) / self.scale
    }
}
