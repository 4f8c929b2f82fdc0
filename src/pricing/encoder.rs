// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Categorical encoder artifact fixing the price regressor's input schema

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::assembler::FeatureValue;
use super::PricingError;

/// One column of the trained encoder's input schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSpec {
    /// One-hot encoded; vocabulary fixed at training time
    Categorical {
        name: String,
        categories: Vec<String>,
    },
    /// Passed through unchanged
    Numeric { name: String },
}

impl ColumnSpec {
    pub fn name(&self) -> &str {
        match self {
            ColumnSpec::Categorical { name, .. } => name,
            ColumnSpec::Numeric { name } => name,
        }
    }

    fn width(&self) -> usize {
        match self {
            ColumnSpec::Categorical { categories, .. } => categories.len(),
            ColumnSpec::Numeric { .. } => 1,
        }
    }
}

/// Categorical encoder fit during training, loaded from a JSON artifact.
///
/// The artifact declares the exact column order and, per categorical column,
/// the vocabulary seen at fit time. Encoding a row produces the flat feature
/// vector in precisely the width/order the regressor expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureEncoder {
    pub columns: Vec<ColumnSpec>,
    /// Total encoded width declared by the artifact
    pub feature_width: usize,
}

impl FeatureEncoder {
    /// Load the encoder artifact from disk.
    ///
    /// Fails loudly if the declared feature width disagrees with the sum of
    /// the column widths. Fatal at startup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .context(format!("Failed to read encoder artifact {}", path.display()))?;
        let encoder: FeatureEncoder = serde_json::from_str(&raw)
            .context(format!("Invalid encoder artifact {}", path.display()))?;
        encoder.validate_widths().context(format!(
            "Encoder artifact {} is internally inconsistent",
            path.display()
        ))?;
        Ok(encoder)
    }

    pub fn feature_width(&self) -> usize {
        self.feature_width
    }

    fn validate_widths(&self) -> Result<()> {
        let actual: usize = self.columns.iter().map(ColumnSpec::width).sum();
        if actual != self.feature_width {
            anyhow::bail!(
                "columns encode to {} features but artifact declares {}",
                actual,
                self.feature_width
            );
        }
        Ok(())
    }

    /// Encode a named row into the flat feature vector.
    ///
    /// The row's column names and order must match the encoder's columns
    /// exactly; any disagreement is a SchemaMismatch, and a categorical value
    /// outside the training vocabulary is an UnknownCategory.
    pub fn encode(&self, row: &[(&str, FeatureValue)]) -> Result<Vec<f32>, PricingError> {
        if row.len() != self.columns.len() {
            return Err(PricingError::SchemaMismatch(format!(
                "row has {} columns, encoder expects {}",
                row.len(),
                self.columns.len()
            )));
        }

        let mut features = Vec::with_capacity(self.feature_width);
        for (column, (name, value)) in self.columns.iter().zip(row) {
            if column.name() != *name {
                return Err(PricingError::SchemaMismatch(format!(
                    "row column '{}' where encoder expects '{}'",
                    name,
                    column.name()
                )));
            }
            match (column, value) {
                (ColumnSpec::Numeric { .. }, FeatureValue::Number(v)) => features.push(*v),
                (ColumnSpec::Categorical { name, categories }, FeatureValue::Text(v)) => {
                    let hit = categories.iter().position(|c| c == v).ok_or_else(|| {
                        PricingError::UnknownCategory {
                            column: name.clone(),
                            value: v.clone(),
                        }
                    })?;
                    features.extend((0..categories.len()).map(|i| if i == hit { 1.0 } else { 0.0 }));
                }
                (column, value) => {
                    return Err(PricingError::SchemaMismatch(format!(
                        "column '{}' received a {} value",
                        column.name(),
                        value.kind()
                    )));
                }
            }
        }

        // The artifact's declared width is the regressor's contract
        if features.len() != self.feature_width {
            return Err(PricingError::SchemaMismatch(format!(
                "encoded {} features, artifact declares {}",
                features.len(),
                self.feature_width
            )));
        }

        Ok(features)
    }
}
