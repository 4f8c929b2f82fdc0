// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tabular price regression: damage scoring, feature assembly and the
//! gradient-boosted price model.

pub mod assembler;
pub mod damage;
pub mod encoder;
pub mod regressor;
pub mod scaler;

use thiserror::Error;

pub use assembler::{FeatureAssembler, FeatureValue, VehicleAttributes};
pub use damage::{DamageLabel, DamageObservation, Side};
pub use encoder::{ColumnSpec, FeatureEncoder};
pub use regressor::PriceRegressor;
pub use scaler::KmScaler;

/// Errors raised while assembling features or predicting a price
#[derive(Debug, Error)]
pub enum PricingError {
    /// A categorical value was not part of the encoder's training vocabulary.
    /// The policy is the artifact's, not ours: we surface it, never mask it.
    #[error("Unknown {column} value '{value}': not in the training vocabulary")]
    UnknownCategory { column: String, value: String },

    /// The assembled row disagrees with the schema the artifacts were fit on
    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The regression forward pass itself failed
    #[error("Price inference failed: {0}")]
    Inference(String),
}
