// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Builds the regressor's feature vector from vehicle attributes and the
//! four damage observations

use super::damage::{DamageObservation, Side};
use super::encoder::FeatureEncoder;
use super::scaler::KmScaler;
use super::PricingError;

/// A single cell of the assembled row
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f32),
    Text(String),
}

impl FeatureValue {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            FeatureValue::Number(_) => "numeric",
            FeatureValue::Text(_) => "text",
        }
    }
}

/// Tabular attributes submitted with a prediction request
#[derive(Debug, Clone)]
pub struct VehicleAttributes {
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Kilometers driven, raw (the assembler applies the scaler)
    pub km_driven: f32,
    pub fuel_type: String,
    pub transmission: String,
    pub owner_count: u32,
    pub color: String,
}

/// Combines attributes and damage observations into the trained feature schema.
///
/// The row layout is fixed by the encoder artifact: Brand, Model, Year,
/// kilometers Driven (scaled), Fuel Type, Transmission, Number of Owners,
/// Colour, then the four per-side severity scores.
pub struct FeatureAssembler {
    scaler: KmScaler,
    encoder: FeatureEncoder,
}

impl FeatureAssembler {
    pub fn new(scaler: KmScaler, encoder: FeatureEncoder) -> Self {
        Self { scaler, encoder }
    }

    /// Width of the encoded vector, fixed by the encoder artifact
    pub fn feature_width(&self) -> usize {
        self.encoder.feature_width()
    }

    /// Assemble and encode one request's feature vector.
    ///
    /// Scales kilometers driven alone, maps each observation to its severity
    /// score, and runs the full row through the categorical encoder.
    pub fn assemble(
        &self,
        attributes: &VehicleAttributes,
        observations: &[DamageObservation; 4],
    ) -> Result<Vec<f32>, PricingError> {
        let severity = |side: Side| -> Result<f32, PricingError> {
            observations
                .iter()
                .find(|o| o.side == side)
                .map(|o| o.severity_score() as f32)
                .ok_or_else(|| {
                    PricingError::SchemaMismatch(format!("missing {} observation", side))
                })
        };

        let row = [
            ("Brand", FeatureValue::Text(attributes.brand.clone())),
            ("Model", FeatureValue::Text(attributes.model.clone())),
            ("Year", FeatureValue::Number(attributes.year as f32)),
            (
                "kilometers Driven",
                FeatureValue::Number(self.scaler.transform(attributes.km_driven)),
            ),
            ("Fuel Type", FeatureValue::Text(attributes.fuel_type.clone())),
            (
                "Transmission",
                FeatureValue::Text(attributes.transmission.clone()),
            ),
            (
                "Number of Owners",
                FeatureValue::Number(attributes.owner_count as f32),
            ),
            ("Colour", FeatureValue::Text(attributes.color.clone())),
            ("FrontDamage", FeatureValue::Number(severity(Side::Front)?)),
            ("BackDamage", FeatureValue::Number(severity(Side::Back)?)),
            ("LeftDamage", FeatureValue::Number(severity(Side::Left)?)),
            ("RightDamage", FeatureValue::Number(severity(Side::Right)?)),
        ];

        self.encoder.encode(&row)
    }
}
