// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod pricing;
pub mod version;
pub mod vision;

// Re-export main types
pub use config::NodeConfig;
pub use pricing::{
    DamageLabel, DamageObservation, FeatureAssembler, FeatureEncoder, KmScaler, PriceRegressor,
    PricingError, Side, VehicleAttributes,
};
pub use vision::{decode_image_bytes, DamageClassifier, ImageError};
