// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Node configuration from environment variables

use std::env;

/// Where the four trained artifacts live and where the server listens
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// ONNX damage classifier
    pub damage_model_path: String,
    /// ONNX gradient-boosted price model
    pub price_model_path: String,
    /// JSON categorical-encoder artifact
    pub encoder_path: String,
    /// JSON kilometers-scaler artifact
    pub scaler_path: String,
    /// HTTP listen port
    pub api_port: u16,
}

impl NodeConfig {
    /// Read configuration from environment variables, with defaults matching
    /// the artifact layout shipped alongside the node
    pub fn from_env() -> Self {
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);

        Self {
            damage_model_path: env::var("DAMAGE_MODEL_PATH")
                .unwrap_or_else(|_| "./models/damage_classifier.onnx".to_string()),
            price_model_path: env::var("PRICE_MODEL_PATH")
                .unwrap_or_else(|_| "./models/price_model.onnx".to_string()),
            encoder_path: env::var("ENCODER_PATH")
                .unwrap_or_else(|_| "./models/encoder.json".to_string()),
            scaler_path: env::var("SCALER_PATH")
                .unwrap_or_else(|_| "./models/scaler_km.json".to_string()),
            api_port,
        }
    }
}
