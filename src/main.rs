// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use std::{env, sync::Arc};
use vehicle_price_node::{
    api::http_server::{start_server, AppState},
    config::NodeConfig,
    pricing::{FeatureAssembler, FeatureEncoder, KmScaler, PriceRegressor},
    vision::DamageClassifier,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚗 Starting Vehicle Price Node...\n");
    println!("📦 BUILD VERSION: {}", vehicle_price_node::version::VERSION);
    println!("📅 Build Date: {}", vehicle_price_node::version::BUILD_DATE);
    println!();

    let config = NodeConfig::from_env();

    // All four artifacts load once here; any failure is fatal before the
    // server accepts a single request
    println!("🧠 Loading trained artifacts...");

    let classifier = DamageClassifier::new(&config.damage_model_path)
        .await
        .context("Damage classifier unavailable")?;

    let scaler = KmScaler::load(&config.scaler_path).context("Kilometer scaler unavailable")?;
    let encoder = FeatureEncoder::load(&config.encoder_path)
        .context("Categorical encoder unavailable")?;
    let assembler = FeatureAssembler::new(scaler, encoder);

    let regressor = PriceRegressor::new(&config.price_model_path, assembler.feature_width())
        .await
        .context("Price model unavailable")?;

    println!("✅ All artifacts loaded");

    let state = AppState {
        classifier: Arc::new(classifier),
        assembler: Arc::new(assembler),
        regressor: Arc::new(regressor),
    };

    start_server(state, config.api_port)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {}", e))?;

    Ok(())
}
