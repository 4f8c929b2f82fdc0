// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /predict endpoint

pub mod handler;
pub mod request;
pub mod response;

pub use handler::predict_handler;
pub use request::PredictRequest;
pub use response::{format_inr, DamageSummary, PredictResponse};
