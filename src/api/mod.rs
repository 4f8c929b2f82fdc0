// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP API surface

pub mod errors;
pub mod http_server;
pub mod predict;

pub use errors::{PredictError, RequestError};
pub use http_server::{build_router, start_server, AppState};
pub use predict::{predict_handler, PredictRequest, PredictResponse};
