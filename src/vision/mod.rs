// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image decoding and per-photo damage classification

pub mod classifier;
pub mod image_utils;

pub use classifier::{preprocess, DamageClassifier, CLASSIFIER_INPUT_SIZE};
pub use image_utils::{decode_image_bytes, detect_format, ImageError, ImageInfo};
