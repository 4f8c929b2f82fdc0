// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading and utility functions for the damage classifier

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Maximum size for one uploaded photo (10MB)
const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

/// Decode raw image bytes from a multipart upload
///
/// # Arguments
/// * `bytes` - Raw image bytes
///
/// # Returns
/// * `Ok((DynamicImage, ImageInfo))` - The decoded image and metadata
/// * `Err(ImageError)` - If decoding fails
pub fn decode_image_bytes(bytes: &[u8]) -> Result<(DynamicImage, ImageInfo), ImageError> {
    if bytes.len() > MAX_IMAGE_SIZE {
        return Err(ImageError::TooLarge(bytes.len(), MAX_IMAGE_SIZE));
    }

    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    // Detect format from magic bytes
    let format = detect_format(bytes)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok((img, info))
}

/// Detect image format from magic bytes
///
/// # Returns
/// * `Ok(ImageFormat)` - Detected format
/// * `Err(ImageError::UnsupportedFormat)` - If format cannot be detected
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    if bytes.len() < 4 {
        return Err(ImageError::UnsupportedFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),

        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Ok(ImageFormat::WebP),

        // GIF: GIF87a or GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Ok(ImageFormat::Gif),

        // BMP: BM
        [0x42, 0x4D, ..] => Ok(ImageFormat::Bmp),

        _ => Err(ImageError::UnsupportedFormat),
    }
}
