// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading utilities for answer-sheet uploads

use image::{metadata::Orientation, DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::io::Cursor;
use thiserror::Error;
use tracing::warn;

/// Errors raised while turning uploaded bytes into an image
#[derive(Debug, Error)]
pub enum ImageError {
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
    /// Width in pixels, after orientation is applied
    pub width: u32,
    /// Height in pixels, after orientation is applied
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Orientation read from the image metadata
    pub orientation: Orientation,
    /// Size in bytes
    pub size_bytes: usize,
}

/// Decode raw image bytes (for multipart uploads)
///
/// The Exif orientation, when present, is applied so the returned pixels
/// are upright as the camera saw them.
///
/// # Arguments
/// * `bytes` - Raw image bytes
///
/// # Returns
/// * `Ok((DynamicImage, ImageInfo))` - The decoded image and metadata
/// * `Err(ImageError)` - If decoding fails
pub fn decode_image_bytes(bytes: &[u8]) -> Result<(DynamicImage, ImageInfo), ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let format = detect_format(bytes)?;

    let mut reader = ImageReader::with_format(Cursor::new(bytes), format);
    reader.no_limits();

    let mut decoder = reader
        .into_decoder()
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    // Broken metadata must not reject otherwise readable pixels
    let orientation = decoder.orientation().unwrap_or_else(|e| {
        warn!("Ignoring unreadable image orientation: {}", e);
        Orientation::NoTransforms
    });

    let mut img =
        DynamicImage::from_decoder(decoder).map_err(|e| ImageError::DecodeFailed(e.to_string()))?;
    img.apply_orientation(orientation);

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        orientation,
        size_bytes: bytes.len(),
    };

    Ok((img, info))
}

/// Detect image format from magic bytes
///
/// # Returns
/// * `Ok(ImageFormat)` - Any format the decoder recognises by signature
/// * `Err(ImageError::UnsupportedFormat)` - If format cannot be detected
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    image::guess_format(bytes).map_err(|_| ImageError::UnsupportedFormat)
}
