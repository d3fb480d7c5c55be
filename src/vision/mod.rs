// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing for uploaded answer sheets
//!
//! This module provides:
//! - Image decoding for multipart uploads
//! - Bubble-sheet mark recognition (binarize, sample, resolve)
//!
//! Everything runs on the CPU and keeps no state between calls.

pub mod image_utils;
pub mod omr;

pub use image_utils::{decode_image_bytes, detect_format, ImageError, ImageInfo};
pub use omr::{
    binarize, density, resolve, AnswerSheet, AnswerTemplate, BinaryMask, OmrError, Region,
    TemplateError,
};
