// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scan endpoint handler

use axum::{body::Bytes, extract::State, Json};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::response::ScanResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::{binarize, decode_image_bytes, resolve, AnswerTemplate, OmrError};

/// Multipart field that carries the sheet image
pub const UPLOAD_FIELD: &str = "file";

/// Read the answers marked on an encoded sheet image.
///
/// An undecodable payload is reported as [`ScanResponse::invalid_image`]
/// rather than as an error. `Err` is only possible for a template that was
/// not built through [`AnswerTemplate::new`].
pub fn scan(image_bytes: &[u8], template: &AnswerTemplate) -> Result<ScanResponse, OmrError> {
    let (image, image_info) = match decode_image_bytes(image_bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("Failed to decode image: {}", e);
            return Ok(ScanResponse::invalid_image());
        }
    };

    debug!(
        "Decoded image: {}x{}, {:?}, {:?}, {} bytes",
        image_info.width,
        image_info.height,
        image_info.format,
        image_info.orientation,
        image_info.size_bytes
    );

    let mask = binarize(&image.to_rgb8());
    let answers = resolve(&mask, template)?;

    info!(
        "Scan complete: {}/{} questions answered",
        answers.answered(),
        answers.len()
    );

    Ok(ScanResponse::answers(answers))
}

/// POST /api/scan - Read the marked options of an uploaded answer sheet
///
/// # Request
/// `multipart/form-data` with the image as a file part named `file`.
///
/// # Response
/// - `{"answers": {"1": "A" | ... | null, ...}}` when the image decodes
/// - `{"error": "invalid image"}` when it does not (still HTTP 200)
///
/// # Errors
/// - 400 Bad Request: malformed multipart body
/// - 422 Unprocessable Entity: no `file` part, or `file` is not a file part
/// - 500 Internal Server Error: scan task failed
pub async fn scan_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ScanResponse>, ApiError> {
    let mut multipart =
        multipart.map_err(|e| ApiError::InvalidRequest(format!("expected multipart form: {}", e)))?;

    let image_bytes = read_upload(&mut multipart).await?;
    debug!("Scan request received: {} bytes", image_bytes.len());

    // Decoding and thresholding are CPU-bound
    let template = Arc::clone(&state.template);
    let response = tokio::task::spawn_blocking(move || scan(&image_bytes, &template))
        .await
        .map_err(|e| ApiError::InternalError(format!("scan task failed: {}", e)))?
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(Json(response))
}

async fn read_upload(multipart: &mut Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        // A plain text value under the upload name is not a file
        if field.file_name().is_none() {
            return Err(ApiError::ValidationError {
                field: UPLOAD_FIELD.to_string(),
                message: format!("{} must be a file upload", UPLOAD_FIELD),
            });
        }

        return field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("failed to read upload: {}", e)));
    }

    Err(ApiError::ValidationError {
        field: UPLOAD_FIELD.to_string(),
        message: format!("{} is required", UPLOAD_FIELD),
    })
}
