// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scan response types

use serde::Serialize;

use crate::vision::AnswerSheet;

/// Message returned when the upload cannot be decoded as an image
pub const INVALID_IMAGE: &str = "invalid image";

/// Body of a scan response: `{"answers": {...}}` or `{"error": "..."}`.
///
/// Both shapes are sent with HTTP 200.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScanResponse {
    Answers { answers: AnswerSheet },
    Error { error: String },
}

impl ScanResponse {
    pub fn answers(answers: AnswerSheet) -> Self {
        Self::Answers { answers }
    }

    pub fn invalid_image() -> Self {
        Self::Error {
            error: INVALID_IMAGE.to_string(),
        }
    }
}
