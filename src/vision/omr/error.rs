// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use thiserror::Error;

use super::region::Region;

/// Errors raised while reading marks from a binarized sheet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OmrError {
    #[error("Region {0:?} has zero area")]
    DegenerateRegion(Region),
}

/// Errors raised while building an answer template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template has no questions")]
    Empty,

    #[error("Question identifiers must be positive, got {0}")]
    InvalidQuestionId(u32),

    #[error("Question {0} has no options")]
    QuestionWithoutOptions(u32),

    #[error("Question {question}: option label {label:?} is not an uppercase letter")]
    InvalidOptionLabel { question: u32, label: char },

    #[error("Question {question}, option {label}: region {region:?} has zero area")]
    DegenerateRegion {
        question: u32,
        label: char,
        region: Region,
    },
}
