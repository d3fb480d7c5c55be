// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Optical mark recognition for bubble-sheet exams
//!
//! Pipeline: RGB image → [`binarize`] → [`density`] per bubble → [`resolve`]
//! per question. Every stage is a pure function of its inputs; the only
//! long-lived value is the [`AnswerTemplate`].

pub mod binarize;
pub mod error;
pub mod region;
pub mod resolver;
pub mod sampler;
pub mod template;

pub use binarize::{binarize, to_grayscale, BinaryMask};
pub use error::{OmrError, TemplateError};
pub use region::Region;
pub use resolver::{resolve, AnswerSheet, MIN_FILL_DENSITY};
pub use sampler::density;
pub use template::{AnswerTemplate, OptionRegions};
