// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer-sheet scan endpoint module
//!
//! Provides POST /api/scan for reading the marked options of an uploaded sheet.

pub mod handler;
pub mod response;

pub use handler::{scan, scan_handler, UPLOAD_FIELD};
pub use response::ScanResponse;
