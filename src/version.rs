// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the exam scanner

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
