// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ink density of a single bubble region

use super::binarize::BinaryMask;
use super::error::OmrError;
use super::region::Region;

/// Fraction of ink pixels inside `region`.
///
/// The region is clipped to the mask bounds before counting, but the count is
/// divided by the region's nominal area. A bubble hanging off the edge of an
/// undersized photo therefore reads as lightly filled rather than failing.
pub fn density(mask: &BinaryMask, region: &Region) -> Result<f64, OmrError> {
    let area = region.area();
    if area == 0 {
        return Err(OmrError::DegenerateRegion(*region));
    }

    let filled = match region.clip(mask.width(), mask.height()) {
        Some((x0, y0, x1, y1)) => mask.count_ink(x0, y0, x1, y1),
        None => 0,
    };

    Ok(filled as f64 / area as f64)
}
