// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Rectangular sampling regions in pixel coordinates

use serde::{Deserialize, Serialize};

/// Axis-aligned box `(x, y, width, height)` locating one answer bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Nominal area in pixels, regardless of any image bounds
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Intersect with a `width` x `height` image.
    ///
    /// Returns the half-open pixel span `(x0, y0, x1, y1)` that lies inside the
    /// image, or `None` when the region misses it entirely.
    pub fn clip(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x1 = (self.x as u64 + self.width as u64).min(width as u64) as u32;
        let y1 = (self.y as u64 + self.height as u64).min(height as u64) as u32;

        if self.x >= x1 || self.y >= y1 {
            return None;
        }

        Some((self.x, self.y, x1, y1))
    }
}
