// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Binarization of answer-sheet photos
//!
//! Steps:
//! 1. BT.601 grayscale
//! 2. 5x5 binomial Gaussian smoothing (reflect-101 border)
//! 3. Adaptive threshold against an 11x11 Gaussian-weighted local mean
//!    (replicate border), inverted so pencil marks become ink (255)

use image::{GrayImage, Luma, RgbImage};

/// Separable 5-tap smoothing kernel, sums to 16
pub const SMOOTHING_KERNEL: [u32; 5] = [1, 4, 6, 4, 1];

/// Side length of the neighborhood used for the local mean
pub const THRESHOLD_BLOCK_SIZE: usize = 11;

/// A pixel is ink when it is at least this much darker than its local mean
pub const THRESHOLD_OFFSET: i32 = 2;

/// Single-channel mask where every pixel is either [`BinaryMask::INK`] or
/// [`BinaryMask::PAPER`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    pixels: GrayImage,
}

impl BinaryMask {
    pub const INK: u8 = 255;
    pub const PAPER: u8 = 0;

    /// Build a mask by classifying every pixel with `is_ink`
    pub fn from_fn<F>(width: u32, height: u32, mut is_ink: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let pixels = GrayImage::from_fn(width, height, |x, y| {
            Luma([if is_ink(x, y) { Self::INK } else { Self::PAPER }])
        });
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Panics if `(x, y)` is out of bounds
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.pixels.get_pixel(x, y)[0] == Self::INK
    }

    /// Number of ink pixels in the half-open span `[x0, x1) x [y0, y1)`
    pub fn count_ink(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> u64 {
        let width = self.width() as usize;
        let raw = self.pixels.as_raw();

        (y0 as usize..y1 as usize)
            .map(|y| {
                let row = &raw[y * width + x0 as usize..y * width + x1 as usize];
                row.iter().filter(|&&p| p == Self::INK).count() as u64
            })
            .sum()
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }

    pub fn into_gray(self) -> GrayImage {
        self.pixels
    }
}

/// Convert a color image to an inverted binary mask of its dark marks
pub fn binarize(image: &RgbImage) -> BinaryMask {
    let gray = to_grayscale(image);
    let smoothed = smooth(&gray);
    adaptive_threshold(&smoothed)
}

/// BT.601 luma in 14-bit fixed point: 0.299 R + 0.587 G + 0.114 B
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    const SHIFT: u32 = 14;

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let luma = (R * r as u32 + G * g as u32 + B * b as u32 + (1 << (SHIFT - 1))) >> SHIFT;
        Luma([luma as u8])
    })
}

/// 5x5 binomial blur, rounded to nearest
fn smooth(gray: &GrayImage) -> GrayImage {
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    let radius = SMOOTHING_KERNEL.len() as isize / 2;
    let src = gray.as_raw();

    // Horizontal pass keeps the x16 scale to avoid double rounding
    let mut rows = vec![0u32; width * height];
    for y in 0..height {
        for x in 0..width {
            rows[y * width + x] = SMOOTHING_KERNEL
                .iter()
                .enumerate()
                .map(|(k, &w)| {
                    let sx = reflect_101(x as isize + k as isize - radius, width);
                    w * src[y * width + sx] as u32
                })
                .sum();
        }
    }

    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let sum: u32 = SMOOTHING_KERNEL
            .iter()
            .enumerate()
            .map(|(k, &w)| {
                let sy = reflect_101(y as isize + k as isize - radius, height);
                w * rows[sy * width + x]
            })
            .sum();
        Luma([((sum + 128) >> 8) as u8])
    })
}

/// Gaussian-weighted mean over a `THRESHOLD_BLOCK_SIZE` square neighborhood
fn local_mean(gray: &GrayImage) -> GrayImage {
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    let kernel = gaussian_kernel(THRESHOLD_BLOCK_SIZE);
    let radius = (THRESHOLD_BLOCK_SIZE / 2) as isize;
    let src = gray.as_raw();

    let mut rows = vec![0f64; width * height];
    for y in 0..height {
        for x in 0..width {
            rows[y * width + x] = kernel
                .iter()
                .enumerate()
                .map(|(k, &w)| {
                    let sx = clamp_index(x as isize + k as isize - radius, width);
                    w * src[y * width + sx] as f64
                })
                .sum();
        }
    }

    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let mean: f64 = kernel
            .iter()
            .enumerate()
            .map(|(k, &w)| {
                let sy = clamp_index(y as isize + k as isize - radius, height);
                w * rows[sy * width + x]
            })
            .sum();
        Luma([mean.round().clamp(0.0, 255.0) as u8])
    })
}

fn adaptive_threshold(gray: &GrayImage) -> BinaryMask {
    let mean = local_mean(gray);
    BinaryMask::from_fn(gray.width(), gray.height(), |x, y| {
        let pixel = gray.get_pixel(x, y)[0] as i32;
        let local = mean.get_pixel(x, y)[0] as i32;
        pixel - local <= -THRESHOLD_OFFSET
    })
}

/// Normalized 1-D Gaussian with sigma derived from the kernel size
fn gaussian_kernel(size: usize) -> Vec<f64> {
    let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f64;
    let scale = -0.5 / (sigma * sigma);

    let mut kernel: Vec<f64> = (0..size)
        .map(|i| {
            let d = i as f64 - center;
            (scale * d * d).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    kernel.iter_mut().for_each(|w| *w /= sum);
    kernel
}

/// Mirror an out-of-range index without repeating the edge pixel (`dcb|abcd|cba`)
fn reflect_101(mut i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let n = len as isize;
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i as usize;
        }
    }
}

fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
