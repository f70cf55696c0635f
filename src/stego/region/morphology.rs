// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Grayscale erosion and dilation with square structuring elements.
//!
//! Both are separable min/max filters (rows, then columns). Samples outside
//! the image are ignored. For an element of side `k` the erosion window is
//! `[x - k/2, x + (k-1) - k/2]` and the dilation window is its reflection,
//! so erode-then-dilate is an exact opening of bright structure (closing of
//! dark structure) and never shifts a shape, even for even `k`.

use image::GrayImage;

fn filter_1d(src: &[u8], dst: &mut [u8], before: usize, after: usize, pick: fn(u8, u8) -> u8) {
    let n = src.len();
    for i in 0..n {
        let lo = i.saturating_sub(before);
        let hi = (i + after).min(n - 1);
        dst[i] = src[lo..=hi].iter().copied().fold(src[i], pick);
    }
}

fn filter_2d(img: &GrayImage, k: usize, before: usize, after: usize, pick: fn(u8, u8) -> u8) -> GrayImage {
    if k <= 1 || img.width() == 0 || img.height() == 0 {
        return img.clone();
    }
    let (w, h) = (img.width() as usize, img.height() as usize);
    let src = img.as_raw();

    let mut rows = vec![0u8; w * h];
    for r in 0..h {
        filter_1d(&src[r * w..(r + 1) * w], &mut rows[r * w..(r + 1) * w], before, after, pick);
    }

    let mut out = vec![0u8; w * h];
    let mut col = vec![0u8; h];
    let mut filtered = vec![0u8; h];
    for c in 0..w {
        for r in 0..h {
            col[r] = rows[r * w + c];
        }
        filter_1d(&col, &mut filtered, before, after, pick);
        for r in 0..h {
            out[r * w + c] = filtered[r];
        }
    }

    GrayImage::from_raw(w as u32, h as u32, out).unwrap_or_else(|| img.clone())
}

/// Samples taken before and after the centre by the erosion window.
fn window(k: usize) -> (usize, usize) {
    let anchor = k / 2;
    (anchor, k.saturating_sub(anchor + 1))
}

/// Minimum filter with a `k x k` element.
pub fn erode(img: &GrayImage, k: usize) -> GrayImage {
    let (before, after) = window(k);
    filter_2d(img, k, before, after, u8::min)
}

/// Maximum filter with the reflected `k x k` element.
pub fn dilate(img: &GrayImage, k: usize) -> GrayImage {
    let (before, after) = window(k);
    filter_2d(img, k, after, before, u8::max)
}

/// Erode then dilate: removes bright structure narrower than `k`.
pub fn open(img: &GrayImage, k: usize) -> GrayImage {
    dilate(&erode(img, k), k)
}
