// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Synthetic carriers and secrets shared by the integration tests.

#![allow(dead_code)]

use std::f64::consts::TAU;

use image::{GrayImage, Luma, Rgb, RgbImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rubies_core::Region;

/// Smooth low-frequency color field plus seeded +-1 noise per channel.
///
/// The cosines keep carrier energy in the spectrum corners; the noise gives
/// every other bin a random phase, which spreads the payload evenly over
/// the pixels instead of piling it into a few.
pub fn carrier(side: u32, seed: u64) -> RgbImage {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = side as f64;
    RgbImage::from_fn(side, side, |x, y| {
        let (fx, fy) = (x as f64 / n, y as f64 / n);
        let base = [
            128.0 + 15.0 * (TAU * fx).cos(),
            128.0 + 15.0 * (TAU * fy).cos(),
            128.0 + 12.0 * (TAU * (fx + fy)).cos(),
        ];
        let mut px = [0u8; 3];
        for (out, b) in px.iter_mut().zip(base) {
            let noise: i32 = rng.gen_range(-1..=1);
            *out = (b.round() as i32 + noise).clamp(0, 255) as u8;
        }
        Rgb(px)
    })
}

/// `side x side` checkerboard of `square`-pixel cells, top-left cell white.
pub fn checkerboard(side: u32, square: u32) -> GrayImage {
    GrayImage::from_fn(side, side, |x, y| Luma([if (x / square + y / square) % 2 == 0 { 255 } else { 0 }]))
}

/// Normalized cross-correlation of two equally sized gray images.
pub fn ncc(a: &GrayImage, b: &GrayImage) -> f64 {
    assert_eq!(a.dimensions(), b.dimensions());
    let xs: Vec<f64> = a.pixels().map(|p| f64::from(p.0[0])).collect();
    let ys: Vec<f64> = b.pixels().map(|p| f64::from(p.0[0])).collect();
    let n = xs.len() as f64;
    let (mx, my) = (xs.iter().sum::<f64>() / n, ys.iter().sum::<f64>() / n);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(&ys) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx) * (x - mx);
        syy += (y - my) * (y - my);
    }
    sxy / (sxx * syy).sqrt()
}

/// `(mean, max)` absolute pixel difference.
pub fn abs_error(a: &GrayImage, b: &GrayImage) -> (f64, u8) {
    assert_eq!(a.dimensions(), b.dimensions());
    let mut total = 0.0;
    let mut worst = 0u8;
    for (p, q) in a.pixels().zip(b.pixels()) {
        let d = p.0[0].abs_diff(q.0[0]);
        total += f64::from(d);
        worst = worst.max(d);
    }
    (total / f64::from(a.width() * a.height()), worst)
}

/// The `region`-shaped window of `image` starting at `(top, left)`.
pub fn window(image: &GrayImage, top: u32, left: u32, region: &Region) -> GrayImage {
    image::imageops::crop_imm(image, left, top, region.width as u32, region.height as u32).to_image()
}
