// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload placement and display rescaling shared by encoder and decoders.
//!
//! The secret is centred vertically but pinned against the right edge of
//! the spectrum, then moved `column_shift` columns left. Encoder and every
//! decoder go through [`embed_region`], so the placement cannot drift
//! between them.

use image::{GrayImage, Luma};

use crate::channels::{Plane, Region};
use crate::stego::config::EmbedParams;
use crate::stego::error::{Result, StegoError};

/// Offset of the secret inside the carrier spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    /// `(H_carrier - H_secret) / 2`.
    pub vertical: usize,
    /// `W_carrier - W_secret`.
    pub horizontal: usize,
}

impl Padding {
    /// Padding for `(height, width)` shapes.
    ///
    /// # Errors
    /// [`StegoError::SecretTooLarge`] if the secret exceeds the carrier in
    /// either dimension.
    pub fn compute(carrier: (usize, usize), secret: (usize, usize)) -> Result<Self> {
        let too_large = || StegoError::SecretTooLarge { carrier, secret };
        let vertical = carrier.0.checked_sub(secret.0).ok_or_else(too_large)? / 2;
        let horizontal = carrier.1.checked_sub(secret.1).ok_or_else(too_large)?;
        Ok(Padding { vertical, horizontal })
    }
}

/// Spectrum region that carries a secret of shape `secret = (height, width)`.
///
/// Rows `vpad .. vpad + H_s`, columns `hpad - shift .. W_c - shift`.
///
/// # Errors
/// [`StegoError::SecretTooLarge`] if the secret does not fit, including
/// the case where the column shift would push it past the left edge.
pub fn embed_region(carrier: (usize, usize), secret: (usize, usize), params: &EmbedParams) -> Result<Region> {
    let pad = Padding::compute(carrier, secret)?;
    let left = pad
        .horizontal
        .checked_sub(params.column_shift)
        .ok_or(StegoError::SecretTooLarge { carrier, secret })?;
    Ok(Region { top: pad.vertical, left, height: secret.0, width: secret.1 })
}

/// Peak-to-peak rescale to `0..=255`, truncating toward zero.
///
/// The minimum maps to 0 and the maximum to 255. A flat plane (including
/// an empty one) maps to all zeros.
pub fn rescale_to_u8(plane: &Plane) -> Vec<u8> {
    let (lo, hi) = plane.min_max();
    let range = hi - lo;
    if range <= 0.0 || !range.is_finite() {
        return vec![0; plane.data.len()];
    }
    plane
        .data
        .iter()
        .map(|&v| ((v - lo) / range * 255.0).clamp(0.0, 255.0) as u8)
        .collect()
}

/// [`rescale_to_u8`] packaged as a grayscale image.
pub fn rescale_to_gray(plane: &Plane) -> GrayImage {
    let buf = rescale_to_u8(plane);
    let w = plane.width;
    GrayImage::from_fn(w as u32, plane.height as u32, |x, y| Luma([buf[y as usize * w + x as usize]]))
}
