// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Carrier baseline removal: turns a chroma magnitude spectrum into a
//! residual in which only the payload stands out.
//!
//! With the original carrier at hand the baseline is exact and is simply
//! subtracted ([`difference`]). Without it, the carrier is approximated by
//! global statistics ([`suppress`]): the low-frequency corners are blanked,
//! everything below the mean is flattened onto it, and the result is
//! centred at zero.

use crate::channels::Plane;
use crate::stego::config::SuppressParams;
use crate::stego::error::{Result, StegoError};

/// `encoded - original`, elementwise.
///
/// # Errors
/// [`StegoError::DimensionMismatch`] if the shapes differ.
pub fn difference(encoded: &Plane, original: &Plane) -> Result<Plane> {
    if encoded.shape() != original.shape() {
        return Err(StegoError::DimensionMismatch { encoded: encoded.shape(), original: original.shape() });
    }
    let data = encoded.data.iter().zip(&original.data).map(|(e, o)| e - o).collect();
    Ok(Plane::from_vec(encoded.width, encoded.height, data))
}

/// Blind statistical suppression on a private copy of `magnitude`.
///
/// 1. `mean` = global mean.
/// 2. The four `guard x guard` corner blocks (clamped to the plane) are
///    set to `mean`.
/// 3. Every sample below `mean` is raised to `mean`.
/// 4. The recomputed global mean is subtracted.
pub fn suppress(magnitude: &Plane, params: &SuppressParams) -> Plane {
    let mut out = magnitude.clone();
    let (h, w) = out.shape();
    let average = out.mean();

    let gh = params.corner_guard.min(h);
    let gw = params.corner_guard.min(w);
    for (row0, col0) in [(0, 0), (h - gh, w - gw), (0, w - gw), (h - gh, 0)] {
        for row in row0..row0 + gh {
            out.data[row * w + col0..row * w + col0 + gw].fill(average);
        }
    }

    for v in out.data.iter_mut() {
        if *v < average {
            *v = average;
        }
    }

    let centred = out.mean();
    for v in out.data.iter_mut() {
        *v -= centred;
    }
    out
}
