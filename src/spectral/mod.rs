// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Spectral transform: 2D FFT plus magnitude/phase decomposition.

pub mod fft2d;

pub use fft2d::{fft2d, ifft2d, ifft2d_complex, Spectrum2D};

use num_complex::Complex64;

use crate::channels::Plane;

/// Forward transform of a channel plane.
pub fn forward(channel: &Plane) -> Spectrum2D {
    fft2d(&channel.data, channel.width, channel.height)
}

/// Elementwise `|z|` of a spectrum.
pub fn magnitude(spectrum: &Spectrum2D) -> Plane {
    Plane::from_vec(spectrum.width, spectrum.height, spectrum.data.iter().map(|c| c.norm()).collect())
}

/// Elementwise `arg(z)` of a spectrum, in `(-pi, pi]`.
pub fn phase(spectrum: &Spectrum2D) -> Plane {
    Plane::from_vec(spectrum.width, spectrum.height, spectrum.data.iter().map(|c| c.arg()).collect())
}

/// Rebuild a spectrum as `magnitude * e^(i * phase)`.
///
/// # Panics
/// If the planes differ in size.
pub fn from_polar(magnitude: &Plane, phase: &Plane) -> Spectrum2D {
    assert_eq!(magnitude.shape(), phase.shape(), "magnitude and phase differ in size");
    let data = magnitude
        .data
        .iter()
        .zip(&phase.data)
        .map(|(&m, &p)| Complex64::from_polar(m, p))
        .collect();
    Spectrum2D { data, width: magnitude.width, height: magnitude.height }
}

/// Magnitude of a channel's spectrum in one step.
pub fn magnitude_of(channel: &Plane) -> Plane {
    magnitude(&forward(channel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_roundtrip_restores_channel() {
        let channel = Plane::from_vec(6, 5, (0..30).map(|i| ((i * 13) % 17) as f64 + 100.0).collect());
        let spectrum = forward(&channel);
        let rebuilt = from_polar(&magnitude(&spectrum), &phase(&spectrum));
        let back = ifft2d(&rebuilt);
        for (a, b) in channel.data.iter().zip(&back) {
            assert!((a - b).abs() < 1e-8, "{a} vs {b}");
        }
    }

    #[test]
    fn magnitude_is_non_negative() {
        let channel = Plane::from_vec(4, 4, (0..16).map(|i| (i as f64 - 8.0) * 3.5).collect());
        assert!(magnitude_of(&channel).data.iter().all(|&m| m >= 0.0));
    }
}
