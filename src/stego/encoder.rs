// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embedding two grayscale secrets into a carrier's chroma spectra.
//!
//! The carrier is split once into luma and two chroma planes; the chroma
//! magnitude and phase spectra are cached. Each [`Encoder::encode`] copies a
//! cached magnitude, adds `scale * s + bias` over the embed region, rebuilds
//! the spectrum with the untouched phase and takes the real part of the
//! inverse transform. Luma is carried through unchanged.

use std::path::Path;

use image::{GrayImage, RgbImage};
use tracing::debug;

use crate::channels::io::resize_gray;
use crate::channels::{merge_channels, read_image, read_secret, save_image, split_channels, Channels, Plane, Region};
use crate::spectral::{self, from_polar, ifft2d};
use crate::stego::config::{EmbedParams, StegoConfig};
use crate::stego::error::{Result, StegoError};
use crate::stego::layout::embed_region;

/// Cached polar form of one chroma channel's spectrum.
#[derive(Debug, Clone)]
struct PolarSpectrum {
    magnitude: Plane,
    phase: Plane,
}

impl PolarSpectrum {
    fn of(channel: &Plane) -> Self {
        let spectrum = spectral::forward(channel);
        PolarSpectrum { magnitude: spectral::magnitude(&spectrum), phase: spectral::phase(&spectrum) }
    }

    /// Channel plane carrying `secret` inside `region`. `self` is untouched.
    fn embed(&self, secret: &GrayImage, region: &Region, params: &EmbedParams) -> Plane {
        let mut magnitude = self.magnitude.clone();
        for (x, y, p) in secret.enumerate_pixels() {
            let (row, col) = (region.top + y as usize, region.left + x as usize);
            let boosted = magnitude.get(row, col) + params.scale * f64::from(p.0[0]) + params.bias;
            magnitude.set(row, col, boosted);
        }
        let rebuilt = from_polar(&magnitude, &self.phase);
        Plane::from_vec(magnitude.width, magnitude.height, ifft2d(&rebuilt))
    }
}

/// Hides two secrets in one carrier image.
#[derive(Debug, Clone)]
pub struct Encoder {
    config: StegoConfig,
    /// `(width, height)` every secret is resized to.
    secret_size: (u32, u32),
    luma: Plane,
    chroma: [PolarSpectrum; 2],
    encoded: Option<RgbImage>,
}

impl Encoder {
    /// Prepares `carrier` for secrets of `secret_size = (width, height)`.
    pub fn new(carrier: &RgbImage, secret_size: (u32, u32)) -> Self {
        let Channels { luma, chroma_a, chroma_b } = split_channels(carrier);
        let (a, b) = super::join(|| PolarSpectrum::of(&chroma_a), || PolarSpectrum::of(&chroma_b));
        debug!(
            width = carrier.width(),
            height = carrier.height(),
            secret_width = secret_size.0,
            secret_height = secret_size.1,
            "encoder: cached carrier spectra"
        );
        Encoder { config: StegoConfig::default(), secret_size, luma, chroma: [a, b], encoded: None }
    }

    /// Reads the carrier from `path`.
    ///
    /// # Errors
    /// [`StegoError::ImageNotFound`] if the file is missing or not an image.
    pub fn open(path: impl AsRef<Path>, secret_size: (u32, u32)) -> Result<Self> {
        Ok(Self::new(&read_image(path)?, secret_size))
    }

    pub fn with_config(mut self, config: StegoConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &StegoConfig {
        &self.config
    }

    /// `(height, width)` of the carrier.
    pub fn carrier_shape(&self) -> (usize, usize) {
        self.luma.shape()
    }

    /// Spectrum region the secrets occupy under the current configuration.
    pub fn region(&self) -> Result<Region> {
        let secret = (self.secret_size.1 as usize, self.secret_size.0 as usize);
        embed_region(self.carrier_shape(), secret, &self.config.embed)
    }

    /// Embeds `secret_a` into the first chroma channel and `secret_b` into
    /// the second. Secrets are converted to the configured size first.
    ///
    /// Returns the stego image, which is also kept for [`Encoder::save`].
    ///
    /// # Errors
    /// [`StegoError::SecretTooLarge`] if the secret size does not fit the
    /// carrier. The previously encoded image, if any, is kept.
    pub fn encode(&mut self, secret_a: &GrayImage, secret_b: &GrayImage) -> Result<RgbImage> {
        let region = self.region()?;
        let secret_a = resize_gray(secret_a.clone(), self.secret_size);
        let secret_b = resize_gray(secret_b.clone(), self.secret_size);

        let params = self.config.embed;
        let [spec_a, spec_b] = &self.chroma;
        let (chroma_a, chroma_b) = super::join(
            || spec_a.embed(&secret_a, &region, &params),
            || spec_b.embed(&secret_b, &region, &params),
        );

        let stego = merge_channels(&Channels { luma: self.luma.clone(), chroma_a, chroma_b });
        debug!(?region, scale = params.scale, bias = params.bias, "encoder: embedded secrets");
        self.encoded = Some(stego.clone());
        Ok(stego)
    }

    /// [`Encoder::encode`] with both secrets read from disk.
    pub fn encode_paths(&mut self, path_a: impl AsRef<Path>, path_b: impl AsRef<Path>) -> Result<RgbImage> {
        let secret_a = read_secret(path_a, self.secret_size)?;
        let secret_b = read_secret(path_b, self.secret_size)?;
        self.encode(&secret_a, &secret_b)
    }

    /// The most recent successful encode.
    pub fn encoded(&self) -> Option<&RgbImage> {
        self.encoded.as_ref()
    }

    /// Writes the encoded image to `path`.
    ///
    /// # Errors
    /// [`StegoError::DecodeBeforeSave`] before a successful encode,
    /// [`StegoError::UnsupportedOutputFormat`] for lossy extensions.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let encoded = self.encoded.as_ref().ok_or(StegoError::DecodeBeforeSave)?;
        save_image(encoded, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    fn carrier(side: u32) -> RgbImage {
        RgbImage::from_fn(side, side, |x, y| {
            let v = ((x * 7 + y * 3) % 40) as u8 + 100;
            Rgb([v, v.wrapping_add(5), v.wrapping_sub(5)])
        })
    }

    fn flat(side: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(side, side, Luma([value]))
    }

    #[test]
    fn output_keeps_carrier_dimensions() {
        let mut enc = Encoder::new(&carrier(32), (8, 8));
        let out = enc.encode(&flat(8, 200), &flat(8, 50)).unwrap();
        assert_eq!(out.dimensions(), (32, 32));
        assert_eq!(enc.encoded(), Some(&out));
    }

    #[test]
    fn repeated_encode_is_identical() {
        let mut enc = Encoder::new(&carrier(24), (6, 6));
        let first = enc.encode(&flat(6, 90), &flat(6, 10)).unwrap();
        let second = enc.encode(&flat(6, 90), &flat(6, 10)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn secrets_are_resized() {
        let mut enc = Encoder::new(&carrier(32), (8, 8));
        let small = enc.encode(&flat(8, 120), &flat(8, 120)).unwrap();
        let large = enc.encode(&flat(20, 120), &flat(13, 120)).unwrap();
        assert_eq!(small, large);
    }

    #[test]
    fn oversized_secret_is_rejected() {
        let mut enc = Encoder::new(&carrier(16), (32, 8));
        let err = enc.encode(&flat(8, 1), &flat(8, 1)).unwrap_err();
        assert!(matches!(err, StegoError::SecretTooLarge { carrier: (16, 16), secret: (8, 32) }));
        assert!(enc.encoded().is_none());
    }

    #[test]
    fn save_before_encode_fails() {
        let enc = Encoder::new(&carrier(8), (2, 2));
        assert!(matches!(enc.save("never.png"), Err(StegoError::DecodeBeforeSave)));
    }

    #[test]
    fn embed_only_touches_the_region() {
        let channel = Plane::from_vec(8, 8, (0..64).map(|i| (i % 9) as f64).collect());
        let spectrum = PolarSpectrum::of(&channel);
        let region = Region { top: 2, left: 3, height: 2, width: 2 };
        let zero = GrayImage::from_pixel(2, 2, Luma([0]));
        let params = EmbedParams { scale: 1.0, bias: 0.0, column_shift: 1 };
        let out = spectrum.embed(&zero, &region, &params);
        for (a, b) in channel.data.iter().zip(&out.data) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
