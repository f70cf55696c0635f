// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Recovering the two secrets from a stego image.
//!
//! All three decoders share [`DecoderCore`]: it splits the stego image,
//! takes the chroma magnitude spectra and turns them into residuals, either
//! against the original carrier or by statistical suppression. Decoding
//! then crops each residual at a region chosen by a [`Locate`] strategy and
//! rescales it to 8-bit gray. Residuals are computed up front and never
//! modified, so decoding can be repeated.

use std::path::Path;

use image::{GrayImage, RgbImage};
use tracing::debug;

use crate::channels::io::check_lossless;
use crate::channels::{read_image, save_image, split_channels, Plane, Region};
use crate::spectral::magnitude_of;
use crate::stego::config::StegoConfig;
use crate::stego::error::{Result, StegoError};
use crate::stego::layout::rescale_to_gray;
use crate::stego::locate::{FixedRegion, Locate};
use crate::stego::region::RegionExtractor;
use crate::stego::suppress::{difference, suppress};

/// Which of the three decoding strategies a [`DecoderCore`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeMode {
    /// Subtract the original carrier's magnitude instead of suppressing.
    pub use_original: bool,
    /// Locate the payload instead of cropping the fixed embed region.
    pub auto_locate: bool,
}

impl DecodeMode {
    pub const DIFFERENTIAL: DecodeMode = DecodeMode { use_original: true, auto_locate: false };
    pub const SIZED_BLIND: DecodeMode = DecodeMode { use_original: false, auto_locate: false };
    pub const AUTO_BLIND: DecodeMode = DecodeMode { use_original: false, auto_locate: true };

    /// Fixed-region blind crops are divided by the embed scale before
    /// rescaling; the other modes rescale the raw residual.
    fn divides_by_scale(self) -> bool {
        !self.use_original && !self.auto_locate
    }
}

/// Shared decoder state: chroma magnitudes, residuals, last result.
#[derive(Debug, Clone)]
pub struct DecoderCore {
    mode: DecodeMode,
    config: StegoConfig,
    /// Encoded chroma magnitudes, kept by blind cores to rebuild their
    /// residuals on reconfiguration.
    magnitudes: Option<[Plane; 2]>,
    residuals: [Plane; 2],
    decoded: Option<[GrayImage; 2]>,
    regions: Option<[Region; 2]>,
}

fn chroma_magnitudes(image: &RgbImage) -> [Plane; 2] {
    let channels = split_channels(image);
    let (a, b) = super::join(|| magnitude_of(&channels.chroma_a), || magnitude_of(&channels.chroma_b));
    [a, b]
}

fn image_shape(image: &RgbImage) -> (usize, usize) {
    (image.height() as usize, image.width() as usize)
}

fn suppress_both(magnitudes: &[Plane; 2], config: &StegoConfig) -> [Plane; 2] {
    let params = config.suppress;
    let (a, b) = super::join(|| suppress(&magnitudes[0], &params), || suppress(&magnitudes[1], &params));
    [a, b]
}

impl DecoderCore {
    /// Core whose residuals are `|F(encoded)| - |F(original)|`.
    ///
    /// # Errors
    /// [`StegoError::DimensionMismatch`] if the images differ in size.
    pub fn differential(encoded: &RgbImage, original: &RgbImage, config: StegoConfig) -> Result<Self> {
        if image_shape(encoded) != image_shape(original) {
            return Err(StegoError::DimensionMismatch {
                encoded: image_shape(encoded),
                original: image_shape(original),
            });
        }
        let [enc_a, enc_b] = chroma_magnitudes(encoded);
        let [orig_a, orig_b] = chroma_magnitudes(original);
        let residuals = [difference(&enc_a, &orig_a)?, difference(&enc_b, &orig_b)?];
        debug!(height = encoded.height(), width = encoded.width(), "decoder: differential residuals ready");
        Ok(Self::assemble(DecodeMode::DIFFERENTIAL, config, None, residuals))
    }

    /// Core whose residuals are statistically suppressed magnitudes.
    pub fn blind(auto_locate: bool, encoded: &RgbImage, config: StegoConfig) -> Self {
        let magnitudes = chroma_magnitudes(encoded);
        let residuals = suppress_both(&magnitudes, &config);
        debug!(
            auto_locate,
            height = encoded.height(),
            width = encoded.width(),
            corner_guard = config.suppress.corner_guard,
            "decoder: blind residuals ready"
        );
        let mode = DecodeMode { use_original: false, auto_locate };
        Self::assemble(mode, config, Some(magnitudes), residuals)
    }

    fn assemble(
        mode: DecodeMode,
        config: StegoConfig,
        magnitudes: Option<[Plane; 2]>,
        residuals: [Plane; 2],
    ) -> Self {
        DecoderCore { mode, config, magnitudes, residuals, decoded: None, regions: None }
    }

    /// Replaces the configuration and drops any previous result. Blind
    /// residuals are rebuilt with the new suppression parameters.
    pub fn reconfigure(&mut self, config: StegoConfig) {
        if let Some(magnitudes) = &self.magnitudes {
            self.residuals = suppress_both(magnitudes, &config);
        }
        self.config = config;
        self.decoded = None;
        self.regions = None;
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    pub fn config(&self) -> &StegoConfig {
        &self.config
    }

    /// Residual spectra of the two chroma channels.
    pub fn residuals(&self) -> &[Plane; 2] {
        &self.residuals
    }

    /// Crops both residuals where `locator` points and rescales them.
    ///
    /// # Errors
    /// Whatever `locator` reports ([`StegoError::SecretTooLarge`],
    /// [`StegoError::NoContourFound`]). On error the previous result is kept.
    pub fn decode_with<L: Locate + Sync>(&mut self, locator: &L) -> Result<[GrayImage; 2]> {
        let [res_a, res_b] = &self.residuals;
        let (region_a, region_b) = super::join(|| locator.locate(res_a), || locator.locate(res_b));
        let regions = [region_a?, region_b?];

        let divisor = if self.mode.divides_by_scale() { self.config.embed.scale } else { 1.0 };
        let (a, b) = super::join(
            || rescale_to_gray(&res_a.crop(&regions[0]).map(|v| v / divisor)),
            || rescale_to_gray(&res_b.crop(&regions[1]).map(|v| v / divisor)),
        );

        debug!(mode = ?self.mode, region_a = ?regions[0], region_b = ?regions[1], "decoder: recovered secrets");
        self.regions = Some(regions);
        self.decoded = Some([a.clone(), b.clone()]);
        Ok([a, b])
    }

    /// Fixed embed region for `secret_size = (width, height)`.
    pub fn fixed_region(&self, secret_size: (u32, u32)) -> FixedRegion {
        FixedRegion { secret: (secret_size.1 as usize, secret_size.0 as usize), embed: self.config.embed }
    }

    /// Contour-based locator under the current configuration.
    pub fn extractor(&self) -> RegionExtractor {
        RegionExtractor::new(self.config.region, self.config.embed.column_shift)
    }

    pub fn decoded(&self) -> Option<&[GrayImage; 2]> {
        self.decoded.as_ref()
    }

    pub fn regions(&self) -> Option<&[Region; 2]> {
        self.regions.as_ref()
    }

    /// Writes both recovered secrets. Both paths are validated before
    /// anything is written.
    ///
    /// # Errors
    /// [`StegoError::DecodeBeforeSave`] before a successful decode,
    /// [`StegoError::UnsupportedOutputFormat`] for lossy extensions.
    pub fn save(&self, path_a: impl AsRef<Path>, path_b: impl AsRef<Path>) -> Result<()> {
        let [a, b] = self.decoded.as_ref().ok_or(StegoError::DecodeBeforeSave)?;
        check_lossless(path_a.as_ref())?;
        check_lossless(path_b.as_ref())?;
        save_image(a, path_a)?;
        save_image(b, path_b)
    }
}

/// Decoder with access to the original carrier.
#[derive(Debug, Clone)]
pub struct DifferentialDecoder {
    core: DecoderCore,
}

impl DifferentialDecoder {
    /// # Errors
    /// [`StegoError::DimensionMismatch`] if the images differ in size.
    pub fn new(encoded: &RgbImage, original: &RgbImage) -> Result<Self> {
        Ok(Self { core: DecoderCore::differential(encoded, original, StegoConfig::default())? })
    }

    pub fn open(encoded: impl AsRef<Path>, original: impl AsRef<Path>) -> Result<Self> {
        Self::new(&read_image(encoded)?, &read_image(original)?)
    }

    pub fn with_config(mut self, config: StegoConfig) -> Self {
        self.core.reconfigure(config);
        self
    }

    /// Recovers both secrets at `secret_size = (width, height)`.
    pub fn decode(&mut self, secret_size: (u32, u32)) -> Result<[GrayImage; 2]> {
        let fixed = self.core.fixed_region(secret_size);
        self.core.decode_with(&fixed)
    }

    pub fn decoded(&self) -> Option<&[GrayImage; 2]> {
        self.core.decoded()
    }

    pub fn save(&self, path_a: impl AsRef<Path>, path_b: impl AsRef<Path>) -> Result<()> {
        self.core.save(path_a, path_b)
    }

    pub fn core(&self) -> &DecoderCore {
        &self.core
    }
}

/// Blind decoder for secrets of known size.
#[derive(Debug, Clone)]
pub struct SizedBlindDecoder {
    core: DecoderCore,
}

impl SizedBlindDecoder {
    pub fn new(encoded: &RgbImage) -> Self {
        Self { core: DecoderCore::blind(false, encoded, StegoConfig::default()) }
    }

    pub fn open(encoded: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(&read_image(encoded)?))
    }

    pub fn with_config(mut self, config: StegoConfig) -> Self {
        self.core.reconfigure(config);
        self
    }

    /// Recovers both secrets at `secret_size = (width, height)`.
    pub fn decode(&mut self, secret_size: (u32, u32)) -> Result<[GrayImage; 2]> {
        let fixed = self.core.fixed_region(secret_size);
        self.core.decode_with(&fixed)
    }

    pub fn decoded(&self) -> Option<&[GrayImage; 2]> {
        self.core.decoded()
    }

    pub fn save(&self, path_a: impl AsRef<Path>, path_b: impl AsRef<Path>) -> Result<()> {
        self.core.save(path_a, path_b)
    }

    pub fn core(&self) -> &DecoderCore {
        &self.core
    }
}

/// Blind decoder that finds the payload by itself.
#[derive(Debug, Clone)]
pub struct AutoBlindDecoder {
    core: DecoderCore,
}

impl AutoBlindDecoder {
    pub fn new(encoded: &RgbImage) -> Self {
        Self { core: DecoderCore::blind(true, encoded, StegoConfig::default()) }
    }

    pub fn open(encoded: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(&read_image(encoded)?))
    }

    pub fn with_config(mut self, config: StegoConfig) -> Self {
        self.core.reconfigure(config);
        self
    }

    /// Locates and recovers both secrets. The two may come out at slightly
    /// different sizes.
    pub fn decode(&mut self) -> Result<[GrayImage; 2]> {
        let extractor = self.core.extractor();
        self.core.decode_with(&extractor)
    }

    pub fn decoded(&self) -> Option<&[GrayImage; 2]> {
        self.core.decoded()
    }

    /// Located payload rectangles, one per chroma channel.
    pub fn regions(&self) -> Option<&[Region; 2]> {
        self.core.regions()
    }

    pub fn save(&self, path_a: impl AsRef<Path>, path_b: impl AsRef<Path>) -> Result<()> {
        self.core.save(path_a, path_b)
    }

    pub fn core(&self) -> &DecoderCore {
        &self.core
    }
}
