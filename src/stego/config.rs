// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Tunable parameters for embedding, blind suppression and auto-localization.
//!
//! The defaults were tuned on a 1000x1000 carrier with 500x500 secrets.
//! Encoder and decoders must agree on [`EmbedParams`]; the other groups only
//! affect the blind decoders.

/// Where and how strongly a secret is added to a chroma magnitude spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbedParams {
    /// Multiplier applied to each 0–255 secret sample. Default: 100.
    pub scale: f64,
    /// Constant added after scaling so the payload sits above the carrier's
    /// magnitude noise floor. Default: 5000.
    pub bias: f64,
    /// Columns the secret is moved left of the right-pinned offset, so the
    /// last spectrum column stays untouched. Default: 1.
    pub column_shift: usize,
}

impl Default for EmbedParams {
    fn default() -> Self {
        Self { scale: 100.0, bias: 5000.0, column_shift: 1 }
    }
}

/// Statistical baseline removal for blind decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuppressParams {
    /// Side of the square low-frequency block at each spectrum corner that
    /// is replaced by the mean before clamping. Default: 300.
    pub corner_guard: usize,
}

impl Default for SuppressParams {
    fn default() -> Self {
        Self { corner_guard: 300 }
    }
}

/// Morphology and edge parameters of the region extractor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionParams {
    /// Square opening element applied to the thresholded mask. Default: 15.
    pub open_kernel: usize,
    /// Square element for the erode/dilate smoothing of the chosen
    /// contour mask. Default: 100.
    pub smooth_kernel: usize,
    /// Gray level above which the smoothed mask counts as set. Default: 10.
    pub rebinarize_level: u8,
    /// Hysteresis low threshold on the Sobel gradient. Default: 100.
    pub edge_low: f64,
    /// Hysteresis high threshold on the Sobel gradient. Default: 200.
    pub edge_high: f64,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            open_kernel: 15,
            smooth_kernel: 100,
            rebinarize_level: 10,
            edge_low: 100.0,
            edge_high: 200.0,
        }
    }
}

/// Complete configuration shared by the encoder and all decoders.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StegoConfig {
    pub embed: EmbedParams,
    pub suppress: SuppressParams,
    pub region: RegionParams,
}

impl StegoConfig {
    /// Defaults with every size-dependent parameter scaled by `factor`.
    ///
    /// `factor = carrier_side / 1000.0` keeps the corner guard and the
    /// morphology elements proportional on carriers other than 1000x1000.
    /// Kernel sizes never drop below 1.
    pub fn scaled_for(factor: f64) -> Self {
        let scale = |v: usize| ((v as f64 * factor).round() as usize).max(1);
        let base = Self::default();
        Self {
            embed: base.embed,
            suppress: SuppressParams { corner_guard: scale(base.suppress.corner_guard) },
            region: RegionParams {
                open_kernel: scale(base.region.open_kernel),
                smooth_kernel: scale(base.region.smooth_kernel),
                ..base.region
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tuning() {
        let cfg = StegoConfig::default();
        assert_eq!(cfg.embed.scale, 100.0);
        assert_eq!(cfg.embed.bias, 5000.0);
        assert_eq!(cfg.embed.column_shift, 1);
        assert_eq!(cfg.suppress.corner_guard, 300);
        assert_eq!(cfg.region.open_kernel, 15);
        assert_eq!(cfg.region.smooth_kernel, 100);
    }

    #[test]
    fn scaled_config_keeps_embedding_and_floors_kernels() {
        let cfg = StegoConfig::scaled_for(0.01);
        assert_eq!(cfg.embed, EmbedParams::default());
        assert_eq!(cfg.suppress.corner_guard, 3);
        assert_eq!(cfg.region.open_kernel, 1);
        assert_eq!(cfg.region.smooth_kernel, 1);
        assert_eq!(StegoConfig::scaled_for(1.0), StegoConfig::default());
    }
}
