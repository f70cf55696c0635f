// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Steganographic encoding and decoding pipelines.
//!
//! One [`Encoder`] hides two grayscale secrets, one per chroma channel, in
//! the Fourier magnitude of a carrier. Three decoders recover them:
//!
//! - **Differential** ([`DifferentialDecoder`]): the original carrier is at
//!   hand, so its magnitude is subtracted exactly.
//! - **Sized blind** ([`SizedBlindDecoder`]): no original, but the secret
//!   size is known; the carrier is suppressed statistically and the fixed
//!   embed region is cropped.
//! - **Auto blind** ([`AutoBlindDecoder`]): no original and no size; the
//!   payload rectangle is located by thresholding and contour analysis.
//!
//! Encoder and decoders must share the same [`EmbedParams`].

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod layout;
pub mod locate;
pub mod region;
pub mod suppress;

pub use config::{EmbedParams, RegionParams, StegoConfig, SuppressParams};
pub use decoder::{AutoBlindDecoder, DecodeMode, DifferentialDecoder, SizedBlindDecoder};
pub use encoder::Encoder;
pub use error::{Result, StegoError};
pub use locate::{FixedRegion, Locate};
pub use region::RegionExtractor;

/// Runs both chroma-channel jobs, concurrently with the `parallel` feature.
#[cfg(feature = "parallel")]
pub(crate) fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

/// Runs both chroma-channel jobs, concurrently with the `parallel` feature.
#[cfg(not(feature = "parallel"))]
pub(crate) fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}
