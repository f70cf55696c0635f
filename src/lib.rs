// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # rubies-core
//!
//! Hides two grayscale secret images in one color carrier by adding them to
//! the Fourier magnitude of the carrier's two chroma channels, and recovers
//! them again. Three recovery modes:
//!
//! - **Differential**: the original carrier is available and its spectrum
//!   is subtracted exactly.
//! - **Sized blind**: only the stego image and the secret size are known.
//! - **Auto blind**: only the stego image is known; the payload rectangle is
//!   located automatically.
//!
//! Output must be stored losslessly: the payload does not survive JPEG.
//! The spectral core (`spectral` module) is a self-contained radix-2 and
//! Bluestein FFT over `num-complex`; image I/O goes through the `image`
//! crate.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use rubies_core::{Encoder, DifferentialDecoder};
//!
//! let mut encoder = Encoder::open("carrier.png", (500, 500))?;
//! let stego = encoder.encode_paths("secret_a.png", "secret_b.png")?;
//! encoder.save("stego.png")?;
//!
//! let mut decoder = DifferentialDecoder::open("stego.png", "carrier.png")?;
//! decoder.decode((500, 500))?;
//! decoder.save("recovered_a.png", "recovered_b.png")?;
//! ```

pub mod channels;
pub mod spectral;
pub mod stego;

pub use channels::{merge_channels, split_channels, Channels, Plane, Region};
pub use stego::{AutoBlindDecoder, DifferentialDecoder, Encoder, SizedBlindDecoder};
pub use stego::{EmbedParams, RegionParams, StegoConfig, SuppressParams};
pub use stego::{Result, StegoError};
