// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers every failure from reading the carrier through
//! locating and saving the recovered secrets. All errors are immediate;
//! nothing is written to disk when an operation fails.

use core::fmt;
use std::path::PathBuf;

/// Errors that can occur during encoding, decoding or saving.
#[derive(Debug)]
pub enum StegoError {
    /// The path does not exist or does not decode to an image.
    ImageNotFound { path: PathBuf },
    /// The secret does not fit inside the carrier spectrum.
    /// Shapes are `(height, width)`.
    SecretTooLarge { carrier: (usize, usize), secret: (usize, usize) },
    /// The output extension names a lossy (or unknown) format.
    UnsupportedOutputFormat(String),
    /// `save()` was called before a successful `encode()`/`decode()`.
    DecodeBeforeSave,
    /// Auto-localization found no candidate payload region.
    NoContourFound,
    /// Encoded and original images have different dimensions.
    /// Shapes are `(height, width)`.
    DimensionMismatch { encoded: (usize, usize), original: (usize, usize) },
    /// The image codec failed while writing an output file.
    ImageWrite(image::ImageError),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageNotFound { path } => write!(f, "image not found: {}", path.display()),
            Self::SecretTooLarge { carrier, secret } => write!(
                f,
                "secret {}x{} does not fit carrier {}x{}",
                secret.1, secret.0, carrier.1, carrier.0
            ),
            Self::UnsupportedOutputFormat(ext) => {
                write!(f, "unsupported output format '{ext}' (use a lossless format such as png)")
            }
            Self::DecodeBeforeSave => write!(f, "nothing to save: encode or decode first"),
            Self::NoContourFound => write!(f, "no embedded region found"),
            Self::DimensionMismatch { encoded, original } => write!(
                f,
                "encoded image is {}x{} but original is {}x{}",
                encoded.1, encoded.0, original.1, original.0
            ),
            Self::ImageWrite(e) => write!(f, "failed to write image: {e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageWrite(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for StegoError {
    fn from(e: image::ImageError) -> Self {
        Self::ImageWrite(e)
    }
}

pub type Result<T> = std::result::Result<T, StegoError>;
