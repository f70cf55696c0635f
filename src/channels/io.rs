// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Image read/write with a lossless-output contract.
//!
//! The payload lives in small perturbations of high-frequency chroma
//! magnitudes, which any lossy codec discards. Saving is therefore limited
//! to formats that store samples exactly.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageBuffer, Pixel, RgbImage};
use tracing::debug;

use crate::stego::error::{Result, StegoError};

/// Extensions accepted by [`save_image`].
pub const LOSSLESS_EXTENSIONS: &[&str] = &["png", "bmp", "tif", "tiff", "ppm", "pgm", "pnm", "tga"];

/// Read an image from disk as 8-bit RGB.
pub fn read_image(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|_| StegoError::ImageNotFound { path: path.to_path_buf() })?;
    debug!(path = %path.display(), width = img.width(), height = img.height(), "read image");
    Ok(img.to_rgb8())
}

/// Read a secret image from disk, converted to grayscale and resized to
/// `size = (width, height)`.
pub fn read_secret(path: impl AsRef<Path>, size: (u32, u32)) -> Result<GrayImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|_| StegoError::ImageNotFound { path: path.to_path_buf() })?;
    Ok(prepare_secret(&img, size))
}

/// Grayscale conversion plus bilinear resize to `size = (width, height)`.
/// Images already at that size are only converted.
pub fn prepare_secret(img: &DynamicImage, size: (u32, u32)) -> GrayImage {
    resize_gray(img.to_luma8(), size)
}

pub(crate) fn resize_gray(gray: GrayImage, size: (u32, u32)) -> GrayImage {
    if gray.dimensions() == size {
        gray
    } else {
        imageops::resize(&gray, size.0, size.1, FilterType::Triangle)
    }
}

/// Write `image` to `path`, refusing lossy and unknown formats.
pub fn save_image<P>(image: &ImageBuffer<P, Vec<u8>>, path: impl AsRef<Path>) -> Result<()>
where
    P: Pixel<Subpixel = u8> + image::PixelWithColorType,
{
    let path = path.as_ref();
    check_lossless(path)?;
    image.save(path)?;
    debug!(path = %path.display(), "saved image");
    Ok(())
}

/// Fail with [`StegoError::UnsupportedOutputFormat`] unless the extension of
/// `path` names a lossless format.
pub fn check_lossless(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if LOSSLESS_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(StegoError::UnsupportedOutputFormat(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn lossy_extensions_rejected() {
        for name in ["x.jpg", "x.JPEG", "x.webp", "x.gif", "x", "x.unknown"] {
            let err = check_lossless(Path::new(name)).unwrap_err();
            assert!(matches!(err, StegoError::UnsupportedOutputFormat(_)), "{name}: {err}");
        }
    }

    #[test]
    fn lossless_extensions_accepted() {
        for name in ["x.png", "x.PNG", "out/x.bmp", "x.tiff", "x.pgm"] {
            assert!(check_lossless(Path::new(name)).is_ok(), "{name}");
        }
    }

    #[test]
    fn missing_file_is_image_not_found() {
        let err = read_image("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, StegoError::ImageNotFound { .. }));
    }

    #[test]
    fn secret_is_resized() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(40, 30, Luma([200])));
        let secret = prepare_secret(&img, (20, 10));
        assert_eq!(secret.dimensions(), (20, 10));
        assert!(secret.pixels().all(|p| p.0[0] == 200));
    }
}
