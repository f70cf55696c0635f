// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Luma/chroma split and merge using the JFIF YCbCr model.
//!
//! Full-range BT.601, the same component model a baseline JPEG stores: one
//! luminance plane and two chroma planes centred on 128. Planes stay in
//! `f64` so the encoder's inverse-transform output is only quantized once,
//! when the RGB image is rebuilt.

use image::{Rgb, RgbImage};

use super::plane::Plane;

/// One luminance and two chroma planes of the same size.
#[derive(Debug, Clone, PartialEq)]
pub struct Channels {
    pub luma: Plane,
    /// Blue-difference chroma (Cb).
    pub chroma_a: Plane,
    /// Red-difference chroma (Cr).
    pub chroma_b: Plane,
}

impl Channels {
    pub fn width(&self) -> usize {
        self.luma.width
    }

    pub fn height(&self) -> usize {
        self.luma.height
    }
}

/// RGB → (Y, Cb, Cr) planes.
pub fn split_channels(image: &RgbImage) -> Channels {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let mut luma = Vec::with_capacity(w * h);
    let mut chroma_a = Vec::with_capacity(w * h);
    let mut chroma_b = Vec::with_capacity(w * h);

    for px in image.pixels() {
        let [r, g, b] = px.0.map(f64::from);
        luma.push(0.299 * r + 0.587 * g + 0.114 * b);
        chroma_a.push(128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b);
        chroma_b.push(128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b);
    }

    Channels {
        luma: Plane::from_vec(w, h, luma),
        chroma_a: Plane::from_vec(w, h, chroma_a),
        chroma_b: Plane::from_vec(w, h, chroma_b),
    }
}

/// (Y, Cb, Cr) planes → RGB, rounding and clamping each sample to `0..=255`.
///
/// # Panics
/// If the three planes differ in size.
pub fn merge_channels(channels: &Channels) -> RgbImage {
    let (w, h) = (channels.width(), channels.height());
    assert!(
        channels.chroma_a.shape() == (h, w) && channels.chroma_b.shape() == (h, w),
        "channel planes differ in size"
    );

    let mut out = RgbImage::new(w as u32, h as u32);
    for (i, px) in out.pixels_mut().enumerate() {
        let y = channels.luma.data[i];
        let cb = channels.chroma_a.data[i] - 128.0;
        let cr = channels.chroma_b.data[i] - 128.0;
        let r = y + 1.402 * cr;
        let g = y - 0.344_136 * cb - 0.714_136 * cr;
        let b = y + 1.772 * cb;
        *px = Rgb([to_u8(r), to_u8(g), to_u8(b)]);
    }
    out
}

fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_has_neutral_chroma() {
        let img = RgbImage::from_pixel(3, 2, Rgb([90, 90, 90]));
        let ch = split_channels(&img);
        for i in 0..6 {
            assert!((ch.luma.data[i] - 90.0).abs() < 1e-9);
            assert!((ch.chroma_a.data[i] - 128.0).abs() < 1e-9);
            assert!((ch.chroma_b.data[i] - 128.0).abs() < 1e-9);
        }
    }

    #[test]
    fn split_merge_roundtrip_is_lossless() {
        let mut img = RgbImage::new(16, 16);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = Rgb([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8]);
        }
        let restored = merge_channels(&split_channels(&img));
        assert_eq!(restored, img);
    }

    #[test]
    fn merge_clamps_out_of_range() {
        let luma = Plane::filled(1, 1, 250.0);
        let chroma_a = Plane::filled(1, 1, 255.0);
        let chroma_b = Plane::filled(1, 1, 0.0);
        let img = merge_channels(&Channels { luma, chroma_a, chroma_b });
        // R = 250 - 1.402 * 128 = 70.544; G and B overflow.
        assert_eq!(img.get_pixel(0, 0).0, [71, 255, 255]);
    }
}
