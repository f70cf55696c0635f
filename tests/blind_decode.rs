// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Blind recovery: sized crop and automatic localization, without the
//! original carrier.

mod common;

use common::{carrier, checkerboard, ncc, window};
use image::{GrayImage, RgbImage};
use rubies_core::stego::layout::embed_region;
use rubies_core::{AutoBlindDecoder, Encoder, Region, SizedBlindDecoder, StegoConfig, StegoError};

const SIDE: u32 = 256;
const SECRET: u32 = 64;

/// Defaults shrunk to a 256x256 carrier.
fn config() -> StegoConfig {
    StegoConfig::scaled_for(f64::from(SIDE) / 1000.0)
}

fn stego(seed: u64) -> RgbImage {
    let mut encoder = Encoder::new(&carrier(SIDE, seed), (SECRET, SECRET)).with_config(config());
    encoder.encode(&checkerboard(SECRET, 8), &checkerboard(SECRET, 16)).unwrap()
}

fn true_region() -> Region {
    let shape = (SIDE as usize, SIDE as usize);
    embed_region(shape, (SECRET as usize, SECRET as usize), &config().embed).unwrap()
}

#[test]
fn sized_blind_matches_checkerboards() {
    let mut decoder = SizedBlindDecoder::new(&stego(11)).with_config(config());
    let [a, b] = decoder.decode((SECRET, SECRET)).unwrap();

    let score_a = ncc(&a, &checkerboard(SECRET, 8));
    let score_b = ncc(&b, &checkerboard(SECRET, 16));
    assert!(score_a > 0.9, "channel a ncc {score_a}");
    assert!(score_b > 0.9, "channel b ncc {score_b}");
}

#[test]
fn sized_blind_repeats() {
    let mut decoder = SizedBlindDecoder::new(&stego(12)).with_config(config());
    let first = decoder.decode((SECRET, SECRET)).unwrap();
    let second = decoder.decode((SECRET, SECRET)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn auto_blind_box_contains_embedded_region() {
    let truth = true_region();
    let mut decoder = AutoBlindDecoder::new(&stego(13)).with_config(config());
    let [a, b] = decoder.decode().unwrap();
    let regions = *decoder.regions().unwrap();

    for (region, decoded) in regions.iter().zip([&a, &b]) {
        assert!(region.contains(&truth), "{region:?} misses {truth:?}");
        assert_eq!(decoded.dimensions(), (region.width as u32, region.height as u32));
        // Loose crop: no more than a few pixels around the payload.
        assert!(region.height <= truth.height + 12, "{region:?}");
    }

    // The payload inside the located crop still correlates with the secret.
    let inner = |decoded: &GrayImage, region: &Region| {
        window(decoded, (truth.top - region.top) as u32, (truth.left - region.left) as u32, &truth)
    };
    assert!(ncc(&inner(&a, &regions[0]), &checkerboard(SECRET, 8)) > 0.9);
    assert!(ncc(&inner(&b, &regions[1]), &checkerboard(SECRET, 16)) > 0.9);
}

#[test]
fn auto_blind_on_plain_image_finds_nothing() {
    // A flat image has no energy outside DC, so every residual bin is equal.
    let flat = RgbImage::from_pixel(64, 64, image::Rgb([90, 140, 200]));
    let mut decoder = AutoBlindDecoder::new(&flat).with_config(StegoConfig::scaled_for(0.064));
    let err = decoder.decode().unwrap_err();
    assert!(matches!(err, StegoError::NoContourFound), "{err}");
    assert!(decoder.decoded().is_none());
}
