// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! The reference tuning: 1000x1000 carrier, 500x500 secrets, default
//! configuration. Slow in debug builds, run with `--ignored`.

mod common;

use common::{carrier, checkerboard, ncc};
use rubies_core::stego::layout::embed_region;
use rubies_core::{
    AutoBlindDecoder, DifferentialDecoder, EmbedParams, Encoder, SizedBlindDecoder, StegoConfig, SuppressParams,
};

#[test]
#[ignore]
fn reference_scenario_all_decoders() {
    let cover = carrier(1000, 42);
    let (secret_a, secret_b) = (checkerboard(500, 50), checkerboard(500, 100));

    let mut encoder = Encoder::new(&cover, (500, 500));
    let stego = encoder.encode(&secret_a, &secret_b).unwrap();

    let [a, b] = DifferentialDecoder::new(&stego, &cover).unwrap().decode((500, 500)).unwrap();
    // A half-width secret shifted by one column overlaps its own conjugate
    // mirror in columns 499..=501. Those bins carry two secret samples and
    // set the rescale peak, so only the correlation is checked here.
    for (recovered, secret) in [(&a, &secret_a), (&b, &secret_b)] {
        let score = ncc(recovered, secret);
        assert!(score > 0.95, "ncc {score}");
    }

    // The default corner guard overlaps the top and bottom rows of the
    // payload's right end, so part of it is blanked and the correlation
    // is lower than on smaller carriers.
    let [a, b] = SizedBlindDecoder::new(&stego).decode((500, 500)).unwrap();
    assert!(ncc(&a, &secret_a) > 0.8, "ncc a {}", ncc(&a, &secret_a));
    assert!(ncc(&b, &secret_b) > 0.8, "ncc b {}", ncc(&b, &secret_b));

    // A guard that stops short of the payload recovers it in full.
    let clear = StegoConfig { suppress: SuppressParams { corner_guard: 249 }, ..StegoConfig::default() };
    let [a, b] = SizedBlindDecoder::new(&stego).with_config(clear).decode((500, 500)).unwrap();
    assert!(ncc(&a, &secret_a) > 0.9, "ncc a {}", ncc(&a, &secret_a));
    assert!(ncc(&b, &secret_b) > 0.9, "ncc b {}", ncc(&b, &secret_b));

    let truth = embed_region((1000, 1000), (500, 500), &EmbedParams::default()).unwrap();
    let mut auto = AutoBlindDecoder::new(&stego);
    auto.decode().unwrap();
    for region in auto.regions().unwrap() {
        assert!(region.contains(&truth), "{region:?} misses {truth:?}");
    }
}
