// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Example: hide two images in a carrier and recover them with every decoder.
//!
//! ```text
//! RUST_LOG=rubies_core=debug cargo run --example roundtrip -- \
//!     carrier.png secret_a.png secret_b.png out/
//! ```

use std::path::PathBuf;

use rubies_core::{AutoBlindDecoder, DifferentialDecoder, Encoder, SizedBlindDecoder, StegoError};
use tracing_subscriber::EnvFilter;

const SECRET_SIZE: (u32, u32) = (500, 500);

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        eprintln!("Usage: roundtrip <carrier> <secret_a> <secret_b> <out_dir>");
        std::process::exit(1);
    }

    if let Err(e) = run(&args[1], &args[2], &args[3], PathBuf::from(&args[4])) {
        eprintln!("roundtrip failed: {e}");
        std::process::exit(1);
    }
}

fn run(carrier: &str, secret_a: &str, secret_b: &str, out: PathBuf) -> Result<(), StegoError> {
    let stego_path = out.join("stego.png");

    let mut encoder = Encoder::open(carrier, SECRET_SIZE)?;
    encoder.encode_paths(secret_a, secret_b)?;
    encoder.save(&stego_path)?;
    println!("Stego image written to: {}", stego_path.display());

    let mut differential = DifferentialDecoder::open(&stego_path, carrier)?;
    differential.decode(SECRET_SIZE)?;
    differential.save(out.join("differential_a.png"), out.join("differential_b.png"))?;

    let mut sized = SizedBlindDecoder::open(&stego_path)?;
    sized.decode(SECRET_SIZE)?;
    sized.save(out.join("sized_a.png"), out.join("sized_b.png"))?;

    let mut auto = AutoBlindDecoder::open(&stego_path)?;
    auto.decode()?;
    auto.save(out.join("auto_a.png"), out.join("auto_b.png"))?;
    if let Some([a, b]) = auto.regions() {
        println!("Located regions: {a:?}, {b:?}");
    }

    println!("Recovered secrets written to: {}", out.display());
    Ok(())
}
