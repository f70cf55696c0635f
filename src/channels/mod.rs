// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Image plumbing around the spectral core: float planes, the luma/chroma
//! color model, and lossless-only image I/O.

pub mod color;
pub mod io;
pub mod plane;

pub use color::{merge_channels, split_channels, Channels};
pub use io::{prepare_secret, read_image, read_secret, save_image};
pub use plane::{Plane, Region};
