// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Strategies for finding the payload inside a residual spectrum.

use crate::channels::{Plane, Region};
use crate::stego::config::EmbedParams;
use crate::stego::error::Result;
use crate::stego::layout::embed_region;
use crate::stego::region::RegionExtractor;

/// Maps a residual to the rectangle holding the payload.
pub trait Locate {
    fn locate(&self, residual: &Plane) -> Result<Region>;
}

/// The rectangle the encoder uses for a secret of known shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRegion {
    /// `(height, width)` of the secret.
    pub secret: (usize, usize),
    pub embed: EmbedParams,
}

impl Locate for FixedRegion {
    fn locate(&self, residual: &Plane) -> Result<Region> {
        embed_region(residual.shape(), self.secret, &self.embed)
    }
}

impl Locate for RegionExtractor {
    fn locate(&self, residual: &Plane) -> Result<Region> {
        RegionExtractor::locate(self, residual)
    }
}
