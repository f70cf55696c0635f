// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Automatic localization of the payload in a suppressed residual.
//!
//! Pipeline, applied to the right half of the residual (reaching back by the
//! embed column shift) where payloads live:
//!
//! 1. Peak-to-peak rescale to 8-bit gray.
//! 2. Negate, Otsu threshold, inverted binarization (payload becomes
//!    foreground), then an opening with `open_kernel` to drop speckle.
//! 3. Keep the 8-connected component enclosing the largest area.
//! 4. Paint it filled and dark on a white canvas, erode then dilate with
//!    `smooth_kernel` (closing the dark blob), re-binarize at
//!    `rebinarize_level`.
//! 5. Inner boundary of the blob, Sobel edges with hysteresis.
//! 6. Inclusive bounding box of the edges, shifted back to residual
//!    coordinates.

pub mod components;
pub mod edges;
pub mod morphology;
pub mod threshold;

use image::{GrayImage, Luma};

use crate::channels::{Plane, Region};
use crate::stego::config::RegionParams;
use crate::stego::error::{Result, StegoError};
use crate::stego::layout::rescale_to_gray;

use components::largest_component;
use edges::{boundary_edges, bounding_box};
use morphology::{erode, dilate, open};
use threshold::{binarize, binarize_inv, negate, otsu_threshold};

/// Finds the payload rectangle in a blind residual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionExtractor {
    params: RegionParams,
    /// Columns the search window reaches left of the residual's midline.
    column_shift: usize,
}

impl RegionExtractor {
    pub fn new(params: RegionParams, column_shift: usize) -> Self {
        Self { params, column_shift }
    }

    /// First residual column searched: the midline moved left by the embed
    /// column shift, so a secret exactly half the carrier wide is covered.
    pub fn search_origin(&self, width: usize) -> usize {
        (width / 2).saturating_sub(self.column_shift)
    }

    /// Locates the payload in `residual`.
    ///
    /// # Errors
    /// [`StegoError::NoContourFound`] if the thresholded window is empty or
    /// the smoothed blob vanishes.
    pub fn locate(&self, residual: &Plane) -> Result<Region> {
        let (h, w) = residual.shape();
        let origin = self.search_origin(w);
        if h == 0 || w == 0 {
            return Err(StegoError::NoContourFound);
        }

        let gray = rescale_to_gray(residual);
        let window = image::imageops::crop_imm(&gray, origin as u32, 0, (w - origin) as u32, h as u32).to_image();

        let negated = negate(&window);
        let level = otsu_threshold(negated.as_raw());
        let candidates = open(&binarize_inv(&negated, level), self.params.open_kernel);
        tracing::debug!(level, origin, "region: otsu threshold");

        let contour = largest_component(&candidates).ok_or(StegoError::NoContourFound)?;
        tracing::debug!(
            pixels = contour.pixels,
            area = contour.enclosed_area(),
            bbox = ?contour.bbox,
            "region: largest contour"
        );

        let blob = self.smooth(&contour, window.width(), window.height());
        let edges = boundary_edges(&blob, self.params.edge_low, self.params.edge_high);
        let bbox = bounding_box(&edges).ok_or(StegoError::NoContourFound)?;

        let region = Region { left: bbox.left + origin, ..bbox };
        tracing::debug!(?region, "region: located payload");
        Ok(region)
    }

    /// Closed, re-binarized blob of `contour` as a 255-on-0 mask.
    fn smooth(&self, contour: &components::Component, width: u32, height: u32) -> GrayImage {
        let mut canvas = GrayImage::from_pixel(width, height, Luma([255]));
        contour.paint(&mut canvas, 0);
        let k = self.params.smooth_kernel;
        let closed = dilate(&erode(&canvas, k), k);
        negate(&binarize(&closed, self.params.rebinarize_level))
    }
}
