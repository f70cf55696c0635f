// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Connected components of a binary mask and their enclosed area.
//!
//! Foreground (non-zero) pixels are grouped with 8-connectivity. A
//! component's enclosed area counts its own pixels plus every background
//! pixel it surrounds, i.e. the area of its filled outer contour. Holes are
//! found with a 4-connected flood fill of the background, the dual of the
//! 8-connected foreground.

use std::collections::VecDeque;

use image::{GrayImage, Luma};

use crate::channels::Region;

/// One 8-connected foreground component.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Tight bounding box of the component's pixels.
    pub bbox: Region,
    /// Number of foreground pixels.
    pub pixels: usize,
    /// Row-major mask over `bbox`: component pixels plus enclosed holes.
    pub filled: Vec<bool>,
}

impl Component {
    /// Area enclosed by the component's outer contour.
    pub fn enclosed_area(&self) -> usize {
        self.filled.iter().filter(|&&f| f).count()
    }

    /// Paints the filled component with `value` onto `canvas`.
    pub fn paint(&self, canvas: &mut GrayImage, value: u8) {
        for r in 0..self.bbox.height {
            for c in 0..self.bbox.width {
                if self.filled[r * self.bbox.width + c] {
                    canvas.put_pixel((self.bbox.left + c) as u32, (self.bbox.top + r) as u32, Luma([value]));
                }
            }
        }
    }
}

const NEIGHBOURS_8: [(isize, isize); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
const NEIGHBOURS_4: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// All 8-connected components of `mask`, in raster order of their first pixel.
pub fn components(mask: &GrayImage) -> Vec<Component> {
    let (w, h) = (mask.width() as usize, mask.height() as usize);
    let src = mask.as_raw();
    let mut label = vec![0u32; w * h];
    let mut found = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..w * h {
        if src[start] == 0 || label[start] != 0 {
            continue;
        }
        let id = found.len() as u32 + 1;
        label[start] = id;
        queue.push_back(start);

        let mut members = Vec::new();
        let (mut top, mut left, mut bottom, mut right) = (h, w, 0, 0);
        while let Some(idx) = queue.pop_front() {
            let (r, c) = (idx / w, idx % w);
            top = top.min(r);
            bottom = bottom.max(r);
            left = left.min(c);
            right = right.max(c);
            members.push(idx);

            for (dr, dc) in NEIGHBOURS_8 {
                let (nr, nc) = (r as isize + dr, c as isize + dc);
                if nr < 0 || nc < 0 || nr >= h as isize || nc >= w as isize {
                    continue;
                }
                let n = nr as usize * w + nc as usize;
                if src[n] != 0 && label[n] == 0 {
                    label[n] = id;
                    queue.push_back(n);
                }
            }
        }

        let bbox = Region { top, left, height: bottom - top + 1, width: right - left + 1 };
        let filled = fill_holes(&bbox, &members, w);
        found.push(Component { bbox, pixels: members.len(), filled });
    }

    found
}

/// Component mask over `bbox` with enclosed background filled in.
fn fill_holes(bbox: &Region, members: &[usize], stride: usize) -> Vec<bool> {
    // Work on the bbox grown by a one-pixel background frame so the outside
    // is a single 4-connected region reachable from the corner.
    let (fw, fh) = (bbox.width + 2, bbox.height + 2);
    let mut inside = vec![false; fw * fh];
    for &idx in members {
        let (r, c) = (idx / stride - bbox.top + 1, idx % stride - bbox.left + 1);
        inside[r * fw + c] = true;
    }

    let mut outside = vec![false; fw * fh];
    let mut queue = VecDeque::from([0usize]);
    outside[0] = true;
    while let Some(idx) = queue.pop_front() {
        let (r, c) = (idx / fw, idx % fw);
        for (dr, dc) in NEIGHBOURS_4 {
            let (nr, nc) = (r as isize + dr, c as isize + dc);
            if nr < 0 || nc < 0 || nr >= fh as isize || nc >= fw as isize {
                continue;
            }
            let n = nr as usize * fw + nc as usize;
            if !inside[n] && !outside[n] {
                outside[n] = true;
                queue.push_back(n);
            }
        }
    }

    let mut filled = Vec::with_capacity(bbox.width * bbox.height);
    for r in 1..=bbox.height {
        for c in 1..=bbox.width {
            filled.push(!outside[r * fw + c]);
        }
    }
    filled
}

/// The component with the largest enclosed area. Ties keep the first in
/// raster order. `None` when the mask has no foreground.
pub fn largest_component(mask: &GrayImage) -> Option<Component> {
    let mut best: Option<Component> = None;
    for comp in components(mask) {
        let better = match &best {
            Some(b) => comp.enclosed_area() > b.enclosed_area(),
            None => true,
        };
        if better {
            best = Some(comp);
        }
    }
    best
}
