// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Boundary and edge maps of binary blobs.

use std::collections::VecDeque;

use image::{GrayImage, Luma};

use super::morphology::erode;
use crate::channels::Region;

/// Pixels of `blob` whose 3x3 neighbourhood leaves the blob.
pub fn inner_boundary(blob: &GrayImage) -> GrayImage {
    let shrunk = erode(blob, 3);
    GrayImage::from_fn(blob.width(), blob.height(), |x, y| {
        Luma([blob.get_pixel(x, y).0[0].saturating_sub(shrunk.get_pixel(x, y).0[0])])
    })
}

/// Edge map from the L1 Sobel gradient with hysteresis.
///
/// Pixels with gradient `>= high` seed edges; pixels with gradient `>= low`
/// join when 8-connected to a seed. Borders replicate the outermost pixel.
pub fn sobel_edges(gray: &GrayImage, low: f64, high: f64) -> GrayImage {
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    if w == 0 || h == 0 {
        return gray.clone();
    }
    let src = gray.as_raw();
    let at = |r: isize, c: isize| -> f64 {
        let r = r.clamp(0, h as isize - 1) as usize;
        let c = c.clamp(0, w as isize - 1) as usize;
        src[r * w + c] as f64
    };

    let mut magnitude = vec![0.0f64; w * h];
    for r in 0..h as isize {
        for c in 0..w as isize {
            let gx = (at(r - 1, c + 1) + 2.0 * at(r, c + 1) + at(r + 1, c + 1))
                - (at(r - 1, c - 1) + 2.0 * at(r, c - 1) + at(r + 1, c - 1));
            let gy = (at(r + 1, c - 1) + 2.0 * at(r + 1, c) + at(r + 1, c + 1))
                - (at(r - 1, c - 1) + 2.0 * at(r - 1, c) + at(r - 1, c + 1));
            magnitude[r as usize * w + c as usize] = gx.abs() + gy.abs();
        }
    }

    let mut edge = vec![0u8; w * h];
    let mut queue: VecDeque<usize> = VecDeque::new();
    for (i, &m) in magnitude.iter().enumerate() {
        if m >= high {
            edge[i] = 255;
            queue.push_back(i);
        }
    }
    while let Some(idx) = queue.pop_front() {
        let (r, c) = ((idx / w) as isize, (idx % w) as isize);
        for dr in -1..=1 {
            for dc in -1..=1 {
                let (nr, nc) = (r + dr, c + dc);
                if nr < 0 || nc < 0 || nr >= h as isize || nc >= w as isize {
                    continue;
                }
                let n = nr as usize * w + nc as usize;
                if edge[n] == 0 && magnitude[n] >= low {
                    edge[n] = 255;
                    queue.push_back(n);
                }
            }
        }
    }

    GrayImage::from_raw(w as u32, h as u32, edge).unwrap_or_else(|| GrayImage::new(w as u32, h as u32))
}

/// Sobel edges of the blob's inner boundary.
pub fn boundary_edges(blob: &GrayImage, low: f64, high: f64) -> GrayImage {
    sobel_edges(&inner_boundary(blob), low, high)
}

/// Inclusive bounding box of every non-zero pixel.
pub fn bounding_box(mask: &GrayImage) -> Option<Region> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, p) in mask.enumerate_pixels() {
        if p.0[0] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (y, x, y, x),
            Some((t, l, b, r)) => (t.min(y), l.min(x), b.max(y), r.max(x)),
        });
    }
    bounds.map(|(t, l, b, r)| Region {
        top: t as usize,
        left: l as usize,
        height: (b - t + 1) as usize,
        width: (r - l + 1) as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(w: u32, h: u32, region: Region) -> GrayImage {
        let pixel = |x: u32, y: u32| Region { top: y as usize, left: x as usize, height: 1, width: 1 };
        GrayImage::from_fn(w, h, |x, y| Luma([if region.contains(&pixel(x, y)) { 255 } else { 0 }]))
    }

    #[test]
    fn inner_boundary_is_one_pixel_ring() {
        let region = Region { top: 2, left: 3, height: 5, width: 6 };
        let ring = inner_boundary(&block(12, 10, region));
        let lit = ring.pixels().filter(|p| p.0[0] == 255).count();
        assert_eq!(lit, 2 * 6 + 2 * 3);
        assert_eq!(ring.get_pixel(3, 2).0[0], 255);
        assert_eq!(ring.get_pixel(5, 4).0[0], 0);
        assert_eq!(bounding_box(&ring), Some(region));
    }

    #[test]
    fn sobel_edges_straddle_the_boundary() {
        let region = Region { top: 4, left: 4, height: 6, width: 6 };
        let edges = sobel_edges(&block(16, 16, region), 100.0, 200.0);
        let bbox = bounding_box(&edges).unwrap();
        assert_eq!(bbox, Region { top: 3, left: 3, height: 8, width: 8 });
        // Interior of a flat blob carries no gradient.
        assert_eq!(edges.get_pixel(6, 6).0[0], 0);
    }

    #[test]
    fn weak_gradient_alone_is_not_an_edge() {
        let faint = GrayImage::from_fn(8, 8, |x, _| Luma([if x < 4 { 0 } else { 30 }]));
        assert!(bounding_box(&sobel_edges(&faint, 100.0, 200.0)).is_none());
    }

    #[test]
    fn empty_mask_has_no_box() {
        assert_eq!(bounding_box(&GrayImage::new(4, 4)), None);
    }
}
