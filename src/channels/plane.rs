// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Row-major float planes and rectangular regions.
//!
//! A [`Plane`] holds one image channel, one magnitude or phase spectrum, or
//! one decoder residual. All of them share the same `width * height` layout
//! so they can be cropped and compared without reshaping.

/// Row-major 2D array of `f64` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
}

impl Plane {
    /// Plane of the given size filled with `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Plane { width, height, data: vec![value; width * height] }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Panics
    /// If `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), width * height, "plane buffer does not match {width}x{height}");
        Plane { width, height, data }
    }

    /// `(height, width)`, the order used for carrier/secret shape arithmetic.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.width + col] = value;
    }

    /// Arithmetic mean of all samples (0.0 for an empty plane).
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// `(min, max)` over all samples. An empty plane yields `(0.0, 0.0)`.
    pub fn min_max(&self) -> (f64, f64) {
        if self.data.is_empty() {
            return (0.0, 0.0);
        }
        self.data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
    }

    /// Copy of the samples inside `region`.
    ///
    /// # Panics
    /// If `region` extends past the plane.
    pub fn crop(&self, region: &Region) -> Plane {
        assert!(
            region.bottom() <= self.height && region.right() <= self.width,
            "crop {region:?} outside {}x{} plane",
            self.width,
            self.height
        );
        let mut data = Vec::with_capacity(region.width * region.height);
        for row in region.top..region.bottom() {
            let start = row * self.width + region.left;
            data.extend_from_slice(&self.data[start..start + region.width]);
        }
        Plane { width: region.width, height: region.height, data }
    }

    /// Apply `f` to every sample, returning a new plane.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Plane {
        Plane {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

/// Axis-aligned rectangle in row/column coordinates. `bottom()` and
/// `right()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: usize,
    pub left: usize,
    pub height: usize,
    pub width: usize,
}

impl Region {
    pub fn bottom(&self) -> usize {
        self.top + self.height
    }

    pub fn right(&self) -> usize {
        self.left + self.width
    }

    /// True if `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Region) -> bool {
        other.top >= self.top
            && other.left >= self.left
            && other.bottom() <= self.bottom()
            && other.right() <= self.right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_extracts_rows_and_columns() {
        let plane = Plane::from_vec(4, 3, (0..12).map(|v| v as f64).collect());
        let cropped = plane.crop(&Region { top: 1, left: 1, height: 2, width: 2 });
        assert_eq!(cropped.shape(), (2, 2));
        assert_eq!(cropped.data, vec![5.0, 6.0, 9.0, 10.0]);
    }

    #[test]
    fn mean_and_extrema() {
        let plane = Plane::from_vec(2, 2, vec![-1.0, 3.0, 2.0, 0.0]);
        assert_eq!(plane.mean(), 1.0);
        assert_eq!(plane.min_max(), (-1.0, 3.0));
    }

    #[test]
    fn region_containment() {
        let outer = Region { top: 10, left: 10, height: 20, width: 20 };
        assert!(outer.contains(&Region { top: 10, left: 12, height: 20, width: 18 }));
        assert!(!outer.contains(&Region { top: 9, left: 12, height: 5, width: 5 }));
        assert!(!outer.contains(&Region { top: 12, left: 12, height: 5, width: 19 }));
    }

    #[test]
    #[should_panic]
    fn crop_out_of_bounds_panics() {
        let plane = Plane::filled(4, 4, 0.0);
        plane.crop(&Region { top: 2, left: 2, height: 3, width: 1 });
    }
}
