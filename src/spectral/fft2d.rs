// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! 2D FFT/IFFT over row-major `f64` planes.
//!
//! - Radix-2 Cooley-Tukey for power-of-2 sizes
//! - Bluestein's chirp-z transform for arbitrary sizes
//!
//! Columns use gather-FFT-scatter with a single column buffer instead of a
//! transposed copy. Twiddle tables and Bluestein plans are built once per
//! length and direction and reused for every row and column.
//!
//! Spectra are kept in `f64`: the payload is a few thousand units riding on
//! chroma spectra whose DC term reaches ~1e8, which `f32` cannot resolve.

use num_complex::Complex64;
use std::f64::consts::PI;

/// 2D complex spectrum, row-major, unshifted (DC at index 0).
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum2D {
    pub data: Vec<Complex64>,
    pub width: usize,
    pub height: usize,
}

// ──────────────────────────────────────────────────────────────────────────
// 1D plans
// ──────────────────────────────────────────────────────────────────────────

/// Twiddle factors `exp(sign * i * pi * k / (n/2))` for a radix-2 length `n`.
struct Radix2Plan {
    n: usize,
    twiddles: Vec<Complex64>,
}

impl Radix2Plan {
    fn new(n: usize, sign: f64) -> Self {
        debug_assert!(n.is_power_of_two());
        let half = n / 2;
        let twiddles = (0..half)
            .map(|k| Complex64::from_polar(1.0, sign * 2.0 * PI * k as f64 / n as f64))
            .collect();
        Radix2Plan { n, twiddles }
    }

    /// In-place radix-2 FFT. `data.len()` must equal `self.n`.
    fn execute(&self, data: &mut [Complex64]) {
        let n = data.len();
        debug_assert_eq!(n, self.n);
        if n <= 1 {
            return;
        }

        // Bit-reversal permutation
        let mut j = 0usize;
        for i in 1..n {
            let mut bit = n >> 1;
            while j & bit != 0 {
                j ^= bit;
                bit >>= 1;
            }
            j ^= bit;
            if i < j {
                data.swap(i, j);
            }
        }

        // Butterfly stages; stage `len` uses every (n/len)-th twiddle.
        let mut len = 2;
        while len <= n {
            let half = len / 2;
            let stride = n / len;
            for start in (0..n).step_by(len) {
                for k in 0..half {
                    let w = self.twiddles[k * stride];
                    let u = data[start + k];
                    let v = data[start + k + half] * w;
                    data[start + k] = u + v;
                    data[start + k + half] = u - v;
                }
            }
            len <<= 1;
        }
    }
}

/// Precomputed Bluestein chirp factors and FFT(b) for a given (n, sign).
struct BluesteinPlan {
    n: usize,
    chirp: Vec<Complex64>,
    b_hat: Vec<Complex64>,
    forward: Radix2Plan,
    inverse: Radix2Plan,
}

impl BluesteinPlan {
    fn new(n: usize, sign: f64) -> Self {
        let m = (2 * n - 1).next_power_of_two();
        let forward = Radix2Plan::new(m, -1.0);
        let inverse = Radix2Plan::new(m, 1.0);

        // w_k = exp(sign * i * pi * k^2 / n); k^2 reduced mod 2n keeps the angle small.
        let chirp: Vec<Complex64> = (0..n)
            .map(|k| {
                let k2 = (k as u128 * k as u128 % (2 * n as u128)) as f64;
                Complex64::from_polar(1.0, sign * PI * k2 / n as f64)
            })
            .collect();

        // b[k] = conj(chirp[k]), wrapped for negative indices, zero-padded
        let mut b = vec![Complex64::new(0.0, 0.0); m];
        b[0] = chirp[0].conj();
        for k in 1..n {
            b[k] = chirp[k].conj();
            b[m - k] = chirp[k].conj();
        }
        forward.execute(&mut b);

        BluesteinPlan { n, chirp, b_hat: b, forward, inverse }
    }

    fn execute(&self, data: &mut [Complex64]) {
        debug_assert_eq!(data.len(), self.n);
        let m = self.b_hat.len();

        let mut a = vec![Complex64::new(0.0, 0.0); m];
        for k in 0..self.n {
            a[k] = data[k] * self.chirp[k];
        }

        self.forward.execute(&mut a);
        for (x, b) in a.iter_mut().zip(&self.b_hat) {
            *x = *x * *b;
        }
        self.inverse.execute(&mut a);

        let inv_m = 1.0 / m as f64;
        for k in 0..self.n {
            data[k] = a[k] * inv_m * self.chirp[k];
        }
    }
}

/// 1D transform of fixed length and direction.
enum Plan1D {
    Trivial,
    Radix2(Radix2Plan),
    Bluestein(BluesteinPlan),
}

impl Plan1D {
    fn new(n: usize, sign: f64) -> Self {
        if n <= 1 {
            Plan1D::Trivial
        } else if n.is_power_of_two() {
            Plan1D::Radix2(Radix2Plan::new(n, sign))
        } else {
            Plan1D::Bluestein(BluesteinPlan::new(n, sign))
        }
    }

    fn execute(&self, data: &mut [Complex64]) {
        match self {
            Plan1D::Trivial => {}
            Plan1D::Radix2(p) => p.execute(data),
            Plan1D::Bluestein(p) => p.execute(data),
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────
// 2D transforms
// ──────────────────────────────────────────────────────────────────────────

fn transform_2d(data: &mut [Complex64], width: usize, height: usize, sign: f64) {
    let row_plan = Plan1D::new(width, sign);
    let col_plan = Plan1D::new(height, sign);

    for row in data.chunks_exact_mut(width) {
        row_plan.execute(row);
    }

    let mut col_buf = vec![Complex64::new(0.0, 0.0); height];
    for col in 0..width {
        for r in 0..height {
            col_buf[r] = data[r * width + col];
        }
        col_plan.execute(&mut col_buf);
        for r in 0..height {
            data[r * width + col] = col_buf[r];
        }
    }
}

/// Real-valued pixel array -> unnormalized 2D complex spectrum.
///
/// # Panics
/// If `pixels.len() != width * height`.
pub fn fft2d(pixels: &[f64], width: usize, height: usize) -> Spectrum2D {
    assert_eq!(pixels.len(), width * height);
    let mut data: Vec<Complex64> = pixels.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    if !data.is_empty() {
        transform_2d(&mut data, width, height, -1.0);
    }
    Spectrum2D { data, width, height }
}

/// Inverse 2D FFT normalized by `1/(width*height)`, keeping the complex result.
pub fn ifft2d_complex(spectrum: &Spectrum2D) -> Spectrum2D {
    let (width, height) = (spectrum.width, spectrum.height);
    let mut data = spectrum.data.clone();
    if !data.is_empty() {
        transform_2d(&mut data, width, height, 1.0);
        let norm = 1.0 / (width * height) as f64;
        for v in data.iter_mut() {
            *v *= norm;
        }
    }
    Spectrum2D { data, width, height }
}

/// Inverse 2D FFT, real part only.
pub fn ifft2d(spectrum: &Spectrum2D) -> Vec<f64> {
    ifft2d_complex(spectrum).data.into_iter().map(|c| c.re).collect()
}
