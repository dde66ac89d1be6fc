//! Core utilities for image processing filters.
//!
//! This module provides shared functionality used by multiple filters:
//! - Gaussian kernel generation with the automatic sigma policy
//! - REFLECT_101 border index mapping
//! - Separable and 3x3 correlation over u8 planes
//! - Saturating float to u8 conversion

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Zip};

/// Fixed binomial taps used for small kernels when sigma is automatic.
const SMALL_GAUSSIAN_TAPS: [&[f64]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Sigma derived from the kernel size when the caller passes `sigma <= 0`.
pub fn auto_sigma(kernel_size: usize) -> f64 {
    0.3 * ((kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Generate a normalized 1D Gaussian kernel.
///
/// # Arguments
/// * `kernel_size` - Number of taps; even sizes are rounded up to the next odd one
/// * `sigma` - Standard deviation; `<= 0` derives it from `kernel_size`
///
/// # Returns
/// Kernel taps summing to 1.0
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f64) -> Vec<f64> {
    let kernel_size = kernel_size | 1;

    if sigma <= 0.0 && kernel_size <= 7 {
        return SMALL_GAUSSIAN_TAPS[kernel_size / 2].to_vec();
    }

    let sigma = if sigma > 0.0 { sigma } else { auto_sigma(kernel_size) };
    let half = (kernel_size / 2) as f64;

    let mut kernel: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    // Normalize
    let sum: f64 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Map a possibly out-of-range coordinate into `0..len` by mirroring
/// about the edge pixel without repeating it (`gfedcb|abcdefgh|gfedcba`).
#[inline]
pub fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let period = 2 * last;
    let mut i = i.rem_euclid(period);
    if i > last {
        i = period - i;
    }
    i as usize
}

/// Round to nearest and saturate into the u8 range.
#[inline]
pub fn saturate_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Apply a separable kernel to every channel of a u8 image.
///
/// The horizontal pass runs first into an f64 buffer, the vertical pass
/// reads from it. Borders use REFLECT_101. The result is rounded and
/// saturated back to u8.
pub fn convolve_separable_u8(input: ArrayView3<u8>, kernel_x: &[f64], kernel_y: &[f64]) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let half_x = (kernel_x.len() / 2) as isize;
    let half_y = (kernel_y.len() / 2) as isize;

    // Horizontal pass
    let mut temp = Array3::<f64>::zeros((height, width, channels));
    Zip::indexed(&mut temp).par_for_each(|(y, x, c), t| {
        let mut sum = 0.0f64;
        for (ki, &kv) in kernel_x.iter().enumerate() {
            let sx = reflect_101(x as isize + ki as isize - half_x, width);
            sum += input[[y, sx, c]] as f64 * kv;
        }
        *t = sum;
    });

    // Vertical pass
    let mut output = Array3::<u8>::zeros((height, width, channels));
    Zip::indexed(&mut output).par_for_each(|(y, x, c), o| {
        let mut sum = 0.0f64;
        for (ki, &kv) in kernel_y.iter().enumerate() {
            let sy = reflect_101(y as isize + ki as isize - half_y, height);
            sum += temp[[sy, x, c]] * kv;
        }
        *o = saturate_u8(sum);
    });

    output
}

/// Correlate a single u8 plane with an integer 3x3 kernel.
///
/// No flipping is applied (correlation, not convolution). Borders use
/// REFLECT_101. The result is exact and unclamped.
pub fn correlate_3x3(plane: ArrayView2<u8>, kernel: &[[i32; 3]; 3]) -> Array2<i32> {
    let (height, width) = plane.dim();
    let mut output = Array2::<i32>::zeros((height, width));

    Zip::indexed(&mut output).par_for_each(|(y, x), o| {
        let mut sum = 0i32;
        for (ky, row) in kernel.iter().enumerate() {
            let py = reflect_101(y as isize + ky as isize - 1, height);
            for (kx, &kv) in row.iter().enumerate() {
                if kv == 0 {
                    continue;
                }
                let px = reflect_101(x as isize + kx as isize - 1, width);
                sum += plane[[py, px]] as i32 * kv;
            }
        }
        *o = sum;
    });

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_kernel_5_auto_sigma_is_binomial() {
        let k = gaussian_kernel_1d(5, 0.0);
        assert_eq!(k, vec![0.0625, 0.25, 0.375, 0.25, 0.0625]);
    }

    #[test]
    fn test_gaussian_kernel_large_is_normalized_and_symmetric() {
        let k = gaussian_kernel_1d(9, 0.0);
        let sum: f64 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        for i in 0..4 {
            assert!((k[i] - k[8 - i]).abs() < 1e-12);
        }
        assert!(k[4] > k[3]);
    }

    #[test]
    fn test_gaussian_kernel_even_size_rounds_up() {
        assert_eq!(gaussian_kernel_1d(4, 0.0), gaussian_kernel_1d(5, 0.0));
        assert_eq!(gaussian_kernel_1d(8, 1.5).len(), 9);
        assert_eq!(gaussian_kernel_1d(0, 0.0), vec![1.0]);
    }

    #[test]
    fn test_auto_sigma_for_size_5() {
        assert!((auto_sigma(5) - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_reflect_101() {
        // gfedcb|abcdefgh|gfedcba
        assert_eq!(reflect_101(-1, 8), 1);
        assert_eq!(reflect_101(-2, 8), 2);
        assert_eq!(reflect_101(0, 8), 0);
        assert_eq!(reflect_101(7, 8), 7);
        assert_eq!(reflect_101(8, 8), 6);
        assert_eq!(reflect_101(9, 8), 5);
        assert_eq!(reflect_101(-1, 1), 0);
        assert_eq!(reflect_101(2, 2), 0);
    }

    #[test]
    fn test_correlate_identity_kernel() {
        let plane = Array2::from_shape_fn((4, 5), |(y, x)| (y * 10 + x) as u8);
        let identity = [[0, 0, 0], [0, 1, 0], [0, 0, 0]];
        let out = correlate_3x3(plane.view(), &identity);
        for ((y, x), &v) in out.indexed_iter() {
            assert_eq!(v, plane[[y, x]] as i32);
        }
    }

    #[test]
    fn test_correlate_does_not_flip_kernel() {
        // An impulse picks up the kernel mirrored under correlation.
        let mut plane = Array2::<u8>::zeros((5, 5));
        plane[[2, 2]] = 1;
        let kernel = [[1, 2, 3], [4, 5, 6], [7, 8, 9]];
        let out = correlate_3x3(plane.view(), &kernel);
        assert_eq!(out[[1, 1]], 9);
        assert_eq!(out[[3, 3]], 1);
        assert_eq!(out[[1, 3]], 7);
        assert_eq!(out[[2, 2]], 5);
    }

    #[test]
    fn test_saturate_u8() {
        assert_eq!(saturate_u8(-3.0), 0);
        assert_eq!(saturate_u8(255.6), 255);
        assert_eq!(saturate_u8(127.5), 128);
        assert_eq!(saturate_u8(127.4), 127);
    }
}
