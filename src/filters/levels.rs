//! Percentile-based contrast stretching.
//!
//! The low and high percentiles are taken over every sample of the image
//! with all channels pooled, then each sample is remapped linearly so the
//! low percentile lands on 0 and the high percentile on 255.

use ndarray::{Array3, ArrayView3};
use tracing::{debug, warn};

use crate::error::{FilterError, Result};

/// Default lower percentile for [`contrast_stretch`].
pub const LOW_PERCENTILE: f64 = 5.0;
/// Default upper percentile for [`contrast_stretch`].
pub const HIGH_PERCENTILE: f64 = 95.0;

/// Build a histogram of all samples across all channels.
pub fn compute_histogram_u8(input: ArrayView3<u8>) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for &v in input.iter() {
        hist[v as usize] += 1;
    }
    hist
}

/// Value of the `k`-th smallest sample (0-based).
fn kth_smallest(hist: &[u64; 256], k: u64) -> u8 {
    let mut seen = 0u64;
    for (value, &count) in hist.iter().enumerate() {
        seen += count;
        if seen > k {
            return value as u8;
        }
    }
    255
}

/// Percentile of the histogram with linear interpolation between
/// neighbouring order statistics (rank `pct / 100 * (n - 1)`).
///
/// Returns 0.0 for an empty histogram.
pub fn find_percentile(hist: &[u64; 256], pct: f64) -> f64 {
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (total - 1) as f64;
    let below = rank.floor() as u64;
    let frac = rank - below as f64;

    let a = kth_smallest(hist, below) as f64;
    let b = kth_smallest(hist, (below + 1).min(total - 1)) as f64;
    a + (b - a) * frac
}

/// Low and high percentile of an image, all channels pooled.
pub fn percentile_range(input: ArrayView3<u8>, low_pct: f64, high_pct: f64) -> (f64, f64) {
    let hist = compute_histogram_u8(input);
    (find_percentile(&hist, low_pct), find_percentile(&hist, high_pct))
}

/// Stretch contrast between explicit percentiles.
///
/// # Arguments
/// * `input` - Image (height, width, channels) as u8
/// * `low_pct` - Percentile mapped to 0 (0.0-100.0)
/// * `high_pct` - Percentile mapped to 255 (0.0-100.0)
///
/// # Errors
/// [`FilterError::DegenerateRange`] when the high percentile does not
/// exceed the low one, e.g. for a constant image.
pub fn try_contrast_stretch_percentiles(
    input: ArrayView3<u8>,
    low_pct: f64,
    high_pct: f64,
) -> Result<Array3<u8>> {
    let (lo, hi) = percentile_range(input, low_pct, high_pct);
    if hi <= lo {
        return Err(FilterError::DegenerateRange { lo, hi });
    }
    debug!(lo, hi, "contrast stretch range");

    let scale = 255.0 / (hi - lo);
    let mut lut = [0u8; 256];
    for (v, entry) in lut.iter_mut().enumerate() {
        *entry = ((v as f64 - lo) * scale).clamp(0.0, 255.0) as u8;
    }

    let mut output = input.to_owned();
    output.par_mapv_inplace(|v| lut[v as usize]);
    Ok(output)
}

/// Stretch contrast between the 5th and 95th percentiles.
///
/// # Errors
/// [`FilterError::DegenerateRange`] for images whose percentile spread is zero.
pub fn try_contrast_stretch(input: ArrayView3<u8>) -> Result<Array3<u8>> {
    try_contrast_stretch_percentiles(input, LOW_PERCENTILE, HIGH_PERCENTILE)
}

/// Stretch contrast between explicit percentiles.
///
/// When the spread is zero there is nothing to stretch and an unchanged
/// copy of the input is returned.
pub fn contrast_stretch_percentiles(input: ArrayView3<u8>, low_pct: f64, high_pct: f64) -> Array3<u8> {
    match try_contrast_stretch_percentiles(input, low_pct, high_pct) {
        Ok(output) => output,
        Err(err) => {
            warn!(%err, "returning input unchanged");
            input.to_owned()
        }
    }
}

/// Stretch contrast between the 5th and 95th percentiles.
///
/// Constant images come back unchanged, see [`contrast_stretch_percentiles`].
pub fn contrast_stretch(input: ArrayView3<u8>) -> Array3<u8> {
    contrast_stretch_percentiles(input, LOW_PERCENTILE, HIGH_PERCENTILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates_like_linear_method() {
        // 0..=99, one sample each: p5 = 4.95, p95 = 94.05
        let img = Array3::from_shape_fn((1, 100, 1), |(_, x, _)| x as u8);
        let (lo, hi) = percentile_range(img.view(), 5.0, 95.0);
        assert!((lo - 4.95).abs() < 1e-9, "lo = {lo}");
        assert!((hi - 94.05).abs() < 1e-9, "hi = {hi}");
    }

    #[test]
    fn test_percentile_extremes() {
        let img = Array3::from_shape_fn((2, 2, 3), |(y, x, c)| (y * 100 + x * 10 + c) as u8);
        let hist = compute_histogram_u8(img.view());
        assert_eq!(find_percentile(&hist, 0.0), 0.0);
        assert_eq!(find_percentile(&hist, 100.0), 112.0);
    }

    #[test]
    fn test_percentile_empty_histogram() {
        assert_eq!(find_percentile(&[0u64; 256], 50.0), 0.0);
    }

    #[test]
    fn test_constant_image_is_degenerate() {
        let img = Array3::from_elem((10, 10, 3), 100u8);

        match try_contrast_stretch(img.view()) {
            Err(FilterError::DegenerateRange { lo, hi }) => {
                assert_eq!(lo, 100.0);
                assert_eq!(hi, 100.0);
            }
            other => panic!("expected DegenerateRange, got {other:?}"),
        }

        // The infallible version falls back to an unchanged copy, every time.
        assert_eq!(contrast_stretch(img.view()), img);
        assert_eq!(contrast_stretch(img.view()), img);
    }

    #[test]
    fn test_full_range_image_is_unchanged() {
        // 18 zeros and 18 full-white samples pin p5 = 0 and p95 = 255.
        let img = Array3::from_shape_fn((10, 10, 3), |(y, x, _)| {
            let p = y * 10 + x;
            match p {
                0..=5 => 0,
                94..=99 => 255,
                _ => (p * 2 + 40) as u8,
            }
        });
        let result = contrast_stretch(img.view());
        assert_eq!(result, img);
    }

    #[test]
    fn test_stretch_expands_narrow_range() {
        // Values 100..=199 spread over a 10x10 single-channel image
        let img = Array3::from_shape_fn((10, 10, 1), |(y, x, _)| (100 + y * 10 + x) as u8);
        let result = contrast_stretch(img.view());

        // Below p5 clips to 0, above p95 clips to 255
        assert_eq!(result[[0, 0, 0]], 0);
        assert_eq!(result[[9, 9, 0]], 255);
        // Monotonic in the input
        let flat: Vec<u8> = result.iter().copied().collect();
        assert!(flat.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_explicit_percentiles() {
        let img = Array3::from_shape_fn((1, 52, 1), |(_, x, _)| x as u8);
        let result = try_contrast_stretch_percentiles(img.view(), 0.0, 100.0).unwrap();
        // lo = 0, hi = 51: v * 5
        assert_eq!(result[[0, 51, 0]], 255);
        assert_eq!(result[[0, 10, 0]], 50);
        assert_eq!(result[[0, 0, 0]], 0);

        assert_eq!(contrast_stretch_percentiles(img.view(), 0.0, 100.0), result);
    }

    #[test]
    fn test_explicit_percentiles_equal_bounds_fall_back() {
        let img = Array3::from_shape_fn((1, 52, 1), |(_, x, _)| x as u8);
        assert!(try_contrast_stretch_percentiles(img.view(), 50.0, 50.0).is_err());
        assert_eq!(contrast_stretch_percentiles(img.view(), 50.0, 50.0), img);
    }
}
