//! Gaussian smoothing.
//!
//! Separable 2-pass convolution over RGB images. Each channel is blurred
//! independently with the same kernel.

use ndarray::{Array3, ArrayView3};

use super::core::{convolve_separable_u8, gaussian_kernel_1d};

/// Kernel size used by [`smoothing`].
pub const SMOOTHING_KERNEL_SIZE: usize = 5;

/// Apply the fixed 5x5 Gaussian smoothing filter.
///
/// Sigma is derived from the kernel size, which for a 5-tap kernel
/// yields the binomial weights `[1, 4, 6, 4, 1] / 16`.
///
/// # Arguments
/// * `input` - RGB image (height, width, 3) as u8
///
/// # Returns
/// Blurred image with the same dimensions
pub fn smoothing(input: ArrayView3<u8>) -> Array3<u8> {
    gaussian_blur_u8(input, SMOOTHING_KERNEL_SIZE, 0.0)
}

/// Apply Gaussian blur with an explicit kernel size and sigma.
///
/// # Arguments
/// * `input` - Image (height, width, channels) as u8
/// * `kernel_size` - Taps per axis; even sizes are rounded up to the next odd one
/// * `sigma` - Standard deviation; `<= 0` derives it from `kernel_size`
///
/// # Returns
/// Blurred image with the same dimensions
pub fn gaussian_blur_u8(input: ArrayView3<u8>, kernel_size: usize, sigma: f64) -> Array3<u8> {
    let kernel = gaussian_kernel_1d(kernel_size, sigma);
    convolve_separable_u8(input, &kernel, &kernel)
}
