//! Sharpen filter.
//!
//! Correlates each channel with a fixed Laplacian-based 3x3 kernel and
//! saturates the result back to 0-255.

use ndarray::{Array2, Array3, ArrayView3, Axis};
use rayon::prelude::*;

use super::core::correlate_3x3;

/// Sharpening kernel:
///  0 -1  0
/// -1  5 -1
///  0 -1  0
pub const SHARPEN_KERNEL: [[i32; 3]; 3] = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

/// Apply the fixed 3x3 sharpening kernel.
///
/// Each channel is processed independently. Borders mirror the image
/// (REFLECT_101) so the output keeps the input dimensions.
///
/// # Arguments
/// * `input` - RGB image (height, width, 3) as u8
///
/// # Returns
/// Sharpened image with the same dimensions
pub fn sharpening(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    // One plane per task
    let responses: Vec<Array2<i32>> = (0..channels)
        .into_par_iter()
        .map(|c| correlate_3x3(input.index_axis(Axis(2), c), &SHARPEN_KERNEL))
        .collect();

    for (c, response) in responses.iter().enumerate() {
        output
            .index_axis_mut(Axis(2), c)
            .zip_mut_with(response, |o, &v| *o = v.clamp(0, 255) as u8);
    }

    output
}
