//! RGB to luminance conversion.
//!
//! Uses ITU-R BT.601 luma weights (0.299, 0.587, 0.114) evaluated in
//! 14-bit fixed point with round-half-up, so results are bit-exact across
//! platforms.

use ndarray::{Array2, ArrayView3, Zip};

/// BT.601 weights scaled by 2^14 (sum = 16384)
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Luminance of a single RGB pixel.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Convert an RGB u8 image to a single-channel luminance plane.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 3)
///
/// # Returns
/// 2D array of shape (height, width)
pub fn rgb_to_luma(input: ArrayView3<u8>) -> Array2<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array2::<u8>::zeros((height, width));

    Zip::indexed(&mut output).par_for_each(|(y, x), o| {
        *o = luminance(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
    });

    output
}
