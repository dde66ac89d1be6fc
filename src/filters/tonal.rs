//! Logarithmic tone mapping.
//!
//! Maps `v` to `log(v + 1) * 255 / log(256)`, which lifts shadows and
//! compresses highlights while keeping 0 at 0 and 255 at 255.

use ndarray::{Array3, ArrayView3};

/// Build the 256-entry lookup table for the log transform.
pub fn log_lut() -> [u8; 256] {
    let denom = 256f64.ln();
    let mut lut = [0u8; 256];
    for (v, entry) in lut.iter_mut().enumerate() {
        let mapped = (v as f64 + 1.0).ln() / denom * 255.0;
        *entry = mapped.clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Apply the logarithmic transform to every channel.
///
/// # Arguments
/// * `input` - Image (height, width, channels) as u8
///
/// # Returns
/// Transformed image with the same shape
pub fn log_transform(input: ArrayView3<u8>) -> Array3<u8> {
    let lut = log_lut();
    let mut output = input.to_owned();
    output.par_mapv_inplace(|v| lut[v as usize]);
    output
}
