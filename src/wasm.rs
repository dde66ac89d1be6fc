//! WebAssembly exports for the filter set.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Buffer Layout
//!
//! Inputs are flat interleaved RGB bytes (length = width * height * 3),
//! row-major. Colour filters return the same layout; edge detection
//! returns one byte per pixel (length = width * height).

use ndarray::ArrayView3;
use wasm_bindgen::prelude::*;

use crate::catalog::Filter;
use crate::filters::{contrast_stretch, edge_detect, log_transform, sharpening, smoothing};
use crate::raster::{validate_rgb, Raster};

fn rgb_view(data: &[u8], width: usize, height: usize) -> Result<ArrayView3<'_, u8>, JsError> {
    let view = ArrayView3::from_shape((height, width, 3), data)
        .map_err(|e| JsError::new(&format!("buffer does not match {width}x{height} RGB: {e}")))?;
    validate_rgb(view).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(view)
}

/// Apply 5x5 Gaussian smoothing.
#[wasm_bindgen]
pub fn smoothing_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let input = rgb_view(data, width, height)?;
    Ok(smoothing(input).into_raw_vec_and_offset().0)
}

/// Apply the 3x3 sharpening kernel.
#[wasm_bindgen]
pub fn sharpening_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let input = rgb_view(data, width, height)?;
    Ok(sharpening(input).into_raw_vec_and_offset().0)
}

/// Stretch contrast between the 5th and 95th percentiles.
#[wasm_bindgen]
pub fn contrast_stretch_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let input = rgb_view(data, width, height)?;
    Ok(contrast_stretch(input).into_raw_vec_and_offset().0)
}

/// Sobel edge magnitude, one byte per pixel.
#[wasm_bindgen]
pub fn edge_detect_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let input = rgb_view(data, width, height)?;
    Ok(edge_detect(input).into_raw_vec_and_offset().0)
}

/// Apply the logarithmic tone curve.
#[wasm_bindgen]
pub fn log_transform_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let input = rgb_view(data, width, height)?;
    Ok(log_transform(input).into_raw_vec_and_offset().0)
}

/// Display names of all filters, in order.
#[wasm_bindgen]
pub fn filter_names_wasm() -> Vec<String> {
    Filter::ALL.iter().map(|f| f.name().to_string()).collect()
}

/// Apply a filter chosen by display name or slug.
///
/// Check the returned length against `width * height` to tell a
/// grayscale result from an RGB one.
#[wasm_bindgen]
pub fn apply_filter_wasm(name: &str, data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let filter = Filter::from_name(name).map_err(|e| JsError::new(&e.to_string()))?;
    let input = rgb_view(data, width, height)?;
    let output = filter.apply(input).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(match output {
        Raster::Rgb(a) => a.into_raw_vec_and_offset().0,
        Raster::Gray(a) => a.into_raw_vec_and_offset().0,
    })
}
