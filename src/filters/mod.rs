//! Filter modules for the five fixed image transforms.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGB8 | (H, W, 3) | u8 | Input to every filter |
//! | Grayscale8 | (H, W) | u8 | Output of edge detection |
//!
//! Intermediate results use wider types (i32 for integer kernels, f64 for
//! Gaussian and magnitude arithmetic) and are saturated back to u8.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Pure** - input is borrowed as an `ArrayView3`, output is a new array
//! - **Same-size** - borders are mirrored (REFLECT_101), never cropped
//! - **Saturated** - every returned sample is in 0-255
//! - **Thread-safe** - per-pixel work is spread with rayon via ndarray's `Zip`
//!
//! The functions here do not validate their input; see
//! [`crate::raster::validate_rgb`].

pub mod core;
pub mod blur;
pub mod sharpen;
pub mod levels;
pub mod grayscale;
pub mod edge;
pub mod tonal;

pub use blur::smoothing;
pub use edge::edge_detect;
pub use levels::{contrast_stretch, contrast_stretch_percentiles, try_contrast_stretch};
pub use sharpen::sharpening;
pub use tonal::log_transform;
