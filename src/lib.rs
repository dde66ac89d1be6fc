//! filter_lab
//!
//! Five fixed image filters over in-memory RGB rasters, with optional
//! Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Every filter takes an RGB image of shape (height, width, 3) with `u8`
//! samples and returns a new array; the input is never modified.
//!
//! | Filter | Output |
//! |--------|--------|
//! | [`smoothing`] | (H, W, 3) - 5x5 Gaussian blur |
//! | [`sharpening`] | (H, W, 3) - 3x3 Laplacian sharpen |
//! | [`contrast_stretch`] | (H, W, 3) - 5th/95th percentile stretch |
//! | [`edge_detect`] | (H, W) - Sobel gradient magnitude |
//! | [`log_transform`] | (H, W, 3) - logarithmic tone curve |
//!
//! The raw functions assume valid input. [`Filter::apply`] and
//! [`Session`] validate first and report [`FilterError::InvalidInput`].

pub mod catalog;
pub mod error;
pub mod filters;
pub mod raster;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use catalog::Filter;
pub use error::FilterError;
pub use filters::{contrast_stretch, edge_detect, log_transform, sharpening, smoothing};
pub use raster::{GrayRaster, Raster, RgbRaster};
pub use session::{Rendered, Session};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::catalog::Filter;
    use crate::error::FilterError;
    use crate::filters;
    use crate::raster::{validate_rgb, Raster};

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Apply 5x5 Gaussian smoothing to an RGB u8 image.
    #[pyfunction]
    pub fn smoothing<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        validate_rgb(input)?;
        Ok(filters::smoothing(input).into_pyarray(py))
    }

    /// Apply the 3x3 sharpening kernel to an RGB u8 image.
    #[pyfunction]
    pub fn sharpening<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        validate_rgb(input)?;
        Ok(filters::sharpening(input).into_pyarray(py))
    }

    /// Stretch contrast between the 5th and 95th percentiles.
    ///
    /// Constant images are returned unchanged.
    #[pyfunction]
    pub fn contrast_stretch<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        validate_rgb(input)?;
        Ok(filters::contrast_stretch(input).into_pyarray(py))
    }

    /// Sobel edge magnitude. Returns a (height, width) array.
    #[pyfunction]
    pub fn edge_detect<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let input = image.as_array();
        validate_rgb(input)?;
        Ok(filters::edge_detect(input).into_pyarray(py))
    }

    /// Apply the logarithmic tone curve to an RGB u8 image.
    #[pyfunction]
    pub fn log_transform<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        validate_rgb(input)?;
        Ok(filters::log_transform(input).into_pyarray(py))
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Display names of all filters, in order.
    #[pyfunction]
    pub fn filter_names() -> Vec<&'static str> {
        Filter::ALL.iter().map(|f| f.name()).collect()
    }

    /// Apply a filter chosen by display name or slug.
    ///
    /// Returns a 3D array for colour filters and a 2D array for edge detection.
    #[pyfunction]
    pub fn apply_filter<'py>(
        py: Python<'py>,
        name: &str,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let filter = Filter::from_name(name)?;
        Ok(match filter.apply(image.as_array())? {
            Raster::Rgb(a) => a.into_pyarray(py).into_any(),
            Raster::Gray(a) => a.into_pyarray(py).into_any(),
        })
    }

    /// Python module definition
    #[pymodule]
    pub fn filter_lab(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(smoothing, m)?)?;
        m.add_function(wrap_pyfunction!(sharpening, m)?)?;
        m.add_function(wrap_pyfunction!(contrast_stretch, m)?)?;
        m.add_function(wrap_pyfunction!(edge_detect, m)?)?;
        m.add_function(wrap_pyfunction!(log_transform, m)?)?;

        m.add_function(wrap_pyfunction!(filter_names, m)?)?;
        m.add_function(wrap_pyfunction!(apply_filter, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::filter_lab;
