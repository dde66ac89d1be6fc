//! Raster types and the decode/encode boundary.
//!
//! Filters operate on plain `ndarray` arrays. This module names those
//! arrays, validates them, and converts between them and encoded image
//! bytes via the `image` crate.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use ndarray::{Array2, Array3, ArrayView3};
use tracing::{debug, instrument};

use crate::error::{FilterError, Result};

/// Interleaved RGB image of shape (height, width, 3).
pub type RgbRaster = Array3<u8>;

/// Single-channel image of shape (height, width).
pub type GrayRaster = Array2<u8>;

/// Output of a filter: either a colour or a grayscale raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raster {
    Rgb(RgbRaster),
    Gray(GrayRaster),
}

impl Raster {
    /// Height and width in pixels.
    pub fn dim(&self) -> (usize, usize) {
        match self {
            Raster::Rgb(a) => (a.dim().0, a.dim().1),
            Raster::Gray(a) => a.dim(),
        }
    }

    /// Number of channels per pixel (3 or 1).
    pub fn channels(&self) -> usize {
        match self {
            Raster::Rgb(_) => 3,
            Raster::Gray(_) => 1,
        }
    }

    /// Channel interpretation a renderer should use.
    pub fn mode(&self) -> &'static str {
        match self {
            Raster::Rgb(_) => "RGB",
            Raster::Gray(_) => "GRAY",
        }
    }

    pub fn as_rgb(&self) -> Option<&RgbRaster> {
        match self {
            Raster::Rgb(a) => Some(a),
            Raster::Gray(_) => None,
        }
    }

    pub fn as_gray(&self) -> Option<&GrayRaster> {
        match self {
            Raster::Gray(a) => Some(a),
            Raster::Rgb(_) => None,
        }
    }

    /// Convert into an `image` buffer, picking RGB or Luma by channel count.
    pub fn to_dynamic(&self) -> Result<DynamicImage> {
        let (height, width) = self.dim();
        let shape_err = || FilterError::InvalidInput {
            shape: match self {
                Raster::Rgb(a) => a.shape().to_vec(),
                Raster::Gray(a) => a.shape().to_vec(),
            },
        };
        let (w, h) = (
            u32::try_from(width).map_err(|_| shape_err())?,
            u32::try_from(height).map_err(|_| shape_err())?,
        );

        match self {
            Raster::Rgb(a) => {
                let raw: Vec<u8> = a.iter().copied().collect();
                RgbImage::from_raw(w, h, raw)
                    .map(DynamicImage::ImageRgb8)
                    .ok_or_else(shape_err)
            }
            Raster::Gray(a) => {
                let raw: Vec<u8> = a.iter().copied().collect();
                GrayImage::from_raw(w, h, raw)
                    .map(DynamicImage::ImageLuma8)
                    .ok_or_else(shape_err)
            }
        }
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.to_dynamic()?
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(FilterError::Encode)?;
        Ok(buf)
    }

    /// Write to a file; the format follows the path's extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), mode = self.mode()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_dynamic()?
            .save(path.as_ref())
            .map_err(FilterError::Encode)?;
        debug!("raster saved");
        Ok(())
    }
}

impl From<RgbRaster> for Raster {
    fn from(a: RgbRaster) -> Self {
        Raster::Rgb(a)
    }
}

impl From<GrayRaster> for Raster {
    fn from(a: GrayRaster) -> Self {
        Raster::Gray(a)
    }
}

/// Check that a view is a non-empty (height, width, 3) raster.
pub fn validate_rgb(input: ArrayView3<u8>) -> Result<()> {
    let (height, width, channels) = input.dim();
    if height == 0 || width == 0 || channels != 3 {
        return Err(FilterError::InvalidInput {
            shape: input.shape().to_vec(),
        });
    }
    Ok(())
}

/// Wrap an `image` RGB buffer as a raster.
pub fn from_rgb_image(image: RgbImage) -> Result<RgbRaster> {
    let (width, height) = image.dimensions();
    let shape = (height as usize, width as usize, 3);
    Array3::from_shape_vec(shape, image.into_raw()).map_err(|_| FilterError::InvalidInput {
        shape: vec![shape.0, shape.1, shape.2],
    })
}

/// Decode JPEG or PNG bytes into an RGB raster. Alpha is dropped.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_rgb(data: &[u8]) -> Result<RgbRaster> {
    let image = image::load_from_memory(data).map_err(FilterError::Decode)?;
    debug!(width = image.width(), height = image.height(), "image decoded");
    from_rgb_image(image.to_rgb8())
}

/// Read and decode an image file into an RGB raster.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open_rgb(path: impl AsRef<Path>) -> Result<RgbRaster> {
    let data = std::fs::read(path.as_ref())?;
    decode_rgb(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rgb_accepts_rgb() {
        let img = Array3::<u8>::zeros((2, 3, 3));
        assert!(validate_rgb(img.view()).is_ok());
    }

    #[test]
    fn test_validate_rgb_rejects_wrong_channels() {
        let img = Array3::<u8>::zeros((2, 3, 4));
        match validate_rgb(img.view()) {
            Err(FilterError::InvalidInput { shape }) => assert_eq!(shape, vec![2, 3, 4]),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rgb_rejects_empty() {
        let img = Array3::<u8>::zeros((0, 3, 3));
        assert!(validate_rgb(img.view()).is_err());
    }

    #[test]
    fn test_raster_mode_and_channels() {
        let rgb = Raster::from(Array3::<u8>::zeros((2, 4, 3)));
        let gray = Raster::from(Array2::<u8>::zeros((2, 4)));
        assert_eq!((rgb.mode(), rgb.channels(), rgb.dim()), ("RGB", 3, (2, 4)));
        assert_eq!((gray.mode(), gray.channels(), gray.dim()), ("GRAY", 1, (2, 4)));
        assert!(rgb.as_gray().is_none());
        assert!(gray.as_gray().is_some());
        assert_eq!(rgb.as_rgb().map(|a| a.dim()), Some((2, 4, 3)));
        assert!(gray.as_rgb().is_none());
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let img = Array3::from_shape_fn((3, 5, 3), |(y, x, c)| (y * 50 + x * 10 + c) as u8);
        let bytes = Raster::Rgb(img.clone()).encode_png().unwrap();
        assert_eq!(decode_rgb(&bytes).unwrap(), img);
    }

    #[test]
    fn test_png_gray_decodes_as_replicated_rgb() {
        let gray = Array2::from_shape_fn((2, 2), |(y, x)| (y * 2 + x) as u8 * 40);
        let bytes = Raster::Gray(gray.clone()).encode_png().unwrap();
        let rgb = decode_rgb(&bytes).unwrap();
        assert_eq!(rgb.dim(), (2, 2, 3));
        assert_eq!(rgb[[1, 1, 0]], gray[[1, 1]]);
        assert_eq!(rgb[[1, 1, 2]], gray[[1, 1]]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(decode_rgb(b"not an image"), Err(FilterError::Decode(_))));
    }
}
