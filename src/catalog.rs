//! The fixed set of user-selectable filters.
//!
//! Each filter is a (display name, icon tag, function) triple. Dispatch is a
//! plain `match`, so adding a filter means adding a variant.

use std::fmt;
use std::str::FromStr;

use ndarray::ArrayView3;
use tracing::{debug, instrument};

use crate::error::{FilterError, Result};
use crate::filters::{contrast_stretch, edge_detect, log_transform, sharpening, smoothing};
use crate::raster::{validate_rgb, Raster};

/// One of the five filters offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    Smoothing,
    Sharpening,
    ContrastStretching,
    EdgeDetection,
    LogTransform,
}

impl Filter {
    /// All filters in display order.
    pub const ALL: [Filter; 5] = [
        Filter::Smoothing,
        Filter::Sharpening,
        Filter::ContrastStretching,
        Filter::EdgeDetection,
        Filter::LogTransform,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Filter::Smoothing => "Smoothing",
            Filter::Sharpening => "Sharpening",
            Filter::ContrastStretching => "Contrast Stretching",
            Filter::EdgeDetection => "Edge Detection (Sobel)",
            Filter::LogTransform => "Logarithmic Transformation",
        }
    }

    /// Icon tag (Font Awesome class list). Presentation only.
    pub fn icon(self) -> &'static str {
        match self {
            Filter::Smoothing => "fa-solid fa-water",
            Filter::Sharpening => "fa-solid fa-star",
            Filter::ContrastStretching => "fa-solid fa-adjust",
            Filter::EdgeDetection => "fa-solid fa-vector-square",
            Filter::LogTransform => "fa-solid fa-chart-line",
        }
    }

    /// Short command-line friendly identifier.
    pub fn slug(self) -> &'static str {
        match self {
            Filter::Smoothing => "smoothing",
            Filter::Sharpening => "sharpening",
            Filter::ContrastStretching => "contrast",
            Filter::EdgeDetection => "edges",
            Filter::LogTransform => "log",
        }
    }

    /// Caption shown under a result.
    pub fn caption(self) -> String {
        format!("{} Result", self.name())
    }

    /// Whether the filter returns a single-channel raster.
    pub fn is_grayscale(self) -> bool {
        matches!(self, Filter::EdgeDetection)
    }

    /// Resolve a display name or slug, ignoring case and surrounding space.
    pub fn from_name(name: &str) -> Result<Self> {
        let wanted = name.trim();
        Filter::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(wanted) || f.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FilterError::UnknownFilter(wanted.to_string()))
    }

    /// Validate the input and run the filter.
    ///
    /// # Errors
    /// [`FilterError::InvalidInput`] if `input` is not a non-empty
    /// (height, width, 3) raster.
    #[instrument(skip_all, fields(filter = self.name(), shape = ?input.shape()))]
    pub fn apply(self, input: ArrayView3<u8>) -> Result<Raster> {
        validate_rgb(input)?;
        let output = match self {
            Filter::Smoothing => Raster::Rgb(smoothing(input)),
            Filter::Sharpening => Raster::Rgb(sharpening(input)),
            Filter::ContrastStretching => Raster::Rgb(contrast_stretch(input)),
            Filter::EdgeDetection => Raster::Gray(edge_detect(input)),
            Filter::LogTransform => Raster::Rgb(log_transform(input)),
        };
        debug!(mode = output.mode(), "filter applied");
        Ok(output)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        Filter::from_name(s)
    }
}
