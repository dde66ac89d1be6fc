//! Caller-held state for an interactive front end.
//!
//! A front end keeps one `Session`: the uploaded image, the currently
//! selected filter, and the last rendered result. Nothing here is global;
//! two sessions never see each other's state.

use tracing::{info, instrument};

use crate::catalog::Filter;
use crate::error::{FilterError, Result};
use crate::raster::{decode_rgb, validate_rgb, Raster, RgbRaster};

/// A filter result ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub filter: Filter,
    pub caption: String,
    pub raster: Raster,
}

#[derive(Debug, Default)]
pub struct Session {
    original: Option<RgbRaster>,
    selected: Filter,
    last: Option<Rendered>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode uploaded bytes and make them the current image.
    ///
    /// Any previous result is discarded.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn load_bytes(&mut self, data: &[u8]) -> Result<&RgbRaster> {
        let raster = decode_rgb(data)?;
        self.load_raster(raster)
    }

    /// Make an already decoded raster the current image.
    pub fn load_raster(&mut self, raster: RgbRaster) -> Result<&RgbRaster> {
        validate_rgb(raster.view())?;
        let (height, width, _) = raster.dim();
        info!(width, height, "image loaded");
        self.last = None;
        Ok(self.original.insert(raster))
    }

    /// The current image, if any.
    pub fn original(&self) -> Option<&RgbRaster> {
        self.original.as_ref()
    }

    /// Caption for the current image.
    pub fn original_caption(&self) -> &'static str {
        "Original Image"
    }

    pub fn select(&mut self, filter: Filter) {
        self.selected = filter;
    }

    /// Select a filter by display name or slug.
    pub fn select_by_name(&mut self, name: &str) -> Result<Filter> {
        let filter = Filter::from_name(name)?;
        self.select(filter);
        Ok(filter)
    }

    pub fn selected(&self) -> Filter {
        self.selected
    }

    /// Apply the selected filter to the current image.
    pub fn apply_selected(&mut self) -> Result<&Rendered> {
        self.apply(self.selected)
    }

    /// Apply `filter` to the current image and remember the result.
    ///
    /// The original image is left untouched, so filters never chain.
    ///
    /// # Errors
    /// [`FilterError::NoImage`] if nothing has been loaded.
    #[instrument(skip_all, fields(filter = filter.name()))]
    pub fn apply(&mut self, filter: Filter) -> Result<&Rendered> {
        let original = self.original.as_ref().ok_or(FilterError::NoImage)?;
        let raster = filter.apply(original.view())?;
        info!(mode = raster.mode(), "filter result ready");
        Ok(self.last.insert(Rendered {
            filter,
            caption: filter.caption(),
            raster,
        }))
    }

    /// The most recent result, if any.
    pub fn last(&self) -> Option<&Rendered> {
        self.last.as_ref()
    }

    /// Forget the current image and result; the selection is kept.
    pub fn clear(&mut self) {
        self.original = None;
        self.last = None;
    }
}
