use serde::{Deserialize, Serialize};

use crate::core::{TimeRange, ZoomLevel};
use crate::error::{TimelineError, TimelineResult};

/// Default slice height in pixels.
pub const DEFAULT_SLICE_HEIGHT_PX: f64 = 20.0;
/// Default content-column width in pixels.
pub const DEFAULT_COLUMN_WIDTH_PX: f64 = 400.0;
/// Default press-band height at block edges that starts a resize.
pub const DEFAULT_RESIZE_HANDLE_PX: f64 = 6.0;
/// Default slice label formatting (12-hour clock with meridiem).
pub const DEFAULT_LABEL_FORMAT: &str = "%I:%M %p";

/// Host-supplied engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub zoom: ZoomLevel,
    pub slice_height: f64,
    /// Explicit window; `None` renders the current UTC day.
    pub range: Option<TimeRange>,
    /// Reserves one slice-height row at the top for host-rendered headers.
    pub show_header: bool,
    /// Pixel width of the block content column.
    pub column_width: f64,
    /// Press-band height at a block's top/bottom edges that starts a resize
    /// instead of a move.
    pub resize_handle_px: f64,
    /// strftime-style format for slice labels.
    pub label_format: String,
}

impl Default for TimelineEngineConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomLevel::default(),
            slice_height: DEFAULT_SLICE_HEIGHT_PX,
            range: None,
            show_header: false,
            column_width: DEFAULT_COLUMN_WIDTH_PX,
            resize_handle_px: DEFAULT_RESIZE_HANDLE_PX,
            label_format: DEFAULT_LABEL_FORMAT.to_owned(),
        }
    }
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(zoom: ZoomLevel) -> Self {
        Self {
            zoom,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = Some(range);
        self
    }

    #[must_use]
    pub fn with_slice_height(mut self, slice_height: f64) -> Self {
        self.slice_height = slice_height;
        self
    }

    #[must_use]
    pub fn with_show_header(mut self, show_header: bool) -> Self {
        self.show_header = show_header;
        self
    }

    #[must_use]
    pub fn with_column_width(mut self, column_width: f64) -> Self {
        self.column_width = column_width;
        self
    }

    #[must_use]
    pub fn with_resize_handle(mut self, resize_handle_px: f64) -> Self {
        self.resize_handle_px = resize_handle_px;
        self
    }

    #[must_use]
    pub fn with_label_format(mut self, label_format: impl Into<String>) -> Self {
        self.label_format = label_format.into();
        self
    }

    pub(crate) fn validate(&self) -> TimelineResult<()> {
        if !self.slice_height.is_finite() || self.slice_height <= 0.0 {
            return Err(TimelineError::InvalidConfig(format!(
                "slice height must be finite and > 0, got {}",
                self.slice_height
            )));
        }
        if !self.column_width.is_finite() || self.column_width <= 0.0 {
            return Err(TimelineError::InvalidConfig(format!(
                "column width must be finite and > 0, got {}",
                self.column_width
            )));
        }
        if !self.resize_handle_px.is_finite() || self.resize_handle_px < 0.0 {
            return Err(TimelineError::InvalidConfig(format!(
                "resize handle band must be finite and >= 0, got {}",
                self.resize_handle_px
            )));
        }
        Ok(())
    }
}
