use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum rendered block height in pixels.
///
/// Short blocks are laid out from their real time extent; the presentation
/// layer applies this floor so they stay legible and clickable.
pub const MIN_BLOCK_HEIGHT_PX: f64 = 30.0;

/// Pixels applied per margin weight unit when staggering overlapped blocks.
pub const MARGIN_STEP_PX: f64 = 10.0;

fn default_true() -> bool {
    true
}

/// Host-assigned item identifier; hosts key items by integer or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One scheduled item owned by the host application.
///
/// The engine treats items as immutable value snapshots per layout pass and
/// never mutates them in place; every committed gesture produces a new item.
/// `start <= end` is a caller precondition and is not validated here —
/// inverted spans produce undefined block heights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: ItemId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Set to false to disable whole-block dragging.
    #[serde(default = "default_true")]
    pub can_drag: bool,
    /// Set to false to disable edge resizing.
    #[serde(default = "default_true")]
    pub can_resize: bool,
    /// Optional block background color, passed through to the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Arbitrary host payload carried through layout and commits untouched.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl TimelineItem {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            can_drag: true,
            can_resize: true,
            color: None,
            payload: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    #[must_use]
    pub fn with_drag_enabled(mut self, can_drag: bool) -> Self {
        self.can_drag = can_drag;
        self
    }

    #[must_use]
    pub fn with_resize_enabled(mut self, can_resize: bool) -> Self {
        self.can_resize = can_resize;
        self
    }

    /// Whole minutes between start and end, truncated.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Forest-derived stagger weights for one item.
///
/// `right` counts ancestors (nesting depth); `left` accumulates descendant
/// weight. The slice layout scales both by [`MARGIN_STEP_PX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarginWeights {
    pub left: u32,
    pub right: u32,
}
