use chrono::{DateTime, Duration, Timelike, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::range::TimeRange;
use crate::core::rounding::{round_down_to_interval, round_up_to_interval};
use crate::core::types::{ItemId, MARGIN_STEP_PX, MIN_BLOCK_HEIGHT_PX, MarginWeights, TimelineItem};

/// Stacking order assigned to the actively dragged block.
pub const RAISED_Z_INDEX: i32 = 10;
/// Stacking order of blocks at rest.
pub const BASE_Z_INDEX: i32 = 1;

/// One granularity-sized band of the rendered column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceDescriptor {
    pub time: DateTime<Utc>,
    /// Running row index; row zero is the header when one is shown.
    pub index: usize,
    pub offset_y: f64,
    pub height: f64,
    /// Slice begins exactly on an hour; the host draws the separator rule.
    pub hour_boundary: bool,
    /// Spillover slice before the requested window (previous-day styling).
    pub before_requested_range: bool,
    /// Spillover slice after the requested window (next-day styling).
    pub after_requested_range: bool,
    pub label: String,
}

/// Resolved pixel geometry for one item's block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockGeometry {
    pub item: TimelineItem,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Floor the presentation layer applies to `height` when rendering.
    pub min_height: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    pub z_index: i32,
    /// Bumped on every commit; a changed revision tells the host to drop
    /// any direct preview geometry it still holds for this block.
    pub revision: u64,
}

impl BlockGeometry {
    /// Height as rendered once the minimum is applied.
    #[must_use]
    pub fn rendered_height(&self) -> f64 {
        self.height.max(self.min_height)
    }

    /// Whether a content-column-relative point falls inside the rendered block.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.rendered_height()
    }
}

/// Inputs for one pure layout pass.
#[derive(Debug, Clone)]
pub struct LayoutInput<'a> {
    pub requested_range: TimeRange,
    pub resolved_range: TimeRange,
    pub granularity_minutes: u32,
    pub slice_height: f64,
    pub column_width: f64,
    /// Items sorted ascending by start time.
    pub items: &'a [TimelineItem],
    pub margins: &'a IndexMap<ItemId, MarginWeights>,
    pub revisions: &'a IndexMap<ItemId, u64>,
    /// Block currently holding the raised stacking order, if any.
    pub raised: Option<&'a ItemId>,
    pub show_header: bool,
    /// strftime-style format for slice labels.
    pub label_format: &'a str,
}

/// Complete geometry for one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutFrame {
    pub requested_range: TimeRange,
    /// Requested window widened so every item fits.
    pub range: TimeRange,
    pub granularity_minutes: u32,
    pub slice_height: f64,
    /// Vertical space consumed by the header row, zero without one.
    pub header_offset_y: f64,
    pub slices: Vec<SliceDescriptor>,
    pub blocks: Vec<BlockGeometry>,
}

impl LayoutFrame {
    #[must_use]
    pub fn block(&self, id: &ItemId) -> Option<&BlockGeometry> {
        self.blocks.iter().find(|block| &block.item.id == id)
    }

    /// Total column height including the header row.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.header_offset_y + self.slices.len() as f64 * self.slice_height
    }
}

/// Walks the resolved range in granularity steps and produces slice and
/// block geometry. Pure: identical inputs yield identical frames.
#[must_use]
pub fn build_layout(input: &LayoutInput<'_>) -> LayoutFrame {
    debug_assert!(input.granularity_minutes >= 1);
    let step = Duration::minutes(i64::from(input.granularity_minutes));
    let header_offset_y = if input.show_header {
        input.slice_height
    } else {
        0.0
    };

    let mut slices = Vec::new();
    let mut blocks = Vec::new();
    // The header participates in the running index so every offset stays
    // relative to the container origin.
    let mut idx = usize::from(input.show_header);

    let mut t = input.resolved_range.start_time;
    while t < input.resolved_range.end_time {
        slices.push(SliceDescriptor {
            time: t,
            index: idx,
            offset_y: idx as f64 * input.slice_height,
            height: input.slice_height,
            hour_boundary: t.minute() == 0,
            before_requested_range: t < input.requested_range.start_time,
            after_requested_range: t > input.requested_range.end_time,
            label: t.format(input.label_format).to_string(),
        });

        let slice_end = t + step;
        for item in input
            .items
            .iter()
            .filter(|item| item.start >= t && item.start < slice_end)
        {
            blocks.push(block_geometry(input, item, t, idx));
        }

        idx += 1;
        t += step;
    }

    LayoutFrame {
        requested_range: input.requested_range,
        range: input.resolved_range,
        granularity_minutes: input.granularity_minutes,
        slice_height: input.slice_height,
        header_offset_y,
        slices,
        blocks,
    }
}

fn block_geometry(
    input: &LayoutInput<'_>,
    item: &TimelineItem,
    slice_time: DateTime<Utc>,
    idx: usize,
) -> BlockGeometry {
    let granularity = f64::from(input.granularity_minutes);
    let tmp_start = round_down_to_interval(item.start, input.granularity_minutes);
    let tmp_end = round_up_to_interval(item.end, input.granularity_minutes);
    let start_offset_minutes = (tmp_start - slice_time).num_minutes() as f64;

    // A span whose raw duration is an exact granularity multiple ends on a
    // slice boundary; stretch it by one step so it fills that slice instead
    // of visually vanishing out of it.
    let correction = if item
        .duration_minutes()
        .rem_euclid(i64::from(input.granularity_minutes))
        == 0
    {
        granularity
    } else {
        0.0
    };
    let block_minutes = (tmp_end - tmp_start).num_minutes() as f64 + correction;

    let weights = input.margins.get(&item.id).copied().unwrap_or_default();
    let left_margin = f64::from(weights.left) * MARGIN_STEP_PX;
    let right_margin = f64::from(weights.right) * MARGIN_STEP_PX;
    let raised = input.raised == Some(&item.id);

    BlockGeometry {
        item: item.clone(),
        x: left_margin,
        y: idx as f64 * input.slice_height
            + (start_offset_minutes / granularity) * input.slice_height,
        width: (input.column_width - left_margin - right_margin).max(0.0),
        height: (block_minutes / granularity) * input.slice_height,
        min_height: MIN_BLOCK_HEIGHT_PX,
        left_margin,
        right_margin,
        z_index: if raised { RAISED_Z_INDEX } else { BASE_Z_INDEX },
        revision: input.revisions.get(&item.id).copied().unwrap_or(0),
    }
}
