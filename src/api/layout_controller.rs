use crate::core::OverlapForest;
use crate::core::slice_layout::{LayoutFrame, LayoutInput, build_layout};
use crate::error::{TimelineError, TimelineResult};

use super::TimelineEngine;

impl TimelineEngine {
    /// Computes a frame without touching engine state.
    ///
    /// Geometry is a pure function of config, items, and commit revisions;
    /// this is the variant backing snapshots and tests.
    #[must_use]
    pub fn compute_frame(&self) -> LayoutFrame {
        let requested = self.effective_requested_range();
        let forest = OverlapForest::build(&self.items);
        let margins = forest.margin_weights();

        build_layout(&LayoutInput {
            requested_range: requested,
            resolved_range: self.resolved_range(),
            granularity_minutes: self.granularity_minutes(),
            slice_height: self.config.slice_height,
            column_width: self.config.column_width,
            items: &self.items,
            margins: &margins,
            revisions: &self.revisions,
            raised: self.raised.as_ref(),
            show_header: self.config.show_header,
            label_format: &self.config.label_format,
        })
    }

    /// Runs a layout pass and retains the frame for pointer hit-testing.
    ///
    /// Any live drag session (and the raised stacking order that came with
    /// it) is dropped here, so a gesture can never outlive a rebuild of the
    /// geometry it was pressed against.
    pub fn layout(&mut self) -> LayoutFrame {
        self.drag.clear();
        self.raised = None;
        let frame = self.compute_frame();
        self.last_frame = Some(frame.clone());
        frame
    }

    /// The most recent frame produced by [`Self::layout`].
    #[must_use]
    pub fn last_frame(&self) -> Option<&LayoutFrame> {
        self.last_frame.as_ref()
    }

    /// Serializes the current frame for host snapshot contracts.
    pub fn layout_snapshot_json(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self.compute_frame()).map_err(|err| {
            TimelineError::InvalidData(format!("layout snapshot serialization failed: {err}"))
        })
    }
}
