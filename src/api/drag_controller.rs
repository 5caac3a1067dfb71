use chrono::Duration;
use tracing::{debug, warn};

use crate::core::rounding::round_down_to_interval;
use crate::core::{ItemId, TimelineItem};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::DragKind;

use super::{TimelineEngine, TimelineEvent};

impl TimelineEngine {
    /// Handles a pointer press at content-column-relative coordinates.
    ///
    /// Hit-tests the last computed frame, resolves the gesture kind from the
    /// press position, and opens a drag session when the item allows the
    /// gesture. The pressed block moves to the raised stacking order and
    /// observers receive [`TimelineEvent::BlockRaised`]. A press while a
    /// session is live replaces it; pointer devices are single-focus.
    ///
    /// Returns whether a session started.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> TimelineResult<bool> {
        validate_pointer(x, y)?;

        let Some(block) = self.block_at(x, y) else {
            return Ok(false);
        };
        let Some(kind) = self.classify_press(block, y) else {
            return Ok(false);
        };

        let id = block.item.id.clone();
        let origin_top = block.y;
        let origin_height = block.rendered_height();

        self.drag.begin(kind, id.clone(), y, origin_top, origin_height);
        self.raised = Some(id.clone());
        self.notify(&TimelineEvent::BlockRaised { id });
        Ok(true)
    }

    /// Handles a pointer move.
    ///
    /// Records the vertical offset from the press origin and emits
    /// [`TimelineEvent::PreviewMoved`] with the would-be geometry. Items are
    /// never touched while the gesture is in flight; the host renders the
    /// preview directly and discards it after the commit. A move with no
    /// live session is ignored.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> TimelineResult<()> {
        validate_pointer(x, y)?;

        let Some(session) = self.drag.record_movement(y) else {
            return Ok(());
        };
        let id = session.target.clone();
        let kind = session.kind;
        let (top, height) = session.preview_rect();

        self.notify(&TimelineEvent::PreviewMoved {
            id,
            kind,
            top,
            height,
        });
        Ok(())
    }

    /// Handles a pointer release, completing the gesture.
    ///
    /// A release with no recorded movement is a plain click: the session and
    /// the raised stacking order reset and nothing is emitted. A release
    /// after movement snaps the accumulated pixel offset to the zoom
    /// granularity, produces the replacement item, bumps its commit
    /// revision, and emits [`TimelineEvent::Committed`] exactly once. A
    /// release with no live session is ignored.
    ///
    /// When the session's item is no longer in the current item set the
    /// session is cleared first and [`TimelineError::UnknownItem`] is
    /// returned, so a retry starts clean.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> TimelineResult<Option<TimelineItem>> {
        validate_pointer(x, y)?;

        let Some(session) = self.drag.take_for_release() else {
            return Ok(None);
        };
        let Some(offset_y) = session.live_offset_y else {
            self.raised = None;
            return Ok(None);
        };

        let updated = match session.kind {
            DragKind::Move => {
                let new_top = session.origin_top + offset_y;
                self.commit_move(&session.target, new_top)?
            }
            DragKind::ResizeStart => self.commit_resize_start(&session.target, offset_y)?,
            DragKind::ResizeEnd => self.commit_resize_end(&session.target, offset_y)?,
        };

        Ok(Some(updated))
    }

    /// Applies a start-edge resize by a raw pixel offset.
    ///
    /// Hosts with their own handle widgets drive this directly; it shares
    /// the snap and clamp math with the gesture path and carries the same
    /// revision and event semantics.
    pub fn resize_block_start(&mut self, id: &ItemId, dy: f64) -> TimelineResult<TimelineItem> {
        if !dy.is_finite() {
            return Err(TimelineError::InvalidData(format!(
                "resize offset must be finite, got {dy}"
            )));
        }
        self.commit_resize_start(id, dy)
    }

    /// Applies an end-edge resize by a raw pixel offset.
    pub fn resize_block_end(&mut self, id: &ItemId, dy: f64) -> TimelineResult<TimelineItem> {
        if !dy.is_finite() {
            return Err(TimelineError::InvalidData(format!(
                "resize offset must be finite, got {dy}"
            )));
        }
        self.commit_resize_end(id, dy)
    }

    /// Move commit: the block's new top, re-read against the same resolved
    /// range layout used, becomes the snapped start; duration is preserved.
    fn commit_move(&mut self, id: &ItemId, new_top: f64) -> TimelineResult<TimelineItem> {
        let item = self.take_commit_item(id)?;
        let granularity = f64::from(self.granularity_minutes());
        let header_offset = if self.config.show_header {
            self.config.slice_height
        } else {
            0.0
        };

        let start_scale = ((new_top - header_offset) / self.config.slice_height) * granularity;
        let snapped_minutes = (start_scale / granularity).floor() * granularity;
        let start =
            self.resolved_range().start_time + Duration::minutes(snapped_minutes as i64);
        let end = start + Duration::minutes(item.duration_minutes());

        self.finish_commit(TimelineItem { start, end, ..item })
    }

    /// Start-edge commit: the snapped candidate start may not pass the end;
    /// at or beyond it the end gives way by one granularity step instead of
    /// inverting the span.
    fn commit_resize_start(&mut self, id: &ItemId, dy: f64) -> TimelineResult<TimelineItem> {
        let item = self.take_commit_item(id)?;
        let granularity_minutes = self.granularity_minutes();
        let diff = self.snap_offset_minutes(dy);

        let start = round_down_to_interval(item.start + Duration::minutes(diff), granularity_minutes);
        let end = if start >= item.end {
            start + Duration::minutes(i64::from(granularity_minutes))
        } else {
            item.end
        };

        self.finish_commit(TimelineItem { start, end, ..item })
    }

    /// End-edge commit: symmetric, clamping a candidate end that would cross
    /// back over the start.
    fn commit_resize_end(&mut self, id: &ItemId, dy: f64) -> TimelineResult<TimelineItem> {
        let item = self.take_commit_item(id)?;
        let granularity_minutes = self.granularity_minutes();
        let diff = self.snap_offset_minutes(dy);

        let mut end = round_down_to_interval(item.end + Duration::minutes(diff), granularity_minutes);
        if end < item.start {
            end = item.start + Duration::minutes(i64::from(granularity_minutes));
        }

        self.finish_commit(TimelineItem { end, ..item })
    }

    /// Pixel offset converted to whole minutes, floored to the granularity.
    fn snap_offset_minutes(&self, dy: f64) -> i64 {
        let granularity = f64::from(self.granularity_minutes());
        let time_scale = (dy / self.config.slice_height) * granularity;
        ((time_scale / granularity).floor() * granularity) as i64
    }

    /// Resolves the item a commit targets, lowering the raised block either
    /// way so an unknown id leaves no gesture residue behind.
    fn take_commit_item(&mut self, id: &ItemId) -> TimelineResult<TimelineItem> {
        self.raised = None;
        match self.find_item(id) {
            Some(item) => Ok(item.clone()),
            None => {
                warn!(item = %id, "commit target missing from current item set");
                Err(TimelineError::UnknownItem(id.clone()))
            }
        }
    }

    fn finish_commit(&mut self, item: TimelineItem) -> TimelineResult<TimelineItem> {
        self.bump_revision(&item.id);
        debug!(
            item = %item.id,
            start = %item.start,
            end = %item.end,
            "committed item update"
        );
        self.notify(&TimelineEvent::Committed { item: item.clone() });
        Ok(item)
    }
}

fn validate_pointer(x: f64, y: f64) -> TimelineResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(TimelineError::InvalidData(format!(
            "pointer coordinates must be finite, got ({x}, {y})"
        )));
    }
    Ok(())
}
