use indexmap::IndexMap;

use crate::core::slice_layout::LayoutFrame;
use crate::core::{ItemId, TimeRange, TimelineItem, ZoomLevel, fit_range_to_items};
use crate::error::TimelineResult;
use crate::extensions::TimelineObserver;
use crate::interaction::{DragSession, DragState};

use super::{TimelineEngineConfig, TimelineEvent};

/// Vertical day-timeline layout and drag-interaction engine.
///
/// The engine consumes the host's item set, a zoom level, and raw pointer
/// coordinates; it produces slice/block geometry and reports committed item
/// updates. Rendering, styling, and the widget lifecycle belong to the
/// embedding presentation layer.
pub struct TimelineEngine {
    pub(super) config: TimelineEngineConfig,
    pub(super) items: Vec<TimelineItem>,
    pub(super) drag: DragState,
    pub(super) revisions: IndexMap<ItemId, u64>,
    pub(super) raised: Option<ItemId>,
    pub(super) observers: Vec<Box<dyn TimelineObserver>>,
    pub(super) last_frame: Option<LayoutFrame>,
}

impl TimelineEngine {
    pub fn new(config: TimelineEngineConfig) -> TimelineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            items: Vec::new(),
            drag: DragState::default(),
            revisions: IndexMap::new(),
            raised: None,
            observers: Vec::new(),
            last_frame: None,
        })
    }

    /// Replaces the item set.
    ///
    /// Items are value snapshots; the engine sorts its copy ascending by
    /// start and never mutates entries in place.
    pub fn set_items(&mut self, mut items: Vec<TimelineItem>) {
        items.sort_by_key(|item| item.start);
        self.items = items;
    }

    #[must_use]
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    #[must_use]
    pub fn config(&self) -> &TimelineEngineConfig {
        &self.config
    }

    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        self.config.zoom = zoom;
    }

    pub fn set_slice_height(&mut self, slice_height: f64) -> TimelineResult<()> {
        let mut next = self.config.clone();
        next.slice_height = slice_height;
        next.validate()?;
        self.config = next;
        Ok(())
    }

    pub fn set_range(&mut self, range: Option<TimeRange>) {
        self.config.range = range;
    }

    pub fn set_show_header(&mut self, show_header: bool) {
        self.config.show_header = show_header;
    }

    /// Minutes per slice for the current zoom level.
    #[must_use]
    pub fn granularity_minutes(&self) -> u32 {
        self.config.zoom.granularity_minutes()
    }

    /// The window the host asked for, or the current UTC day.
    #[must_use]
    pub fn effective_requested_range(&self) -> TimeRange {
        self.config.range.unwrap_or_else(TimeRange::current_day)
    }

    /// Requested window widened so every item fits.
    #[must_use]
    pub fn resolved_range(&self) -> TimeRange {
        fit_range_to_items(
            self.effective_requested_range(),
            &self.items,
            self.granularity_minutes(),
        )
    }

    /// Commit counter for an item; zero until its first committed gesture.
    #[must_use]
    pub fn item_revision(&self, id: &ItemId) -> u64 {
        self.revisions.get(id).copied().unwrap_or(0)
    }

    /// The in-flight gesture, if any.
    #[must_use]
    pub fn active_drag(&self) -> Option<&DragSession> {
        self.drag.active_session()
    }

    pub(super) fn find_item(&self, id: &ItemId) -> Option<&TimelineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub(super) fn bump_revision(&mut self, id: &ItemId) {
        *self.revisions.entry(id.clone()).or_insert(0) += 1;
    }

    pub(super) fn notify(&mut self, event: &TimelineEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }
}
