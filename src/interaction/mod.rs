use serde::{Deserialize, Serialize};

use crate::core::ItemId;

/// Gesture family of one drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragKind {
    /// Whole-block move preserving the item duration.
    Move,
    /// Top-edge resize adjusting the item start.
    ResizeStart,
    /// Bottom-edge resize adjusting the item end.
    ResizeEnd,
}

/// State of one in-flight pointer gesture.
///
/// Created on pointer-down over a draggable or resizable block, updated on
/// every pointer-move, consumed on pointer-up. Items are never touched while
/// a session is live; only the commit on release produces a new item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub kind: DragKind,
    pub target: ItemId,
    /// Pointer y at press time, content-column-relative.
    pub origin_y: f64,
    /// Block top at press time.
    pub origin_top: f64,
    /// Block rendered height at press time.
    pub origin_height: f64,
    /// Latest recorded pointer offset; `None` until the first move.
    pub live_offset_y: Option<f64>,
}

impl DragSession {
    /// Preview top and height for the current offset, by gesture kind.
    #[must_use]
    pub fn preview_rect(&self) -> (f64, f64) {
        let dy = self.live_offset_y.unwrap_or(0.0);
        match self.kind {
            DragKind::Move => (self.origin_top + dy, self.origin_height),
            DragKind::ResizeStart => (self.origin_top + dy, self.origin_height - dy),
            DragKind::ResizeEnd => (self.origin_top, self.origin_height + dy),
        }
    }
}

/// Single-slot gesture tracker.
///
/// Pointer devices are single-focus: at most one session is live, and a new
/// press replaces whatever was active. Moves and releases without a prior
/// press are ignored by the callers of this tracker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragState {
    session: Option<DragSession>,
}

impl DragState {
    pub fn begin(
        &mut self,
        kind: DragKind,
        target: ItemId,
        origin_y: f64,
        origin_top: f64,
        origin_height: f64,
    ) {
        self.session = Some(DragSession {
            kind,
            target,
            origin_y,
            origin_top,
            origin_height,
            live_offset_y: None,
        });
    }

    /// Records a pointer move and returns the updated session for preview use.
    pub fn record_movement(&mut self, pointer_y: f64) -> Option<&DragSession> {
        let session = self.session.as_mut()?;
        session.live_offset_y = Some(pointer_y - session.origin_y);
        Some(&*session)
    }

    /// Takes the session for commit processing, leaving the tracker idle.
    #[must_use]
    pub fn take_for_release(&mut self) -> Option<DragSession> {
        self.session.take()
    }

    /// Drops any live session. Called after every layout rebuild so a
    /// session can never outlive the geometry it was pressed against.
    pub fn clear(&mut self) {
        self.session = None;
    }

    #[must_use]
    pub fn active_session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_press_replaces_live_session() {
        let mut state = DragState::default();
        state.begin(DragKind::Move, ItemId::Int(1), 50.0, 40.0, 30.0);
        let _ = state.record_movement(62.0);
        state.begin(DragKind::ResizeEnd, ItemId::Int(2), 80.0, 60.0, 30.0);

        let session = state.active_session().expect("live session");
        assert_eq!(session.target, ItemId::Int(2));
        assert_eq!(session.live_offset_y, None);
    }

    #[test]
    fn release_consumes_the_session() {
        let mut state = DragState::default();
        state.begin(DragKind::Move, ItemId::Int(1), 50.0, 40.0, 30.0);

        assert!(state.take_for_release().is_some());
        assert!(!state.is_active());
        assert!(state.take_for_release().is_none());
    }
}
