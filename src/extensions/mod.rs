//! Host-facing extension points.
//!
//! Observers stay decoupled from layout internals: they see engine events
//! and nothing else.

use crate::api::TimelineEvent;

/// Hook interface for hosts observing engine activity.
///
/// Observers receive gesture previews and committed item updates; they never
/// get mutable access to engine state.
pub trait TimelineObserver {
    /// Unique, non-empty identifier used for registry bookkeeping.
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &TimelineEvent);
}
