//! timeline-rs: vertical day-timeline layout and drag-interaction engine.
//!
//! The crate computes a column of fixed-height time slices spanning a
//! resolved time window, positions item blocks proportionally to their time
//! extent, staggers overlapping blocks through a containment forest, and
//! tracks press/move/release pointer gestures that snap pixel deltas to the
//! zoom granularity. Rendering and widget lifecycles stay with the embedding
//! host: the engine consumes items, a zoom level, and raw pointer
//! coordinates, and produces geometry plus committed item updates.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
