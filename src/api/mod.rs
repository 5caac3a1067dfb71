//! Host-facing engine facade.
//!
//! [`TimelineEngine`] owns the item set, the drag-session state machine, and
//! the last computed frame; the impl blocks are split per concern across
//! this module's files.

mod drag_controller;
mod engine;
mod engine_config;
mod events;
mod layout_controller;
mod observer_registry;

pub use engine::TimelineEngine;
pub use engine_config::{
    DEFAULT_COLUMN_WIDTH_PX, DEFAULT_LABEL_FORMAT, DEFAULT_RESIZE_HANDLE_PX,
    DEFAULT_SLICE_HEIGHT_PX, TimelineEngineConfig,
};
pub use events::TimelineEvent;
