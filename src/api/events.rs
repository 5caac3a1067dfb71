use serde::{Deserialize, Serialize};

use crate::core::{ItemId, TimelineItem};
use crate::interaction::DragKind;

/// Notifications emitted to registered observers.
///
/// Previews carry transient geometry only; no item state changes until a
/// `Committed` event reports the replacement item on gesture completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    /// A block entered a gesture and moved to the raised stacking order.
    BlockRaised { id: ItemId },
    /// Live preview geometry for the in-flight gesture.
    PreviewMoved {
        id: ItemId,
        kind: DragKind,
        top: f64,
        height: f64,
    },
    /// A gesture or programmatic edge-resize completed with a replacement item.
    Committed { item: TimelineItem },
}
