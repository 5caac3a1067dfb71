pub mod overlap;
pub mod range;
pub mod rounding;
pub mod slice_layout;
pub mod types;
pub mod zoom;

pub use overlap::OverlapForest;
pub use range::{TimeRange, fit_range_to_items};
pub use rounding::{round_down_to_interval, round_up_to_interval};
pub use slice_layout::{
    BASE_Z_INDEX, BlockGeometry, LayoutFrame, LayoutInput, RAISED_Z_INDEX, SliceDescriptor,
    build_layout,
};
pub use types::{ItemId, MARGIN_STEP_PX, MIN_BLOCK_HEIGHT_PX, MarginWeights, TimelineItem};
pub use zoom::{ZOOM_LEVELS, ZoomLevel};
