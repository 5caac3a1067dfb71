use serde::{Deserialize, Serialize};

/// Supported zoom granularities in minutes-per-slice, coarsest first.
pub const ZOOM_LEVELS: [u32; 6] = [60, 30, 15, 10, 5, 1];

/// Index into [`ZOOM_LEVELS`].
///
/// Out-of-table indices degrade to the finest granularity (1 minute)
/// instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoomLevel(usize);

impl ZoomLevel {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Minutes covered by one slice at this zoom level.
    #[must_use]
    pub fn granularity_minutes(self) -> u32 {
        ZOOM_LEVELS.get(self.0).copied().unwrap_or(1)
    }
}

impl From<usize> for ZoomLevel {
    fn from(index: usize) -> Self {
        Self(index)
    }
}
