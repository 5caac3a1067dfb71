use chrono::{DateTime, Days, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::rounding::{round_down_to_interval, round_up_to_interval};
use crate::core::types::TimelineItem;

/// Half-open time window `[start_time, end_time)` covering the rendered column.
///
/// Recomputed every layout pass from the requested window and the item set;
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl TimeRange {
    #[must_use]
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    #[must_use]
    pub fn contains(self, t: DateTime<Utc>) -> bool {
        self.start_time <= t && t < self.end_time
    }

    /// Whole minutes covered by the window, truncated.
    #[must_use]
    pub fn duration_minutes(self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Midnight-to-midnight window for the current UTC day.
    ///
    /// The engine falls back to this when the host supplies no explicit
    /// window.
    #[must_use]
    pub fn current_day() -> Self {
        let date = Utc::now().date_naive();
        Self {
            start_time: date.and_time(NaiveTime::MIN).and_utc(),
            end_time: (date + Days::new(1)).and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

/// Widens `requested` so every item fits, aligned to `granularity_minutes`.
///
/// An item starting before the lower bound pulls it down to the nearest
/// granularity boundary. Items much shorter than a coarse granularity get
/// their end pushed out by two extra granularity steps for the upper-bound
/// check only, so the minimum block height never clips the bottom of the
/// column. The result never narrows the requested window; the function is
/// pure and idempotent.
#[must_use]
pub fn fit_range_to_items(
    requested: TimeRange,
    items: &[TimelineItem],
    granularity_minutes: u32,
) -> TimeRange {
    let mut start_time = requested.start_time;
    let mut end_time = requested.end_time;
    let step = i64::from(granularity_minutes);

    for item in items {
        if item.start < start_time {
            start_time = round_down_to_interval(item.start, granularity_minutes);
        }

        let mut end = item.end;
        if granularity_minutes >= 30 && item.duration_minutes() < 3 * step {
            end += Duration::minutes(2 * step);
        }
        if end > end_time {
            end_time = round_up_to_interval(end, granularity_minutes);
        }
    }

    TimeRange::new(start_time, end_time)
}
