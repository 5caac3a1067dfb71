use chrono::{DateTime, Duration, Timelike, Utc};

/// Rounds `t` down to the nearest lower multiple of `interval_minutes`
/// within its hour, zeroing seconds and sub-seconds.
///
/// `interval_minutes` must be in `1..=60`; values outside that range are a
/// caller error and the result is unspecified. Already-aligned timestamps
/// come back unchanged.
#[must_use]
pub fn round_down_to_interval(t: DateTime<Utc>, interval_minutes: u32) -> DateTime<Utc> {
    debug_assert!((1..=60).contains(&interval_minutes));
    let aligned = (t.minute() / interval_minutes) * interval_minutes;
    hour_floor(t) + Duration::minutes(i64::from(aligned))
}

/// Rounds `t` up to the nearest higher multiple of `interval_minutes`,
/// zeroing seconds and sub-seconds.
///
/// Only the minute field is ceiled: a timestamp whose minute is already
/// aligned keeps that minute even when its seconds are nonzero. An
/// up-rounding past minute 59 rolls into the next hour.
#[must_use]
pub fn round_up_to_interval(t: DateTime<Utc>, interval_minutes: u32) -> DateTime<Utc> {
    debug_assert!((1..=60).contains(&interval_minutes));
    let aligned = t.minute().div_ceil(interval_minutes) * interval_minutes;
    hour_floor(t) + Duration::minutes(i64::from(aligned))
}

fn hour_floor(t: DateTime<Utc>) -> DateTime<Utc> {
    t - Duration::minutes(i64::from(t.minute()))
        - Duration::seconds(i64::from(t.second()))
        - Duration::nanoseconds(i64::from(t.nanosecond()))
}
