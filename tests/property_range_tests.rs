use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use timeline_rs::core::{TimeRange, TimelineItem, fit_range_to_items};

fn minute_aligned(minutes_from_base: i64) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2024, 5, 14, 0, 0, 0)
        .single()
        .expect("valid base timestamp");
    base + Duration::minutes(minutes_from_base)
}

fn arbitrary_items() -> impl Strategy<Value = Vec<TimelineItem>> {
    prop::collection::vec((0i64..3_000, 0i64..600), 1..20).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(id, (start, duration))| {
                TimelineItem::new(
                    id as i64,
                    minute_aligned(start),
                    minute_aligned(start + duration),
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn fitting_is_idempotent_property(
        items in arbitrary_items(),
        requested_start in 0i64..2_000,
        requested_len in 0i64..2_000,
        granularity in 1u32..=60
    ) {
        let requested = TimeRange::new(
            minute_aligned(requested_start),
            minute_aligned(requested_start + requested_len),
        );

        let once = fit_range_to_items(requested, &items, granularity);
        let twice = fit_range_to_items(once, &items, granularity);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn resolved_range_contains_every_item_property(
        items in arbitrary_items(),
        requested_start in 0i64..2_000,
        requested_len in 0i64..2_000,
        granularity in 1u32..=60
    ) {
        let requested = TimeRange::new(
            minute_aligned(requested_start),
            minute_aligned(requested_start + requested_len),
        );

        let resolved = fit_range_to_items(requested, &items, granularity);
        for item in &items {
            prop_assert!(resolved.start_time <= item.start);
            prop_assert!(item.end <= resolved.end_time);
        }
    }

    #[test]
    fn fitting_never_narrows_the_request_property(
        items in arbitrary_items(),
        requested_start in 0i64..2_000,
        requested_len in 0i64..2_000,
        granularity in 1u32..=60
    ) {
        let requested = TimeRange::new(
            minute_aligned(requested_start),
            minute_aligned(requested_start + requested_len),
        );

        let resolved = fit_range_to_items(requested, &items, granularity);
        prop_assert!(resolved.start_time <= requested.start_time);
        prop_assert!(requested.end_time <= resolved.end_time);
    }
}
