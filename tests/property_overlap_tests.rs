use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use timeline_rs::core::{ItemId, OverlapForest, TimelineItem};

fn minute_aligned(minutes_from_base: i64) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2024, 5, 14, 0, 0, 0)
        .single()
        .expect("valid base timestamp");
    base + Duration::minutes(minutes_from_base)
}

fn arbitrary_items() -> impl Strategy<Value = Vec<TimelineItem>> {
    prop::collection::vec((0i64..1_440, 1i64..300), 1..24).prop_map(|pairs| {
        let mut items: Vec<TimelineItem> = pairs
            .into_iter()
            .enumerate()
            .map(|(id, (start, duration))| {
                TimelineItem::new(
                    id as i64,
                    minute_aligned(start),
                    minute_aligned(start + duration),
                )
            })
            .collect();
        items.sort_by_key(|item| item.start);
        items
    })
}

/// Ancestors of `id`, walking parent links; panics past `limit` steps.
fn ancestor_chain(forest: &OverlapForest, id: &ItemId, limit: usize) -> Vec<ItemId> {
    let mut chain = Vec::new();
    let mut cursor = forest.parent_of(id).cloned();
    while let Some(parent) = cursor {
        assert!(
            chain.len() <= limit,
            "parent walk exceeded the item count; cycle suspected at {parent}"
        );
        cursor = forest.parent_of(&parent).cloned();
        chain.push(parent);
    }
    chain
}

proptest! {
    #[test]
    fn forest_is_acyclic_property(items in arbitrary_items()) {
        let forest = OverlapForest::build(&items);

        for item in &items {
            // Terminates within the item count or panics; either outcome
            // decides the property.
            let _ = ancestor_chain(&forest, &item.id, items.len());
        }
    }

    #[test]
    fn right_margin_equals_nesting_depth_property(items in arbitrary_items()) {
        let forest = OverlapForest::build(&items);
        let margins = forest.margin_weights();

        for item in &items {
            let depth = ancestor_chain(&forest, &item.id, items.len()).len();
            let weights = margins.get(&item.id).expect("weights for every item");
            prop_assert_eq!(weights.right as usize, depth);
        }
    }

    #[test]
    fn every_item_has_one_node_property(items in arbitrary_items()) {
        let forest = OverlapForest::build(&items);
        prop_assert_eq!(forest.len(), items.len());

        let margins = forest.margin_weights();
        prop_assert_eq!(margins.len(), items.len());
    }
}
