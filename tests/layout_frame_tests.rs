use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use timeline_rs::api::{TimelineEngine, TimelineEngineConfig, TimelineEvent};
use timeline_rs::core::slice_layout::LayoutFrame;
use timeline_rs::core::{ItemId, TimeRange, TimelineItem, ZoomLevel};
use timeline_rs::error::TimelineError;
use timeline_rs::extensions::TimelineObserver;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

fn build_engine(items: Vec<TimelineItem>) -> TimelineEngine {
    let config = TimelineEngineConfig::new(ZoomLevel::new(1))
        .with_range(TimeRange::new(at(9, 0), at(17, 0)));
    let mut engine = TimelineEngine::new(config).expect("engine init");
    engine.set_items(items);
    engine.layout();
    engine
}

struct RecordingObserver {
    id: String,
    events: Rc<RefCell<Vec<TimelineEvent>>>,
}

impl TimelineObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &TimelineEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

fn recording(id: &str) -> (Box<RecordingObserver>, Rc<RefCell<Vec<TimelineEvent>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let observer = Box::new(RecordingObserver {
        id: id.to_owned(),
        events: Rc::clone(&events),
    });
    (observer, events)
}

#[test]
fn snapshot_json_round_trips_the_frame() {
    let engine = build_engine(vec![
        TimelineItem::new(1, at(10, 0), at(11, 0)).with_color("#88aa22"),
        TimelineItem::new(2, at(10, 15), at(10, 45)),
    ]);

    let json = engine.layout_snapshot_json().expect("snapshot json");
    let decoded: LayoutFrame = serde_json::from_str(&json).expect("decoded frame");

    assert_eq!(decoded, engine.compute_frame());
}

#[test]
fn commits_bump_the_block_revision_in_the_next_frame() {
    let mut engine = build_engine(vec![TimelineItem::new(1, at(10, 0), at(11, 0))]);

    let frame = engine.layout();
    assert_eq!(frame.block(&ItemId::Int(1)).expect("block").revision, 0);

    let committed = engine
        .resize_block_end(&ItemId::Int(1), 30.0)
        .expect("resize");
    engine.set_items(vec![committed]);

    let frame = engine.layout();
    assert_eq!(frame.block(&ItemId::Int(1)).expect("block").revision, 1);
}

#[test]
fn a_pressed_block_is_raised_until_release() {
    let mut engine = build_engine(vec![TimelineItem::new(1, at(10, 0), at(11, 0))]);

    assert!(engine.pointer_down(50.0, 60.0).expect("press"));
    let raised = engine.compute_frame();
    assert_eq!(raised.block(&ItemId::Int(1)).expect("block").z_index, 10);

    engine.pointer_move(50.0, 85.0).expect("drag");
    engine.pointer_up(50.0, 85.0).expect("release");
    let rest = engine.compute_frame();
    assert_eq!(rest.block(&ItemId::Int(1)).expect("block").z_index, 1);
}

#[test]
fn observers_see_raise_preview_and_commit_in_order() {
    let mut engine = build_engine(vec![TimelineItem::new(1, at(10, 0), at(11, 0))]);
    let (observer, events) = recording("recorder");
    engine.register_observer(observer).expect("register");

    assert!(engine.pointer_down(50.0, 60.0).expect("press"));
    engine.pointer_move(50.0, 85.0).expect("drag");
    engine.pointer_up(50.0, 85.0).expect("release");

    let events = events.borrow();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], TimelineEvent::BlockRaised { .. }));
    assert!(matches!(
        events[1],
        TimelineEvent::PreviewMoved {
            kind: timeline_rs::interaction::DragKind::Move,
            ..
        }
    ));
    match &events[2] {
        TimelineEvent::Committed { item } => assert_eq!(item.start, at(10, 30)),
        other => panic!("expected commit, got {other:?}"),
    }
}

#[test]
fn preview_events_carry_the_offset_geometry() {
    let mut engine = build_engine(vec![TimelineItem::new(1, at(10, 0), at(11, 0))]);
    let (observer, events) = recording("recorder");
    engine.register_observer(observer).expect("register");

    assert!(engine.pointer_down(50.0, 60.0).expect("press"));
    engine.pointer_move(50.0, 85.0).expect("drag");

    let events = events.borrow();
    match &events[1] {
        TimelineEvent::PreviewMoved { top, height, .. } => {
            assert!((top - 65.0).abs() <= 1e-9);
            assert!((height - 60.0).abs() <= 1e-9);
        }
        other => panic!("expected preview, got {other:?}"),
    }
}

#[test]
fn a_click_emits_no_commit() {
    let mut engine = build_engine(vec![TimelineItem::new(1, at(10, 0), at(11, 0))]);
    let (observer, events) = recording("recorder");
    engine.register_observer(observer).expect("register");

    assert!(engine.pointer_down(50.0, 60.0).expect("press"));
    engine.pointer_up(50.0, 60.0).expect("release");

    let events = events.borrow();
    assert!(
        events
            .iter()
            .all(|event| !matches!(event, TimelineEvent::Committed { .. }))
    );
}

#[test]
fn observer_ids_must_be_unique_and_non_empty() {
    let mut engine = build_engine(Vec::new());

    let (first, _) = recording("recorder");
    engine.register_observer(first).expect("register");

    let (duplicate, _) = recording("recorder");
    let err = engine.register_observer(duplicate).expect_err("duplicate");
    assert!(matches!(err, TimelineError::InvalidData(_)));

    let (anonymous, _) = recording("");
    let err = engine.register_observer(anonymous).expect_err("empty id");
    assert!(matches!(err, TimelineError::InvalidData(_)));
}

#[test]
fn observers_unregister_by_id() {
    let mut engine = build_engine(Vec::new());
    let (observer, _) = recording("recorder");
    engine.register_observer(observer).expect("register");

    assert!(engine.has_observer("recorder"));
    assert_eq!(engine.observer_count(), 1);
    assert!(engine.unregister_observer("recorder"));
    assert!(!engine.unregister_observer("recorder"));
    assert_eq!(engine.observer_count(), 0);
}

#[test]
fn gestures_complete_without_any_observer() {
    let mut engine = build_engine(vec![TimelineItem::new(1, at(10, 0), at(11, 0))]);

    assert!(engine.pointer_down(50.0, 60.0).expect("press"));
    engine.pointer_move(50.0, 85.0).expect("drag");
    let committed = engine
        .pointer_up(50.0, 85.0)
        .expect("release")
        .expect("committed item");

    assert_eq!(committed.start, at(10, 30));
}
