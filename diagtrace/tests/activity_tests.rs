use std::sync::Arc;

use diagtrace::testing::{RecordingSink, SinkCall};
use diagtrace::{NullSink, SinkError, TagList, Tracker};
use pretty_assertions::{assert_eq, assert_matches, assert_ne};

fn pairs(tags: &TagList) -> Vec<(&str, &str)> {
    tags.iter()
        .map(|t| (t.key.as_str(), t.value.as_str()))
        .collect()
}

#[test]
fn test_start_snapshots_tags_in_order() {
    let sink = Arc::new(RecordingSink::new().enable("Op"));
    let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));
    let tags = TagList::from([("a", "1"), ("b", "2")]);

    let activity = tracker.start(&tags, "Op").unwrap().unwrap();

    assert_eq!(activity.operation(), "Op");
    assert_eq!(pairs(activity.tags()), vec![("a", "1"), ("b", "2")]);

    let starts = sink.starts();
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].0.id(), activity.id());
    assert_eq!(starts[0].1, tags);
}

#[test]
fn test_empty_operation_name_passes_through_unchecked() {
    let sink = Arc::new(RecordingSink::new().enable(""));
    let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));

    let activity = tracker.start(&TagList::new(), "").unwrap().unwrap();

    assert_eq!(activity.operation(), "");
    assert_eq!(sink.starts().len(), 1);
}

#[test]
fn test_start_without_listener_returns_none() {
    let sink = Arc::new(RecordingSink::new().enable("Other"));
    let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));

    let activity = tracker.start(&TagList::of("a", "1"), "Op").unwrap();

    assert_eq!(activity, None);
    assert_eq!(sink.calls(), vec![]);
    assert_eq!(sink.gate_checks(), 1);
}

#[test]
fn test_stop_none_is_a_quiet_no_op() {
    let sink = Arc::new(RecordingSink::new());
    let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));

    tracker.stop(None).unwrap();

    assert_eq!(sink.calls(), vec![]);
}

#[test]
fn test_full_lifecycle_reaches_the_sink_in_order() {
    let sink = Arc::new(RecordingSink::new().enable("Checkout"));
    let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));

    let activity = tracker.start(&TagList::of("cart", "42"), "Checkout").unwrap();
    tracker.stop(activity).unwrap();

    assert_matches!(
        sink.calls().as_slice(),
        [SinkCall::StartActivity { .. }, SinkCall::StopActivity { .. }]
    );
}

#[test]
fn test_stop_forwards_the_same_activity_it_was_given() {
    let sink = Arc::new(RecordingSink::new().enable("Op"));
    let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));

    let activity = tracker.start(&TagList::new(), "Op").unwrap().unwrap();
    let id = activity.id();
    tracker.stop(Some(activity)).unwrap();

    let stops = sink.stops();
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0].id(), id);
    assert_eq!(stops[0].operation(), "Op");
}

#[test]
fn test_double_stop_passes_through_to_the_sink() {
    let sink = Arc::new(RecordingSink::new().enable("Op"));
    let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));

    let activity = tracker.start(&TagList::new(), "Op").unwrap().unwrap();
    let replay = activity.clone();
    tracker.stop(Some(activity)).unwrap();
    tracker.stop(Some(replay)).unwrap();

    let stops = sink.stops();
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].id(), stops[1].id());
}

#[test]
fn test_later_tag_mutation_does_not_reach_the_activity() {
    let sink = Arc::new(RecordingSink::new().enable("Op"));
    let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));
    let mut tags = TagList::of("a", "1");

    let activity = tracker.start(&tags, "Op").unwrap().unwrap();
    tags.push("b", "2");

    assert_eq!(pairs(activity.tags()), vec![("a", "1")]);
    assert_eq!(tags.len(), 2);
}

#[test]
fn test_each_start_gets_a_fresh_id() {
    let sink = Arc::new(RecordingSink::new().enable_all());
    let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));

    let first = tracker.start(&TagList::new(), "Op").unwrap().unwrap();
    let second = tracker.start(&TagList::new(), "Op").unwrap().unwrap();

    assert_ne!(first.id(), second.id());
}

#[test]
fn test_start_failure_surfaces_and_leaves_no_handle() {
    let sink = Arc::new(RecordingSink::named("diagnostics").enable("Op"));
    let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));
    sink.close();

    let result = tracker.start(&TagList::new(), "Op");

    assert_matches!(result, Err(SinkError::ChannelClosed { .. }));
    assert_eq!(sink.starts().len(), 0);
}

#[test]
fn test_stop_failure_surfaces_after_the_channel_closes() {
    let sink = Arc::new(RecordingSink::new().enable("Op"));
    let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));

    let activity = tracker.start(&TagList::new(), "Op").unwrap();
    sink.close();
    let result = tracker.stop(activity);

    assert_matches!(result, Err(SinkError::ChannelClosed { .. }));
}

#[test]
fn test_null_sink_disables_every_operation() {
    let tracker = Tracker::new(Arc::new(NullSink));

    let activity = tracker.start(&TagList::of("a", "1"), "Op").unwrap();
    assert_eq!(activity, None);
    tracker.stop(activity).unwrap();
    tracker.track("Op", "nothing listens").unwrap();
}
