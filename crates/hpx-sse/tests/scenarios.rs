//! End-to-end scenarios through the public text interface.

use std::time::Duration;

use hpx_sse::{Event, EventTransform, SseError};

fn parse(fragments: &[&str]) -> Vec<Event> {
    let mut transform = EventTransform::new();
    let mut events: Vec<Event> = fragments
        .iter()
        .flat_map(|fragment| transform.push(fragment))
        .collect();
    events.extend(transform.flush());
    events
}

#[test]
fn test_single_message() {
    let events = parse(&["data: hello\n\n"]);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type(), "message");
    assert_eq!(events[0].data(), "hello");
    assert_eq!(events[0].id(), "");
    assert_eq!(events[0].retry, None);
}

#[test]
fn test_id_carries_over() {
    let events = parse(&["id: 123\ndata: first\n\ndata: second\n\n"]);
    let ids: Vec<_> = events.iter().map(Event::id).collect();
    assert_eq!(ids, vec!["123", "123"]);
}

#[test]
fn test_named_multiline_event() {
    let events = parse(&["event: update\ndata: line1\ndata: line2\n\n"]);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type(), "update");
    assert_eq!(events[0].data(), "line1\nline2");
}

#[test]
fn test_empty_data_yields_nothing() {
    assert!(parse(&["data:\n\n"]).is_empty());
}

#[test]
fn test_fragmented_fields() {
    let events = parse(&["data: part", " 1\ndata: par", "t 2\n\n"]);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].data(), "part 1\npart 2");
}

#[test]
fn test_retry_is_per_event() {
    let events = parse(&["retry: 10000\ndata: a\n\nretry: x\ndata: b\n\n"]);
    assert_eq!(events[0].retry, Some(Duration::from_secs(10)));
    assert_eq!(events[1].retry, None);
}

#[test]
fn test_non_text_fragment_is_rejected() {
    let mut transform = EventTransform::new();
    let result = transform.try_push(&[0x64, 0x61, 0xC0, 0x0A, 0x0A]);
    assert_eq!(result, Err(SseError::NonText { valid_up_to: 2 }));
    assert_eq!(transform.remainder(), "");
    assert_eq!(transform.flush(), None);
}
