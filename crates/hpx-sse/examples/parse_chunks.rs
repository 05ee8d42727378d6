//! Parse Chunks Example
//!
//! Feeds a recorded event stream to the parser in small, uneven chunks and
//! prints every dispatched event.
//!
//! Run with: `cargo run -p hpx-sse --example parse_chunks`

use hpx_sse::EventTransform;

const RECORDED: &str = "\u{FEFF}: connected\r\n\
retry: 3000\r\n\
id: 1\r\n\
event: trade\r\n\
data: {\"price\":42000,\r\n\
data: \"size\":3}\r\n\
\r\n\
id: 2\r\n\
data: heartbeat\r\n\
\r\n";

fn main() {
    let mut transform = EventTransform::new();
    let bytes = RECORDED.as_bytes();

    // Uneven chunk sizes; some cuts fall between CR and LF.
    let mut start = 0;
    for size in [5usize, 13, 1, 7, 22, 3].into_iter().cycle() {
        if start >= bytes.len() {
            break;
        }
        let mut end = (start + size).min(bytes.len());
        while !RECORDED.is_char_boundary(end) {
            end += 1;
        }
        for event in transform.push(&RECORDED[start..end]) {
            println!(
                "type={} id={} retry={:?} data={}",
                event.event_type(),
                event.id(),
                event.retry_millis(),
                event.data()
            );
        }
        start = end;
    }

    if let Some(event) = transform.flush() {
        println!("trailing event: {}", event.data());
    }
    println!("last event id: {}", &**transform.last_event_id());
}
