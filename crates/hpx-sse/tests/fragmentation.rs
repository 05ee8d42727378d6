//! Property-based tests for chunk boundary handling.
//!
//! Parsing an input in arbitrary fragments must produce exactly the events
//! of parsing it in one piece, whichever layer the fragments enter through.

use std::convert::Infallible;

use bytes::Bytes;
use futures_util::StreamExt;
use hpx_sse::{Event, EventStream, EventTransform};
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

/// Building blocks that exercise every line form and terminator.
fn piece() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "data: hello",
        "data:x",
        "data",
        "data:  spaced",
        "event: update",
        "event:",
        "id: 42",
        "id",
        "id: a\0b",
        "retry: 1500",
        "retry: 15x",
        ": comment",
        "unknown: field",
        "é€😀",
        "\u{FEFF}",
        "\n",
        "\r",
        "\r\n",
        "\n\n",
        "\r\n\r\n",
    ])
}

fn input() -> impl Strategy<Value = String> {
    prop::collection::vec(piece(), 0..40).prop_map(|pieces| pieces.concat())
}

fn parse_text(fragments: &[&str]) -> Vec<Event> {
    let mut transform = EventTransform::new();
    let mut events = Vec::new();
    for fragment in fragments {
        transform.push_into(fragment, &mut events);
    }
    events.extend(transform.flush());
    events
}

/// Splits `text` at the given byte offsets, moved down to char boundaries.
fn split_text(text: &str, mut cuts: Vec<usize>) -> Vec<&str> {
    cuts.iter_mut().for_each(|cut| {
        *cut %= text.len() + 1;
        while !text.is_char_boundary(*cut) {
            *cut -= 1;
        }
    });
    cuts.sort_unstable();

    let mut fragments = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        fragments.push(&text[start..cut]);
        start = cut;
    }
    fragments.push(&text[start..]);
    fragments
}

/// Splits `bytes` at the given offsets, ignoring char boundaries.
fn split_bytes(bytes: &[u8], mut cuts: Vec<usize>) -> Vec<Bytes> {
    cuts.iter_mut().for_each(|cut| *cut %= bytes.len() + 1);
    cuts.sort_unstable();

    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        chunks.push(Bytes::copy_from_slice(&bytes[start..cut]));
        start = cut;
    }
    chunks.push(Bytes::copy_from_slice(&bytes[start..]));
    chunks
}

fn parse_bytes(chunks: Vec<Bytes>) -> Vec<Event> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    runtime.block_on(async move {
        EventStream::new(futures_util::stream::iter(
            chunks.into_iter().map(Ok::<_, Infallible>),
        ))
        .map(|event| event.expect("valid utf-8 input"))
        .collect()
        .await
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// **Fragmentation invariance** over text fragments.
    #[test]
    fn text_fragments_match_whole_input(
        text in input(),
        cuts in prop::collection::vec(any::<usize>(), 0..12),
    ) {
        let whole = parse_text(&[text.as_str()]);
        let fragmented = parse_text(&split_text(&text, cuts));
        prop_assert_eq!(whole, fragmented);
    }

    /// **Fragmentation invariance** over byte chunks, including cuts inside
    /// multi-byte characters and between CR and LF.
    #[test]
    fn byte_chunks_match_whole_input(
        text in input(),
        cuts in prop::collection::vec(any::<usize>(), 0..12),
    ) {
        let whole = parse_text(&[text.as_str()]);
        let chunked = parse_bytes(split_bytes(text.as_bytes(), cuts));
        prop_assert_eq!(whole, chunked);
    }

    /// **Never emits empty events** and never keeps a trailing newline that a
    /// single `data:` field would have added.
    #[test]
    fn emitted_events_are_well_formed(text in input()) {
        for event in parse_text(&[text.as_str()]) {
            prop_assert!(!event.data.is_empty());
            prop_assert!(!event.event.is_empty());
            prop_assert!(!event.id.contains('\0'));
        }
    }

    /// **Never panics** on arbitrary Unicode input.
    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,300}") {
        let _ = parse_text(&[text.as_str()]);
    }
}

// ============================================================================
// Exhaustive CR/LF boundary check
// ============================================================================

#[test]
fn every_single_cut_matches_whole_input() {
    let text = "id: 1\r\ndata: a\r\rdata: b\r\n\r\nevent: x\rdata: c\n\r\ndata: d";
    let whole = parse_text(&[text]);
    assert_eq!(whole.len(), 4);

    for cut in 0..=text.len() {
        let (head, tail) = text.split_at(cut);
        assert_eq!(parse_text(&[head, tail]), whole, "cut at {cut}");
    }
}
