//! # hpx-sse
//!
//! Incremental Server-Sent Events parser following the
//! [HTML Living Standard](https://html.spec.whatwg.org/multipage/server-sent-events.html).
//!
//! Input may arrive in chunks of any size. Lines split across chunks,
//! including a CRLF pair split between two chunks, are reassembled, and the
//! connection's last event ID is carried from event to event. Malformed
//! fields are skipped as the format requires; nothing in the parser blocks or
//! performs I/O.
//!
//! ## Layers
//!
//! | Type | Input | Output |
//! |------|-------|--------|
//! | [`LineSplitter`] | text fragments | complete lines |
//! | [`EventAssembler`] | complete lines | [`Event`]s |
//! | [`EventTransform`] | text fragments | [`Event`]s |
//! | [`EventStream`] | a byte [`Stream`](futures_core::Stream) or HTTP body | a `Stream` of [`Event`]s |
//!
//! Reconnection is left to the caller: every [`Event`] carries the last event
//! ID and the server's `retry` hint, and
//! [`ParserConfig::last_event_id()`] seeds a new session with a persisted ID.
//!
//! ## Quick Start
//!
//! ```rust
//! use futures_util::StreamExt;
//! use hpx_sse::EventStream;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let chunks = vec![
//!     Ok::<_, std::io::Error>(bytes::Bytes::from_static(b"id: 1\ndata: hel")),
//!     Ok(bytes::Bytes::from_static(b"lo\n\n")),
//! ];
//!
//! let mut events = EventStream::new(futures_util::stream::iter(chunks));
//! while let Some(event) = events.next().await {
//!     let event = event.expect("valid stream");
//!     assert_eq!(event.event_type(), "message");
//!     assert_eq!(event.data(), "hello");
//!     assert_eq!(event.id(), "1");
//! }
//! # }
//! ```

pub mod assembler;
pub mod config;
pub(crate) mod constants;
pub(crate) mod decoder;
pub mod error;
pub mod event;
pub mod line;
pub mod stream;
pub mod transform;

pub use assembler::EventAssembler;
pub use config::ParserConfig;
pub use error::{EventStreamError, SseError, SseResult};
pub use event::Event;
pub use line::LineSplitter;
pub use stream::EventStream;
pub use transform::EventTransform;
