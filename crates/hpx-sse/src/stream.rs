//! [`Stream`] that converts a stream of
//! [`Bytes`](bytes::Bytes) chunks into [`Event`]s.

use core::{
    pin::Pin,
    task::{Context, Poll, ready},
};
use std::collections::VecDeque;

use bytes::Bytes;
use bytes_utils::Str;
use futures_core::{FusedStream, Stream};
use http_body::Body;
use http_body_util::BodyDataStream;
use tracing::{debug, trace, warn};

use crate::{
    config::ParserConfig,
    decoder::Utf8Decoder,
    error::{EventStreamError, SseError, SseResult},
    event::Event,
    transform::EventTransform,
};

// ---------------------------------------------------------------------------
// EventStreamState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum EventStreamState {
    Streaming,
    /// The source ended inside a UTF-8 sequence; reported after the flushed
    /// events.
    Incomplete,
    Terminated,
}

impl EventStreamState {
    fn is_terminated(self) -> bool {
        matches!(self, Self::Terminated)
    }
}

// ---------------------------------------------------------------------------
// EventStream
// ---------------------------------------------------------------------------

pin_project_lite::pin_project! {
    /// A [`Stream`] that converts a stream of byte chunks into parsed SSE
    /// [`Event`]s.
    ///
    /// The upstream is only polled when no parsed event is waiting, so a slow
    /// consumer holds back the source. Dropping the stream drops the source.
    #[project = EventStreamProjection]
    #[derive(Debug)]
    pub struct EventStream<S> {
        #[pin]
        stream: S,
        decoder: Utf8Decoder,
        transform: EventTransform,
        // Events parsed from the last chunk, not yet handed out.
        pending: VecDeque<Event>,
        text: String,
        state: EventStreamState,
    }
}

impl<S> EventStream<S> {
    /// Create a new [`EventStream`] from an underlying byte stream.
    pub fn new(stream: S) -> Self {
        Self::from_transform(stream, EventTransform::new())
    }

    /// Create a new [`EventStream`] with the given parser configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SseError::Config`] if the configuration is invalid.
    pub fn with_config(stream: S, config: ParserConfig) -> SseResult<Self> {
        Ok(Self::from_transform(stream, EventTransform::with_config(config)?))
    }

    fn from_transform(stream: S, transform: EventTransform) -> Self {
        Self {
            stream,
            decoder: Utf8Decoder::new(),
            transform,
            pending: VecDeque::new(),
            text: String::new(),
            state: EventStreamState::Streaming,
        }
    }

    /// Reference to the connection's current last event ID.
    ///
    /// This reflects every `id:` field parsed so far, including ones in
    /// events that are still buffered or were never dispatched.
    pub fn last_event_id(&self) -> &Str {
        self.transform.last_event_id()
    }

    /// Consume the stream and return the unterminated text left in the line
    /// buffer.
    pub fn into_remainder(self) -> String {
        self.transform.remainder().to_owned()
    }
}

impl<B> EventStream<BodyDataStream<B>>
where
    B: Body<Data = Bytes>,
{
    /// Create an [`EventStream`] reading from an HTTP body.
    ///
    /// # Errors
    ///
    /// Returns [`SseError::MissingBody`] if the body is already at its end, so
    /// there is nothing to read.
    pub fn from_body(body: B) -> SseResult<Self> {
        Self::from_body_with_config(body, ParserConfig::default())
    }

    /// Same as [`from_body`](Self::from_body) with a parser configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SseError::MissingBody`] if the body is already at its end,
    /// or [`SseError::Config`] if the configuration is invalid.
    pub fn from_body_with_config(body: B, config: ParserConfig) -> SseResult<Self> {
        if body.is_end_stream() {
            return Err(SseError::MissingBody);
        }
        Self::with_config(BodyDataStream::new(body), config)
    }

    /// Create an [`EventStream`] reading from an HTTP response body.
    ///
    /// Status codes are not checked; that is the caller's concern. A
    /// `Content-Type` other than `text/event-stream` is logged but accepted.
    ///
    /// # Errors
    ///
    /// Returns [`SseError::MissingBody`] if the response has no body to read.
    pub fn from_response(response: http::Response<B>) -> SseResult<Self> {
        if let Some(ct) = response.headers().get(http::header::CONTENT_TYPE) {
            let ct_str = ct.to_str().unwrap_or("");
            if !ct_str.contains("text/event-stream") {
                warn!(content_type = %ct_str, "Unexpected Content-Type for SSE response");
            }
        }
        Self::from_body(response.into_body())
    }
}

// ---------------------------------------------------------------------------
// Stream implementation
// ---------------------------------------------------------------------------

impl<S, E, B> Stream for EventStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    type Item = Result<Event, EventStreamError<E>>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<<Self as Stream>::Item>> {
        let mut this = self.project();

        loop {
            if let Some(event) = this.pending.pop_front() {
                trace!(event = %event.event_type(), id = %event.id(), "Dispatching SSE event");
                return Poll::Ready(Some(Ok(event)));
            }

            match this.state {
                EventStreamState::Streaming => {}
                EventStreamState::Incomplete => {
                    *this.state = EventStreamState::Terminated;
                    return Poll::Ready(Some(Err(EventStreamError::IncompleteUtf8)));
                }
                EventStreamState::Terminated => return Poll::Ready(None),
            }

            let new_bytes = match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(Ok(o)) => o,
                Some(Err(e)) => {
                    *this.state = EventStreamState::Terminated;
                    debug!("SSE transport error, terminating event stream");
                    return Poll::Ready(Some(Err(EventStreamError::Transport(e))));
                }
                None => {
                    *this.state = if this.decoder.has_incomplete() {
                        EventStreamState::Incomplete
                    } else {
                        EventStreamState::Terminated
                    };
                    this.pending.extend(this.transform.flush());
                    debug!(
                        remaining = this.pending.len(),
                        "SSE source ended, event stream flushed"
                    );
                    continue;
                }
            };

            let new_bytes = new_bytes.as_ref();
            if new_bytes.is_empty() {
                continue;
            }

            this.text.clear();
            if let Err(e) = this.decoder.decode(new_bytes, this.text) {
                *this.state = EventStreamState::Terminated;
                debug!(error = %e, "Invalid UTF-8 in SSE stream, terminating");
                return Poll::Ready(Some(Err(EventStreamError::Utf8(e))));
            }
            this.transform.push_into(this.text.as_str(), this.pending);
        }
    }
}

impl<S, E, B> FusedStream for EventStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    fn is_terminated(&self) -> bool {
        self.state.is_terminated() && self.pending.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
