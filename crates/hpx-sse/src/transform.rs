//! Text-in, events-out transform.
//!
//! [`EventTransform`] chains a [`LineSplitter`] into an [`EventAssembler`]
//! behind a single push/flush interface. It is synchronous and does no I/O;
//! [`EventStream`](crate::stream::EventStream) drives it from a byte stream.

use bytes_utils::Str;

use crate::{
    assembler::EventAssembler,
    config::ParserConfig,
    constants::BOM,
    error::{SseError, SseResult},
    event::Event,
    line::LineSplitter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransformState {
    /// No text seen yet; a BOM may still open the stream.
    NotStarted,
    Started,
    /// `flush` has run.
    Finished,
}

/// Incremental SSE parser over text fragments.
///
/// ```
/// use hpx_sse::EventTransform;
///
/// let mut transform = EventTransform::new();
/// assert!(transform.push("data: part").is_empty());
/// let events = transform.push(" 1\n\n");
/// assert_eq!(events[0].data(), "part 1");
/// assert!(transform.flush().is_none());
/// ```
#[derive(Debug)]
pub struct EventTransform {
    splitter: LineSplitter,
    assembler: EventAssembler,
    strip_bom: bool,
    state: TransformState,
}

impl Default for EventTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl EventTransform {
    /// Create a transform with default settings.
    pub fn new() -> Self {
        Self::from_parts(ParserConfig::default())
    }

    /// Create a transform from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SseError::Config`] if the configuration is invalid.
    pub fn with_config(config: ParserConfig) -> SseResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: ParserConfig) -> Self {
        Self {
            splitter: LineSplitter::with_capacity(config.buffer_capacity),
            assembler: EventAssembler::with_last_event_id(config.last_event_id),
            strip_bom: config.strip_bom,
            state: TransformState::NotStarted,
        }
    }

    /// Push a text fragment and return the events it completes.
    ///
    /// Fragments pushed after [`flush`](Self::flush) are ignored.
    pub fn push(&mut self, fragment: &str) -> Vec<Event> {
        let mut events = Vec::new();
        self.push_into(fragment, &mut events);
        events
    }

    /// Push a fragment that has not been checked to be text.
    ///
    /// # Errors
    ///
    /// Returns [`SseError::NonText`] if `fragment` is not complete, valid
    /// UTF-8. The parser state is left untouched in that case.
    pub fn try_push(&mut self, fragment: &[u8]) -> SseResult<Vec<Event>> {
        let text = core::str::from_utf8(fragment).map_err(SseError::from)?;
        Ok(self.push(text))
    }

    /// Push a text fragment, appending completed events to `out`.
    pub fn push_into<E>(&mut self, fragment: &str, out: &mut E)
    where
        E: Extend<Event>,
    {
        let fragment = match self.state {
            TransformState::Finished => return,
            _ if fragment.is_empty() => return,
            TransformState::NotStarted => {
                self.state = TransformState::Started;
                if self.strip_bom {
                    fragment.strip_prefix(BOM).unwrap_or(fragment)
                } else {
                    fragment
                }
            }
            TransformState::Started => fragment,
        };

        let assembler = &mut self.assembler;
        self.splitter.push(fragment, |line| {
            out.extend(assembler.process_line(line));
        });
    }

    /// Signal end of input and run the final dispatch attempt.
    ///
    /// An unterminated last line is processed first. Only the first call can
    /// return an event.
    pub fn flush(&mut self) -> Option<Event> {
        if self.state == TransformState::Finished {
            return None;
        }
        self.state = TransformState::Finished;

        let trailing = self.splitter.finish();
        self.assembler.finish(trailing.as_deref())
    }

    /// Returns `true` once [`flush`](Self::flush) has been called.
    pub fn is_finished(&self) -> bool {
        self.state == TransformState::Finished
    }

    /// Reference to the current last event ID.
    pub fn last_event_id(&self) -> &Str {
        self.assembler.last_event_id()
    }

    /// The buffered, not yet terminated tail of the input.
    pub fn remainder(&self) -> &str {
        self.splitter.remainder()
    }
}
