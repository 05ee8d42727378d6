//! Event assembly state machine.
//!
//! Interprets complete lines as described in the
//! [event stream interpretation](https://html.spec.whatwg.org/multipage/server-sent-events.html#event-stream-interpretation)
//! rules and builds [`Event`]s out of them.

use core::{mem, time::Duration};

use bytes_utils::Str;

use crate::{
    constants::{EMPTY_STR, MESSAGE_STR},
    event::Event,
};

/// Valid field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldName {
    Event,
    Data,
    Id,
    Retry,
    Ignored,
}

impl FieldName {
    fn parse(name: &str) -> Self {
        match name {
            "event" => Self::Event,
            "data" => Self::Data,
            "id" => Self::Id,
            "retry" => Self::Retry,
            _ => Self::Ignored,
        }
    }
}

/// A classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventLine<'a> {
    /// Blank line (event delimiter).
    Empty,
    /// Comment line (starts with `:`).
    Comment,
    /// A field line. The value is empty when the line has no colon.
    Field { name: FieldName, value: &'a str },
}

impl<'a> EventLine<'a> {
    fn read(line: &'a str) -> Self {
        if line.is_empty() {
            return Self::Empty;
        }
        if line.starts_with(':') {
            return Self::Comment;
        }

        let (name, value) = match line.split_once(':') {
            // Strip a single leading space only.
            Some((name, value)) => (name, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        Self::Field {
            name: FieldName::parse(name),
            value,
        }
    }
}

/// Parses a `retry` value: one or more ASCII digits and nothing else.
fn parse_retry(value: &str) -> Option<Duration> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok().map(Duration::from_millis)
}

/// The event currently being accumulated.
#[derive(Debug, Default)]
struct EventBuilder {
    event: String,
    /// One `\n`-terminated entry per `data:` field.
    data: String,
    retry: Option<Duration>,
}

impl EventBuilder {
    fn push_data(&mut self, value: &str) {
        self.data.reserve(value.len() + 1);
        self.data.push_str(value);
        self.data.push('\n');
    }

    /// Turns the builder into an event, or `None` if it carries no data.
    fn build(self, id: Str) -> Option<Event> {
        let EventBuilder {
            event,
            mut data,
            retry,
        } = self;

        if data.ends_with('\n') {
            data.pop();
        }
        if data.is_empty() {
            return None;
        }

        let event = if event.is_empty() {
            MESSAGE_STR
        } else {
            Str::from(event.as_str())
        };

        Some(Event {
            event,
            data: Str::from(data.as_str()),
            id,
            retry,
        })
    }
}

/// Builds events from complete lines.
///
/// Owns the connection-scoped last event ID, which survives every dispatch.
/// Use one assembler per parse session.
#[derive(Debug)]
pub struct EventAssembler {
    builder: EventBuilder,
    last_event_id: Str,
}

impl Default for EventAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventAssembler {
    /// Create an assembler with an empty last event ID.
    pub fn new() -> Self {
        Self::with_last_event_id(EMPTY_STR)
    }

    /// Create an assembler that resumes from `id`.
    pub fn with_last_event_id(id: impl Into<Str>) -> Self {
        Self {
            builder: EventBuilder::default(),
            last_event_id: id.into(),
        }
    }

    /// Reference to the current last event ID.
    pub fn last_event_id(&self) -> &Str {
        &self.last_event_id
    }

    /// Process one complete line (without its terminator).
    ///
    /// Returns an event when the line is blank and the pending event has data.
    #[must_use]
    pub fn process_line(&mut self, line: &str) -> Option<Event> {
        match EventLine::read(line) {
            EventLine::Empty => self.dispatch(),
            EventLine::Comment => None,
            EventLine::Field { name, value } => {
                self.apply_field(name, value);
                None
            }
        }
    }

    /// Signal end of input.
    ///
    /// `trailing` is the unterminated last line, if any. It is applied like
    /// any other line, then a final dispatch is attempted.
    #[must_use]
    pub fn finish(&mut self, trailing: Option<&str>) -> Option<Event> {
        if let Some(EventLine::Field { name, value }) = trailing.map(EventLine::read) {
            self.apply_field(name, value);
        }
        self.dispatch()
    }

    fn apply_field(&mut self, name: FieldName, value: &str) {
        match name {
            FieldName::Event => {
                self.builder.event.clear();
                self.builder.event.push_str(value);
            }
            FieldName::Data => self.builder.push_data(value),
            FieldName::Id => {
                if !value.contains('\0') {
                    self.last_event_id = Str::from(value);
                }
            }
            FieldName::Retry => {
                if let Some(retry) = parse_retry(value) {
                    self.builder.retry = Some(retry);
                }
            }
            FieldName::Ignored => {}
        }
    }

    /// Dispatch attempt: the pending event is consumed whether or not it
    /// produces an [`Event`]. The last event ID is kept.
    fn dispatch(&mut self) -> Option<Event> {
        mem::take(&mut self.builder).build(self.last_event_id.clone())
    }
}
