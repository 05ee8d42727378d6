//! Representation of SSE events based on the
//! [HTML Living Standard](https://html.spec.whatwg.org/multipage/server-sent-events.html).

use core::time::Duration;

use bytes_utils::Str;

use crate::constants::MESSAGE_STR;

/// A dispatched event with immutable fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Event {
    /// The event type field (defaults to `"message"` when unspecified).
    pub event: Str,
    /// The data payload, `data:` lines joined by `\n`.
    pub data: Str,
    /// The connection's last event ID at the moment this event was dispatched.
    pub id: Str,
    /// Reconnection time advertised by the server for this event.
    pub retry: Option<Duration>,
}

impl Event {
    /// The event type.
    pub fn event_type(&self) -> &str {
        &self.event
    }

    /// The data payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The last event ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `retry` value exactly as sent, in milliseconds.
    ///
    /// A hand-built `retry` longer than `u64::MAX` milliseconds reads as
    /// `u64::MAX`.
    pub fn retry_millis(&self) -> Option<u64> {
        self.retry
            .map(|retry| u64::try_from(retry.as_millis()).unwrap_or(u64::MAX))
    }

    /// Returns `true` if the event carries the default `"message"` type.
    pub fn is_default_type(&self) -> bool {
        self.event == MESSAGE_STR
    }
}
