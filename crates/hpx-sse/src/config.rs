//! Parser configuration.

use bytes_utils::Str;

use crate::{
    constants::{DEFAULT_BUFFER_CAPACITY, EMPTY_STR},
    error::{SseError, SseResult},
};

/// Configuration for a parse session.
///
/// Follows the same builder pattern as the transport configs: sensible
/// defaults and chainable setter methods.
#[derive(Clone, Debug)]
pub struct ParserConfig {
    /// Last event ID the session starts from (e.g. the value persisted before
    /// a reconnect).
    pub last_event_id: Str,
    /// Whether a byte order mark opening the stream is dropped.
    pub strip_bom: bool,
    /// Initial capacity of the line buffer. This is not a limit.
    pub buffer_capacity: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            last_event_id: EMPTY_STR,
            strip_bom: true,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl ParserConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial last event ID.
    #[must_use]
    pub fn last_event_id(mut self, id: impl Into<Str>) -> Self {
        self.last_event_id = id.into();
        self
    }

    /// Set whether a leading byte order mark is stripped.
    #[must_use]
    pub fn strip_bom(mut self, strip: bool) -> Self {
        self.strip_bom = strip;
        self
    }

    /// Set the initial line buffer capacity.
    #[must_use]
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SseError::Config`] if the initial last event ID contains a
    /// NUL character, since no `id:` field could ever set such a value.
    pub fn validate(&self) -> SseResult<()> {
        if self.last_event_id.contains('\0') {
            return Err(SseError::config("Last event ID cannot contain NUL"));
        }
        Ok(())
    }
}
