//! Error types for the SSE parser and its stream adapter.

use core::str::Utf8Error;

use thiserror::Error;

/// Result type for fallible parser operations.
pub type SseResult<T> = Result<T, SseError>;

/// Usage errors raised synchronously by the parser API.
///
/// Malformed event-stream content is never reported through this type: the
/// wire format mandates that bad fields are skipped silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SseError {
    /// The byte source has no body to read from.
    #[error("SSE source has no readable body")]
    MissingBody,

    /// A fragment handed to the text stage is not valid UTF-8.
    #[error("SSE fragment is not valid UTF-8 text (valid up to byte {valid_up_to})")]
    NonText {
        /// Length of the longest valid UTF-8 prefix of the fragment.
        valid_up_to: usize,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the invalid setting.
        message: String,
    },
}

impl SseError {
    /// Create a non-text fragment error.
    pub fn non_text(valid_up_to: usize) -> Self {
        Self::NonText { valid_up_to }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<Utf8Error> for SseError {
    fn from(e: Utf8Error) -> Self {
        Self::non_text(e.valid_up_to())
    }
}

/// Errors produced by [`EventStream`](crate::stream::EventStream).
///
/// Every variant terminates the stream. [`IncompleteUtf8`](Self::IncompleteUtf8)
/// is yielded after the events flushed at end of input, as the last item.
#[derive(Error, Debug, PartialEq)]
pub enum EventStreamError<E> {
    /// Something went wrong with the underlying stream.
    #[error("SSE transport error: {0}")]
    Transport(E),

    /// The stream contained invalid UTF-8.
    #[error("invalid UTF-8 in event stream: {0}")]
    Utf8(#[from] Utf8Error),

    /// The stream ended in the middle of a multi-byte UTF-8 sequence.
    #[error("event stream ended inside a UTF-8 sequence")]
    IncompleteUtf8,
}

impl<E> EventStreamError<E> {
    /// Returns `true` if the error came from the underlying transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the error is a decoding failure.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Utf8(_) | Self::IncompleteUtf8)
    }
}
