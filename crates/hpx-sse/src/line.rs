//! Incremental line splitter.
//!
//! Turns text fragments of arbitrary size into complete logical lines. The
//! three legal terminators (CRLF, CR, LF) each end exactly one line, also when
//! a CRLF pair is split across two fragments.

use core::mem;

use crate::constants::{CR, DEFAULT_BUFFER_CAPACITY, LF};

/// Splits a chunked text stream into lines.
///
/// A line is never handed out before its terminator has been seen, and the
/// unterminated tail of the input is kept until the next fragment arrives.
#[derive(Debug, Clone)]
pub struct LineSplitter {
    buffer: String,
    /// The previous fragment ended in CR, so a LF opening the next fragment
    /// belongs to that terminator.
    pending_cr: bool,
}

impl Default for LineSplitter {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }
}

impl LineSplitter {
    /// Create an empty splitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty splitter whose buffer starts with `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            pending_cr: false,
        }
    }

    /// Feed one fragment, calling `on_line` for every line it completes, in
    /// order. Terminators are not part of the lines.
    pub fn push<F>(&mut self, fragment: &str, mut on_line: F)
    where
        F: FnMut(&str),
    {
        if fragment.is_empty() {
            return;
        }

        let mut rest = fragment;
        if mem::take(&mut self.pending_cr) && rest.as_bytes()[0] == LF {
            rest = &rest[1..];
        }

        while let Some(pos) = memchr::memchr2(CR, LF, rest.as_bytes()) {
            let terminator = rest.as_bytes()[pos];
            let line = &rest[..pos];

            if self.buffer.is_empty() {
                on_line(line);
            } else {
                self.buffer.push_str(line);
                on_line(&self.buffer);
                self.buffer.clear();
            }

            rest = &rest[pos + 1..];
            if terminator == CR {
                match rest.as_bytes().first() {
                    Some(&LF) => rest = &rest[1..],
                    Some(_) => {}
                    None => self.pending_cr = true,
                }
            }
        }

        self.buffer.push_str(rest);
    }

    /// Signal end of input.
    ///
    /// Returns the unterminated remainder as one last line if it is not empty.
    pub fn finish(&mut self) -> Option<String> {
        self.pending_cr = false;
        if self.buffer.is_empty() {
            None
        } else {
            Some(mem::take(&mut self.buffer))
        }
    }

    /// The buffered, not yet terminated tail of the input.
    pub fn remainder(&self) -> &str {
        &self.buffer
    }
}
