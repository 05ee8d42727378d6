//! Incremental UTF-8 decoding for chunked byte streams.

use core::str::{self, Utf8Error};

use bytes::BytesMut;

/// Decodes UTF-8 chunk by chunk.
///
/// A multi-byte sequence cut by a chunk boundary is carried over to the next
/// chunk; any other invalid sequence is an error.
#[derive(Debug, Default)]
pub(crate) struct Utf8Decoder {
    carry: BytesMut,
}

impl Utf8Decoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk`, appending the complete text to `out`.
    pub(crate) fn decode(&mut self, chunk: &[u8], out: &mut String) -> Result<(), Utf8Error> {
        if self.carry.is_empty() {
            let tail = push_valid(chunk, out)?;
            self.carry.extend_from_slice(tail);
        } else {
            self.carry.extend_from_slice(chunk);
            let input = self.carry.split();
            let tail = push_valid(&input, out)?;
            self.carry.extend_from_slice(tail);
        }
        Ok(())
    }

    /// Returns `true` if bytes of an unfinished sequence are buffered.
    pub(crate) fn has_incomplete(&self) -> bool {
        !self.carry.is_empty()
    }
}

/// Appends the longest valid prefix of `bytes` to `out` and returns the
/// trailing incomplete sequence, if any.
fn push_valid<'a>(bytes: &'a [u8], out: &mut String) -> Result<&'a [u8], Utf8Error> {
    match str::from_utf8(bytes) {
        Ok(text) => {
            out.push_str(text);
            Ok(&[][..])
        }
        Err(e) if e.error_len().is_none() => {
            let (valid, tail) = bytes.split_at(e.valid_up_to());
            out.push_str(str::from_utf8(valid)?);
            Ok(tail)
        }
        Err(e) => Err(e),
    }
}
