//! Common constants used across the parser.

use bytes_utils::Str;

/// Newline byte
pub(crate) const LF: u8 = b'\n';
/// Carriage return byte
pub(crate) const CR: u8 = b'\r';

// bom           = %xFEFF ; U+FEFF BYTE ORDER MARK
/// Byte order mark, stripped only when it opens the stream.
pub(crate) const BOM: char = '\u{FEFF}';

/// Empty instance of [`Str`], from an `&'static ""`
pub(crate) const EMPTY_STR: Str = Str::from_static("");
/// Default event type string (`"message"`)
pub(crate) const MESSAGE_STR: Str = Str::from_static("message");

/// Initial capacity of the line buffer when none is configured.
pub(crate) const DEFAULT_BUFFER_CAPACITY: usize = 1024;
