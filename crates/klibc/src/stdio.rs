//! Entry points layered on the format engine.

use crate::printf::{ByteSink, SinkError, Value, format};
use crate::string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioError {
    /// The bounded and string-buffer variants are not implemented.
    Unsupported,
}

/// Unbounded formatted output through the given sink. Returns the number of
/// bytes written (possibly truncated on error, like the engine itself).
pub fn printf_to(sink: &mut dyn ByteSink, fmt: &[u8], args: &[Value<'_>]) -> usize {
    format(fmt, args, sink)
}

/// Bounded formatted output into a byte buffer. Unimplemented: a future
/// version can substitute a capped sink over `dest` for the hardware sink.
pub fn snprintf_to(
    _dest: &mut [u8],
    _fmt: &[u8],
    _args: &[Value<'_>],
) -> Result<usize, StdioError> {
    Err(StdioError::Unsupported)
}

/// Unbounded formatted output into a byte buffer. Unimplemented, as above.
pub fn sprintf_to(_dest: &mut [u8], _fmt: &[u8], _args: &[Value<'_>]) -> Result<usize, StdioError> {
    Err(StdioError::Unsupported)
}

/// Writes a byte sequence (up to an embedded NUL) through the sink.
pub fn put_str(sink: &mut dyn ByteSink, s: &[u8]) -> Result<usize, SinkError> {
    sink.write(&s[..string::cstr_len(s)])
}

pub fn put_char(sink: &mut dyn ByteSink, c: u8) -> Result<usize, SinkError> {
    sink.write(&[c])
}
