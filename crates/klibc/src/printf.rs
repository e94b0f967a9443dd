//! Formatting driver: streams a template plus a typed argument list into a
//! byte sink.
//!
//! The variadic cursor of a classic printf is replaced by an ordered slice of
//! tagged [`Value`]s built by the caller. The engine pulls one slot per
//! non-literal conversion, strictly left to right; a parsed positional index
//! never redirects the fetch. Converted payloads are assembled in fixed stack
//! buffers, so the engine performs no allocation.

use crate::convspec::{self, Conv, ConvFlags, ConvSpec, LengthMod, Token};
use crate::string;

/// Sink write failure. The engine aborts on the first failed write and
/// reports the byte count accumulated so far; already-emitted bytes are not
/// rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkError;

/// External byte consumer. Called multiple times per formatting operation;
/// a short count is accepted as-is and never retried.
pub trait ByteSink {
    fn write(&mut self, buf: &[u8]) -> Result<usize, SinkError>;
}

/// One argument slot. Integer slots carry the widest representation; the
/// length modifier on the conversion decides how many low bits are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Char(u8),
    Int(i64),
    Uint(u64),
    /// Byte sequence; an embedded NUL terminates it early, like the C
    /// original's sentinel scan.
    Str(&'a [u8]),
}

impl Value<'_> {
    fn as_byte(&self) -> Option<u8> {
        match *self {
            Value::Char(c) => Some(c),
            Value::Int(v) => Some(v as u8),
            Value::Uint(v) => Some(v as u8),
            Value::Str(_) => None,
        }
    }

    fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Char(c) => Some(c as i64),
            Value::Int(v) => Some(v),
            Value::Uint(v) => Some(v as i64),
            Value::Str(_) => None,
        }
    }

    fn as_uint(&self) -> Option<u64> {
        match *self {
            Value::Char(c) => Some(c as u64),
            Value::Int(v) => Some(v as u64),
            Value::Uint(v) => Some(v),
            Value::Str(_) => None,
        }
    }

    fn as_str(&self) -> Option<&[u8]> {
        match *self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Conversion scratch size: enough for the widest supported integer in the
/// smallest emitted base (22 octal digits) plus sign or radix prefix.
const CONV_BUF_LEN: usize = 64;

/// Fill bytes are emitted from a fixed chunk, one sink call per chunk, so a
/// small pad is a single call.
const FILL_CHUNK_LEN: usize = 32;

/// Formats `fmt`, pulling arguments from `args` and streaming the result
/// through `sink`. Returns the total number of bytes written; on a malformed
/// specifier, an exhausted or mismatched argument slot, or a sink failure,
/// formatting stops silently and the count covers only what was emitted.
pub fn format(fmt: &[u8], args: &[Value<'_>], sink: &mut dyn ByteSink) -> usize {
    let mut written = 0;
    let mut rem = fmt;
    let mut next_arg = 0;

    while !rem.is_empty() {
        let (spec, skip) = match convspec::parse(rem) {
            Ok(Token::Literal(len)) => {
                match sink.write(&rem[..len]) {
                    Ok(n) => written += n,
                    Err(SinkError) => break,
                }
                rem = &rem[len..];
                continue;
            }
            Ok(Token::Spec { spec, len }) => (spec, len),
            Err(_) => break,
        };

        let mut buf = [0u8; CONV_BUF_LEN];
        let payload: &[u8] = match spec.conv {
            Conv::Percent => b"%",
            Conv::Char => {
                let Some(byte) = pull(args, &mut next_arg, Value::as_byte) else {
                    break;
                };
                buf[0] = byte;
                &buf[..1]
            }
            Conv::Str => {
                let Some(s) = pull(args, &mut next_arg, Value::as_str) else {
                    break;
                };
                let mut len = string::cstr_len(s);
                if let Some(prec) = spec.prec {
                    // Precision caps the number of bytes taken from the
                    // argument.
                    len = len.min(prec as usize);
                }
                &s[..len]
            }
            Conv::SignedDec => {
                let Some(value) = pull(args, &mut next_arg, Value::as_int) else {
                    break;
                };
                let len = render_signed(truncate_signed(value, spec.length), spec.flags, &mut buf);
                &buf[..len]
            }
            Conv::Unsigned { base, upper } => {
                let Some(value) = pull(args, &mut next_arg, Value::as_uint) else {
                    break;
                };
                let value = truncate_unsigned(value, spec.length);
                let len = render_unsigned(value, base, upper, spec.flags, &mut buf);
                &buf[..len]
            }
        };

        // Up to three independent sink calls: leading pad, payload, trailing
        // pad. A failure on any of them ends the whole operation.
        if pad(&spec, payload.len(), PadSide::Leading, sink, &mut written).is_err() {
            break;
        }
        match sink.write(payload) {
            Ok(n) => written += n,
            Err(SinkError) => break,
        }
        if pad(&spec, payload.len(), PadSide::Trailing, sink, &mut written).is_err() {
            break;
        }
        rem = &rem[skip..];
    }

    written
}

/// Pulls the next argument slot and projects it through `view`. `None` (slot
/// list exhausted, or the slot's type does not fit the conversion) stops the
/// engine.
fn pull<'a, T>(
    args: &'a [Value<'a>],
    next_arg: &mut usize,
    view: impl Fn(&'a Value<'a>) -> Option<T>,
) -> Option<T> {
    let value = args.get(*next_arg).and_then(view);
    *next_arg += 1;
    value
}

/// Reduce a pulled integer to the width the length class implies. Without a
/// modifier the argument is the default 32-bit integer; `long` and wider are
/// 64 bits on this LP64 target.
fn truncate_signed(value: i64, length: Option<LengthMod>) -> i64 {
    match length {
        Some(LengthMod::Char) => value as i8 as i64,
        Some(LengthMod::Short) => value as i16 as i64,
        None => value as i32 as i64,
        // LongDouble is rejected by the specifier parser.
        Some(_) => value,
    }
}

fn truncate_unsigned(value: u64, length: Option<LengthMod>) -> u64 {
    match length {
        Some(LengthMod::Char) => value as u8 as u64,
        Some(LengthMod::Short) => value as u16 as u64,
        None => value as u32 as u64,
        Some(_) => value,
    }
}

/// Decimal digits most-significant first, with the sign or positive-prefix
/// byte in front. Zero renders as "0"; the plus/space prefixes still apply to
/// it as a non-negative value. The sign always wins over the space flag.
fn render_signed(value: i64, flags: ConvFlags, buf: &mut [u8; CONV_BUF_LEN]) -> usize {
    let mut len = 0;
    if value < 0 {
        buf[len] = b'-';
        len += 1;
    } else if flags.contains(ConvFlags::PLUS) {
        buf[len] = b'+';
        len += 1;
    } else if flags.contains(ConvFlags::SPACE) {
        buf[len] = b' ';
        len += 1;
    }
    len + render_digits(value.unsigned_abs(), 10, false, &mut buf[len..])
}

/// Unsigned digits in the conversion's base. The alternate form prepends the
/// radix prefix unconditionally, including for a zero value.
fn render_unsigned(value: u64, base: u8, upper: bool, flags: ConvFlags, buf: &mut [u8; CONV_BUF_LEN]) -> usize {
    let mut len = 0;
    if flags.contains(ConvFlags::ALTERNATE) && base == 16 {
        buf[0] = b'0';
        buf[1] = if upper { b'X' } else { b'x' };
        len = 2;
    }
    len + render_digits(value, base, upper, &mut buf[len..])
}

fn render_digits(mut value: u64, base: u8, upper: bool, buf: &mut [u8]) -> usize {
    let digits: &[u8; 16] = if upper { b"0123456789ABCDEF" } else { b"0123456789abcdef" };
    if value == 0 {
        buf[0] = b'0';
        return 1;
    }
    let mut rev = [0u8; CONV_BUF_LEN];
    let mut n = 0;
    while value > 0 {
        rev[n] = digits[(value % base as u64) as usize];
        n += 1;
        value /= base as u64;
    }
    let mut len = 0;
    while n > 0 {
        n -= 1;
        buf[len] = rev[n];
        len += 1;
    }
    len
}

#[derive(PartialEq, Eq)]
enum PadSide {
    Leading,
    Trailing,
}

/// Emits fill bytes when the field width exceeds the payload. Leading fill is
/// `'0'` under the zero flag, otherwise `' '`; trailing fill (left-justify)
/// is always spaces. Successfully written fill counts toward `written` even
/// when a later chunk fails.
fn pad(
    spec: &ConvSpec,
    payload_len: usize,
    side: PadSide,
    sink: &mut dyn ByteSink,
    written: &mut usize,
) -> Result<(), SinkError> {
    let left_justify = spec.flags.contains(ConvFlags::MINUS);
    if (side == PadSide::Leading) == left_justify {
        return Ok(());
    }
    let width = spec.width.unwrap_or(0) as usize;
    if width == 0 || payload_len > width {
        return Ok(());
    }
    let fill = if side == PadSide::Leading && spec.flags.contains(ConvFlags::ZERO) {
        b'0'
    } else {
        b' '
    };
    let chunk = [fill; FILL_CHUNK_LEN];
    let mut remaining = width - payload_len;
    while remaining > 0 {
        let n = remaining.min(FILL_CHUNK_LEN);
        *written += sink.write(&chunk[..n])?;
        remaining -= n;
    }
    Ok(())
}
