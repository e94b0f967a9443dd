//! Bounded integer parsing with base guessing and overflow clamping.
//!
//! A single parametrized routine backs the whole `strtol` family: callers
//! supply the representable range and get back the parsed value, the number
//! of bytes consumed and a status. The remainder of the input is recovered by
//! slicing at `consumed`; there is no out-of-band error channel.

use crate::ctype::{is_digit, is_space};

/// Representable range for a conversion. Unsigned targets use `min == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntBounds {
    pub min: i64,
    pub max: u64,
}

impl IntBounds {
    pub const I32: IntBounds = IntBounds { min: i32::MIN as i64, max: i32::MAX as u64 };
    pub const U32: IntBounds = IntBounds { min: 0, max: u32::MAX as u64 };
    pub const I64: IntBounds = IntBounds { min: i64::MIN, max: i64::MAX as u64 };
    pub const U64: IntBounds = IntBounds { min: 0, max: u64::MAX };

    fn is_signed(&self) -> bool {
        self.min < 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntStatus {
    Ok,
    /// No digit was consumed. Also reported for a `-` sign when the target
    /// range cannot represent negative values; nothing is consumed either way.
    NoConversion,
    /// Explicit base outside [2, 36], or base guessing found no usable prefix.
    InvalidBase,
    /// The value exceeded the representable range and was clamped to the
    /// extreme for its sign.
    OutOfRange,
}

/// Parse result. `value` holds the two's-complement bit pattern; unsigned
/// callers reinterpret it through [`IntParse::unsigned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntParse {
    pub value: i64,
    pub consumed: usize,
    pub status: IntStatus,
}

impl IntParse {
    pub fn unsigned(&self) -> u64 {
        self.value as u64
    }

    fn fail(status: IntStatus) -> IntParse {
        IntParse { value: 0, consumed: 0, status }
    }
}

/// Converts a prefix of `text` into an integer within `bounds`.
///
/// Leading whitespace is skipped, an optional `+`/`-` sign is honored, and a
/// `base` of 0 requests base guessing from the literal's prefix. Digits are
/// accumulated one at a time with overflow detected before the digit is
/// committed: on overflow the result clamps to the extreme for the parsed
/// sign and the overflowing digit (and everything after it) stays unconsumed.
pub fn parse_int(text: &[u8], base: u32, bounds: IntBounds) -> IntParse {
    let mut pos = 0;
    while pos < text.len() && is_space(text[pos]) {
        pos += 1;
    }

    let mut negative = false;
    match text.get(pos) {
        Some(b'-') => {
            if !bounds.is_signed() {
                return IntParse::fail(IntStatus::NoConversion);
            }
            negative = true;
            pos += 1;
        }
        Some(b'+') => pos += 1,
        _ => {}
    }

    let base = if base == 0 {
        match guess_base(&text[pos..]) {
            Some((guessed, skip)) => {
                pos += skip;
                guessed
            }
            None => return IntParse::fail(IntStatus::InvalidBase),
        }
    } else if !(2..=36).contains(&base) {
        return IntParse::fail(IntStatus::InvalidBase);
    } else {
        base
    };

    // Accumulate the magnitude against the bound for the parsed sign; this
    // keeps the asymmetric two's-complement range exact (e.g. i64::MIN).
    let limit: u64 = if negative { bounds.min.unsigned_abs() } else { bounds.max };
    let mut magnitude: u64 = 0;
    let mut any_digit = false;
    while pos < text.len() {
        let digit = match digit_value(text[pos], base) {
            Some(d) => d as u64,
            None => break,
        };
        let next = magnitude
            .checked_mul(base as u64)
            .and_then(|m| m.checked_add(digit))
            .filter(|&m| m <= limit);
        magnitude = match next {
            Some(m) => m,
            None => {
                let value = if negative { bounds.min } else { bounds.max as i64 };
                return IntParse { value, consumed: pos, status: IntStatus::OutOfRange };
            }
        };
        any_digit = true;
        pos += 1;
    }

    if !any_digit {
        // Restore to the original start, including past a recognized base
        // prefix such as "0x".
        return IntParse::fail(IntStatus::NoConversion);
    }

    let value = if negative {
        (magnitude as i64).wrapping_neg()
    } else {
        magnitude as i64
    };
    IntParse { value, consumed: pos, status: IntStatus::Ok }
}

/// Infer the radix from the literal's prefix: `0x`/`0X` is hexadecimal, a
/// zero followed by another digit is octal, any other leading decimal digit
/// is decimal. A lone `0`, or anything else, fails the guess.
fn guess_base(text: &[u8]) -> Option<(u32, usize)> {
    match text {
        [b'0', b'x' | b'X', ..] => Some((16, 2)),
        [b'0', rest @ ..] if rest.first().copied().is_some_and(is_digit) => Some((8, 1)),
        [b, ..] if *b != b'0' && is_digit(*b) => Some((10, 0)),
        _ => None,
    }
}

fn digit_value(b: u8, base: u32) -> Option<u32> {
    let value = match b {
        b'0'..=b'9' => (b - b'0') as u32,
        b'a'..=b'z' => (b - b'a') as u32 + 10,
        b'A'..=b'Z' => (b - b'A') as u32 + 10,
        _ => return None,
    };
    if value < base { Some(value) } else { None }
}

pub fn parse_i64(text: &[u8], base: u32) -> IntParse {
    parse_int(text, base, IntBounds::I64)
}

pub fn parse_u64(text: &[u8], base: u32) -> IntParse {
    parse_int(text, base, IntBounds::U64)
}

pub fn parse_i32(text: &[u8], base: u32) -> IntParse {
    parse_int(text, base, IntBounds::I32)
}

pub fn parse_u32(text: &[u8], base: u32) -> IntParse {
    parse_int(text, base, IntBounds::U32)
}
