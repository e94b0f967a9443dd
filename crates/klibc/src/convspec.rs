//! Conversion-specifier grammar for the format engine.
//!
//! One call to [`parse`] recognizes a single unit of a format template:
//! either a run of literal bytes up to the next `%` (or the end), or one
//! `%`-introduced conversion specifier. The optional positional index, field
//! width and precision sub-fields all go through the numeric parser; a
//! sub-field that fails to match is simply absent, never an error on its own.
//! Validation against the per-conversion compatibility table happens last and
//! rejects the whole specifier.

use bitflags::bitflags;

use crate::strtoint::{IntBounds, IntStatus, parse_int};

bitflags! {
    /// Flags modifying a conversion. Each flag is settable at most once per
    /// specifier; re-encountering a set flag terminates flag scanning.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ConvFlags: u8 {
        /// `#`: alternate form; prepends `0x`/`0X` for hexadecimal output.
        const ALTERNATE = 1 << 1;
        /// ` `: space before a positive signed number.
        const SPACE = 1 << 2;
        /// `+`: plus sign before a positive signed number.
        const PLUS = 1 << 3;
        /// `0`: pad with leading zeros instead of spaces.
        const ZERO = 1 << 4;
        /// `-`: left-justify within the field width.
        const MINUS = 1 << 5;
    }
}

/// Argument length modifier. `h` maps to Short and `hh` to Char (the
/// conventional C mapping; earlier iterations of this engine disagreed on the
/// direction, so the choice is pinned here and in the tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMod {
    Char,
    Short,
    Long,
    LongLong,
    Max,
    Size,
    PtrDiff,
    LongDouble,
}

/// Implemented conversion kinds. Unsigned conversions carry their radix and
/// digit case (`u` 10, `o` 8, `x`/`X` 16).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conv {
    Percent,
    Char,
    Str,
    SignedDec,
    Unsigned { base: u8, upper: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecError {
    /// Malformed specifier, or a field present where the conversion forbids
    /// it (mutually exclusive flags both set, disallowed length class, ...).
    Syntax,
    /// Recognized conversion character that this engine does not implement
    /// (floating point, pointer, count-output, ...).
    Unsupported,
}

/// A fully validated conversion specifier. Optional sub-fields are absent
/// when their syntax did not match.
///
/// The positional index is parsed and validated but the engine never honors
/// it for out-of-order fetch; arguments are always consumed in template
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvSpec {
    pub argno: Option<u64>,
    pub flags: ConvFlags,
    pub width: Option<u64>,
    pub prec: Option<u64>,
    pub length: Option<LengthMod>,
    pub conv: Conv,
}

/// One recognized unit of a format template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Count of literal bytes up to the next `%` or the end of the template.
    Literal(usize),
    /// A conversion specifier and the number of template bytes it spans.
    Spec { spec: ConvSpec, len: usize },
}

/// Parses the next token of `fmt`. A validation failure consumes nothing;
/// the caller discards the whole attempt.
pub fn parse(fmt: &[u8]) -> Result<Token, SpecError> {
    if fmt.first() != Some(&b'%') {
        let len = fmt.iter().position(|&b| b == b'%').unwrap_or(fmt.len());
        return Ok(Token::Literal(len));
    }

    // Skip the introducing '%'.
    let mut pos = 1;
    let mut spec = ConvSpec {
        argno: None,
        flags: ConvFlags::empty(),
        width: None,
        prec: None,
        length: None,
        conv: Conv::Percent,
    };

    pos += parse_argno(&fmt[pos..], &mut spec);
    pos += parse_flags(&fmt[pos..], &mut spec);
    pos += parse_width(&fmt[pos..], &mut spec);
    pos += parse_prec(&fmt[pos..], &mut spec);
    pos += parse_length(&fmt[pos..], &mut spec);

    let conv_char = *fmt.get(pos).ok_or(SpecError::Syntax)?;
    spec.conv = validate(conv_char, &spec)?;
    pos += 1;

    Ok(Token::Spec { spec, len: pos })
}

/// `digits '$'`. Absent unless both the number and the trailing `$` match.
fn parse_argno(fmt: &[u8], spec: &mut ConvSpec) -> usize {
    let parsed = parse_int(fmt, 10, IntBounds::U64);
    if !matches!(parsed.status, IntStatus::Ok | IntStatus::OutOfRange) {
        return 0;
    }
    if fmt.get(parsed.consumed) != Some(&b'$') {
        return 0;
    }
    spec.argno = Some(parsed.unsigned());
    parsed.consumed + 1
}

fn parse_flags(fmt: &[u8], spec: &mut ConvSpec) -> usize {
    for (count, &b) in fmt.iter().enumerate() {
        let flag = match b {
            b'#' => ConvFlags::ALTERNATE,
            b' ' => ConvFlags::SPACE,
            b'+' => ConvFlags::PLUS,
            b'0' => ConvFlags::ZERO,
            b'-' => ConvFlags::MINUS,
            _ => return count,
        };
        if spec.flags.contains(flag) {
            // Already set: stop scanning, the byte belongs to the next part.
            return count;
        }
        spec.flags.insert(flag);
    }
    fmt.len()
}

fn parse_width(fmt: &[u8], spec: &mut ConvSpec) -> usize {
    let parsed = parse_int(fmt, 10, IntBounds::U64);
    if !matches!(parsed.status, IntStatus::Ok | IntStatus::OutOfRange) || parsed.consumed == 0 {
        return 0;
    }
    spec.width = Some(parsed.unsigned());
    parsed.consumed
}

/// `'.' digits`. A `.` with no following digits is accepted and yields
/// precision 0.
fn parse_prec(fmt: &[u8], spec: &mut ConvSpec) -> usize {
    if fmt.first() != Some(&b'.') {
        return 0;
    }
    let parsed = parse_int(&fmt[1..], 10, IntBounds::U64);
    if matches!(parsed.status, IntStatus::Ok | IntStatus::OutOfRange) {
        spec.prec = Some(parsed.unsigned());
        1 + parsed.consumed
    } else {
        spec.prec = Some(0);
        1
    }
}

fn parse_length(fmt: &[u8], spec: &mut ConvSpec) -> usize {
    let (length, len) = match fmt {
        [b'h', b'h', ..] => (LengthMod::Char, 2),
        [b'h', ..] => (LengthMod::Short, 1),
        [b'l', b'l', ..] => (LengthMod::LongLong, 2),
        [b'l', ..] => (LengthMod::Long, 1),
        [b'j', ..] => (LengthMod::Max, 1),
        [b'z', ..] => (LengthMod::Size, 1),
        [b't', ..] => (LengthMod::PtrDiff, 1),
        [b'L', ..] => (LengthMod::LongDouble, 1),
        _ => return 0,
    };
    spec.length = Some(length);
    len
}

/// Compatibility table: which flags, length classes and precision each
/// conversion character tolerates. Any violation rejects the specifier.
fn validate(conv_char: u8, spec: &ConvSpec) -> Result<Conv, SpecError> {
    match conv_char {
        b'%' => {
            // The bare '%' specifier tolerates no modifiers at all.
            if spec.argno.is_some()
                || !spec.flags.is_empty()
                || spec.width.is_some()
                || spec.prec.is_some()
                || spec.length.is_some()
            {
                return Err(SpecError::Syntax);
            }
            Ok(Conv::Percent)
        }

        b'c' => {
            if spec.prec.is_some() {
                return Err(SpecError::Syntax);
            }
            check_text_parts(spec)?;
            Ok(Conv::Char)
        }

        b's' => {
            // Precision is allowed: maximum bytes taken from the argument.
            check_text_parts(spec)?;
            Ok(Conv::Str)
        }

        b'd' => {
            if spec.flags.contains(ConvFlags::ALTERNATE) {
                return Err(SpecError::Syntax);
            }
            check_sign_exclusion(spec)?;
            check_justify_exclusion(spec)?;
            check_integer_length(spec)?;
            Ok(Conv::SignedDec)
        }

        b'u' | b'o' | b'x' | b'X' => {
            // '#' is only meaningful for the hexadecimal conversions.
            if conv_char != b'x' && conv_char != b'X' && spec.flags.contains(ConvFlags::ALTERNATE)
            {
                return Err(SpecError::Syntax);
            }
            if spec.flags.intersects(ConvFlags::SPACE | ConvFlags::PLUS) {
                return Err(SpecError::Syntax);
            }
            check_justify_exclusion(spec)?;
            check_integer_length(spec)?;
            let base = match conv_char {
                b'u' => 10,
                b'o' => 8,
                _ => 16,
            };
            Ok(Conv::Unsigned { base, upper: conv_char == b'X' })
        }

        b'a' | b'A' | b'D' | b'e' | b'E' | b'f' | b'F' | b'g' | b'G' | b'i' | b'n' | b'p'
        | b'O' | b'U' => Err(SpecError::Unsupported),

        _ => Err(SpecError::Syntax),
    }
}

/// `c` and `s` support only the `-` flag and only the `l` length modifier
/// (or none).
fn check_text_parts(spec: &ConvSpec) -> Result<(), SpecError> {
    if spec
        .flags
        .intersects(ConvFlags::ALTERNATE | ConvFlags::SPACE | ConvFlags::PLUS | ConvFlags::ZERO)
    {
        return Err(SpecError::Syntax);
    }
    match spec.length {
        None | Some(LengthMod::Long) => Ok(()),
        Some(_) => Err(SpecError::Syntax),
    }
}

/// ` ` and `+` are mutually exclusive.
fn check_sign_exclusion(spec: &ConvSpec) -> Result<(), SpecError> {
    if spec.flags.contains(ConvFlags::SPACE) && spec.flags.contains(ConvFlags::PLUS) {
        return Err(SpecError::Syntax);
    }
    Ok(())
}

/// `-` and `0` are mutually exclusive.
fn check_justify_exclusion(spec: &ConvSpec) -> Result<(), SpecError> {
    if spec.flags.contains(ConvFlags::MINUS) && spec.flags.contains(ConvFlags::ZERO) {
        return Err(SpecError::Syntax);
    }
    Ok(())
}

/// Integer conversions accept every length class except `L`.
fn check_integer_length(spec: &ConvSpec) -> Result<(), SpecError> {
    match spec.length {
        Some(LengthMod::LongDouble) => Err(SpecError::Syntax),
        _ => Ok(()),
    }
}
