//! Byte classification helpers shared by the parsers.

#[inline(always)]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Whitespace skipped before a numeric literal: space, tab, vertical tab,
/// line feed.
#[inline(always)]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\x0b' | b'\n')
}
