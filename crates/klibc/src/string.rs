//! Slice renditions of the elementary string utilities.

/// Length of a byte sequence up to (not counting) an embedded NUL. A slice
/// with no NUL is its own length.
pub fn cstr_len(buf: &[u8]) -> usize {
    let mut len = 0;
    while len < buf.len() && buf[len] != 0 {
        len += 1;
    }
    len
}

/// Lexicographic comparison with C `strcmp` semantics: negative, zero or
/// positive according to the first differing byte.
pub fn compare(a: &[u8], b: &[u8]) -> i32 {
    let mut i = 0;
    loop {
        let ca = a.get(i).copied().unwrap_or(0);
        let cb = b.get(i).copied().unwrap_or(0);
        if ca != cb || ca == 0 {
            return ca as i32 - cb as i32;
        }
        i += 1;
    }
}

/// Appends `src` after the populated prefix of `dst` (delimited by NUL or the
/// buffer end), copying at most as many bytes as fit. Returns the new
/// populated length.
pub fn concat(dst: &mut [u8], src: &[u8]) -> usize {
    let mut pos = cstr_len(dst);
    for &b in src {
        if pos >= dst.len() {
            break;
        }
        dst[pos] = b;
        pos += 1;
    }
    pos
}

pub fn fill(dst: &mut [u8], value: u8) {
    for b in dst.iter_mut() {
        *b = value;
    }
}
