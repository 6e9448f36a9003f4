//! Helpers for computing and verifying sentence checksums.

/// Accumulate a slice of bytes into a parity value.
pub fn compute_parity(init: u8, r: &[u8]) -> u8 {
    r.iter().fold(init, |acc, b| parity_byte(acc, *b))
}

/// Accumulate a single byte into a parity value.
#[inline]
pub fn parity_byte(parity: u8, b: u8) -> u8 {
    parity ^ b
}

/// Decode the two hexadecimal digits of a checksum term.
///
/// Returns `None` unless the term starts with two hexadecimal digits (of
/// either case). Anything after them is ignored.
pub fn parse_checksum(term: &[u8]) -> Option<u8> {
    match term {
        [hi, lo, ..] => Some(from_hex(*hi)? << 4 | from_hex(*lo)?),
        _ => None,
    }
}

/// Check a checksum term against an accumulated parity value.
pub fn verify(parity: u8, term: &[u8]) -> bool {
    parse_checksum(term) == Some(parity)
}

fn from_hex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
