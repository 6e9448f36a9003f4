//! The term buffer, and parsers for the text formats found in terms.
//!
//! Parsers are best-effort: they read as much of a term as fits the expected
//! format and stop at the first byte that does not, so malformed input yields
//! a default (usually zero) rather than an error.

use heapless::{String, Vec};

/// Maximum number of bytes kept from a single term.
pub const TERM_CAPACITY: usize = 15;

/// A bounded buffer accumulating the bytes of the current term.
///
/// Bytes beyond [`TERM_CAPACITY`] are dropped.
#[derive(Debug, Default, Clone)]
pub struct Term(Vec<u8, TERM_CAPACITY>);

impl Term {
    /// An empty buffer.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a byte, returning `false` if it was dropped.
    pub fn push(&mut self, b: u8) -> bool {
        self.0.push(b).is_ok()
    }

    /// Discard the accumulated bytes.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The accumulated bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether no byte has been kept.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Angle in the raw form carried by NMEA sentences.
///
/// `billionths` holds the fractional part of the angle, in billionths of a
/// degree, so that no precision is lost to floating point while decoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawDegrees {
    /// Whole degrees.
    pub deg: u16,
    /// Fractional degrees, in billionths.
    pub billionths: u32,
    /// South of the equator, or west of Greenwich.
    pub negative: bool,
}

impl RawDegrees {
    /// Signed decimal degrees.
    pub fn to_degrees(&self) -> f64 {
        let value = self.deg as f64 + self.billionths as f64 / 1_000_000_000.0;
        if self.negative { -value } else { value }
    }
}

/// Parse an unsigned integer from the leading digits of a term.
///
/// Returns zero for empty or non-numeric terms. Values too large for a `u32`
/// wrap.
pub fn parse_u32(term: &[u8]) -> u32 {
    term.iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, b| acc.wrapping_mul(10).wrapping_add((b - b'0') as u32))
}

/// Parse a (possibly negative) decimal with up to two fractional digits,
/// `-xxxx.yy`, into hundredths.
///
/// Further fractional digits are ignored rather than rounded.
pub fn parse_decimal(term: &[u8]) -> i32 {
    let (negative, term) = match term {
        [b'-', rest @ ..] => (true, rest),
        _ => (false, term),
    };

    let digits = term.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut value = (parse_u32(term) as i32).wrapping_mul(100);

    if let [b'.', tenths, rest @ ..] = &term[digits..] {
        if tenths.is_ascii_digit() {
            value = value.wrapping_add(10 * (tenths - b'0') as i32);

            if let [hundredths, ..] = rest {
                if hundredths.is_ascii_digit() {
                    value = value.wrapping_add((hundredths - b'0') as i32);
                }
            }
        }
    }

    if negative { value.wrapping_neg() } else { value }
}

/// Parse an angle in the `DDDMM.MMMM` format used for latitude and longitude.
///
/// The hemisphere is carried by a separate term, so the result is always
/// positive.
pub fn parse_degrees(term: &[u8]) -> RawDegrees {
    let left_of_decimal = parse_u32(term);
    let minutes = left_of_decimal % 100;

    let mut multiplier = 10_000_000u32;
    let mut ten_millionths_of_minutes = minutes * multiplier;

    let digits = term.iter().take_while(|b| b.is_ascii_digit()).count();

    if let [b'.', fraction @ ..] = &term[digits..] {
        for b in fraction.iter().take_while(|b| b.is_ascii_digit()) {
            multiplier /= 10;
            ten_millionths_of_minutes += (b - b'0') as u32 * multiplier;
        }
    }

    RawDegrees {
        deg: (left_of_decimal / 100) as u16,
        billionths: ((5 * ten_millionths_of_minutes as u64 + 1) / 3) as u32,
        negative: false,
    }
}

/// Copy the ASCII prefix of a term into a fixed-capacity string.
///
/// Stops at the first non-ASCII byte, or once the string is full.
pub fn to_text<const N: usize>(term: &[u8]) -> String<N> {
    let mut text = String::new();

    for &b in term {
        if !b.is_ascii() || text.push(b as char).is_err() {
            break;
        }
    }

    text
}
