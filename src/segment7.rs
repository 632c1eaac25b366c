//! 7-segment glyph encoding
//!
//! Maps characters to segment bitmasks. Bit 0 lights segment `a`, bit 6 lights
//! segment `g`, following the TM1640 SEG1..SEG7 outputs:
//!
//! ```text
//!    aaa
//!   f   b
//!   f   b
//!    ggg
//!   e   c
//!   e   c
//!    ddd  (dp)
//! ```
//!
//! Bit 7 drives the decimal point and is never set by the glyph table; see
//! [`DECIMAL_POINT`].
//!
//! Several glyphs are deliberately odd (`K`, `M`, `V`, `W`, `S`, `Z`) and some are
//! shared between characters (`[`, `(` and `C`; `|` and `I`; `O` and `0`).
//!
//! ## Example
//!
//! ```
//! use tm1640::segment7::{encode, encode_text, DECIMAL_POINT};
//!
//! assert_eq!(encode('1'), 0b000_0110);
//! // No uppercase 'B' in the table, falls back to 'b'
//! assert_eq!(encode('B'), encode('b'));
//! // Anything unknown is blank
//! assert_eq!(encode('\u{1F600}'), 0);
//!
//! let (frame, _) = encode_text("1.2");
//! assert_eq!(frame[0], encode('1') | DECIMAL_POINT);
//! assert_eq!(frame[1], encode('2'));
//! ```

use crate::error::WriteStatus;

/// Number of digit positions on a TM1640
pub const DIGITS: usize = 16;

/// One segment pattern per digit position, indexed by address
pub type Frame = [u8; DIGITS];

/// Decimal point bit, OR'ed into a glyph
pub const DECIMAL_POINT: u8 = 0b1000_0000;

/// All segments off
pub const BLANK: u8 = 0b000_0000;

/// Exact-match lookup into the glyph table
#[rustfmt::skip]
const fn lookup(c: char) -> Option<u8> {
    let bits = match c {
        '0' | '🯰' | 'O' => 0b011_1111,
        '1' | '🯱' => 0b000_0110,
        '2' | '🯲' => 0b101_1011,
        '3' | '🯳' => 0b100_1111,
        '4' | '🯴' => 0b110_0110,
        '5' | '🯵' => 0b110_1101,
        '6' | '🯶' => 0b111_1101,
        '7' => 0b000_0111,
        '🯷' => 0b010_0111,
        '8' | '🯸' => 0b111_1111,
        '9' | '🯹' => 0b110_1111,

        ' ' => BLANK,
        '_' => 0b000_1000,
        '=' => 0b100_1000,
        '⁐' | 'ニ' => 0b000_1001,
        '≡' => 0b100_1001,
        '-' => 0b100_0000,
        '¯' | '‾' => 0b000_0001,
        ':' => 0b100_0001,
        ';' => 0b100_0101,
        ',' => 0b100_0100,
        '"' => 0b010_0010,
        '\'' => 0b010_0000,
        '`' => 0b000_0010,
        '‘' => 0b110_0000,
        '’' => 0b000_0011,
        '^' => 0b010_0011,
        '°' => 0b110_0011,
        '[' | '(' | 'C' => 0b011_1001,
        ']' | ')' => 0b000_1111,
        '/' => 0b101_0010,
        '\\' => 0b110_0100,
        '|' | 'I' => 0b011_0000,
        '‖' => 0b011_0110,
        '⊦' | '⊢' => 0b111_0000,
        '⊣' => 0b100_0110,
        '⌈' | '⎾' | '⎡' => 0b011_0001,
        '⌉' | '⏋' | '⎤' => 0b000_0111,
        '⌊' | '⎿' | '⎣' | 'L' => 0b011_1000,
        '⌋' | '⏌' | '⎦' => 0b000_1110,
        '⌜' => 0b010_0001,
        '⌝' => 0b000_0011,
        '⌞' => 0b001_1000,
        '⌟' => 0b000_1100,
        '⌌' | 'r' => 0b101_0000,
        '⌍' => 0b100_0100,
        '⌎' => 0b110_0000,
        '⌏' => 0b100_0010,
        '⎢' => 0b011_0000,
        '⎥' => 0b000_0110,
        '⊏' => 0b110_0001,
        '⊑' => 0b110_1001,
        '⊐' => 0b100_0011,
        '⊒' => 0b100_1011,
        '⊓' => 0b010_0011,
        '⊔' => 0b110_0010,
        '⋂' => 0b011_0111,
        '⋃' | 'U' => 0b011_1110,
        '?' => 0b101_0011,
        '@' => 0b011_1011,

        'A' => 0b111_0111,
        'a' => 0b101_1111,
        'b' => 0b111_1100,
        'c' => 0b101_1000,
        'd' => 0b101_1110,
        'E' => 0b111_1001,
        'e' => 0b111_1011,
        'F' => 0b111_0001,
        'G' => 0b011_1101,
        'H' => 0b111_0110,
        'h' => 0b111_0100,
        'i' => 0b001_0000,
        'J' => 0b001_1110,
        'K' => 0b111_0101,
        'M' => 0b001_0101,
        'n' => 0b101_0100,
        'o' => 0b101_1100,
        'P' => 0b111_0011,
        'q' => 0b110_0111,
        'S' => 0b010_1101,
        't' => 0b111_1000,
        'u' => 0b001_1100,
        'V' => 0b010_1010,
        'W' => 0b001_1101,
        'x' => 0b100_1001,
        'y' => 0b110_1110,
        'Z' => 0b001_1011,
        _ => return None,
    };
    Some(bits)
}

/// Returns the case mapping only when it is a single `char`
///
/// Mappings such as `ß` -> `SS` can never match a glyph.
fn single<I: Iterator<Item = char>>(mut mapped: I) -> Option<char> {
    let first = mapped.next()?;
    match mapped.next() {
        None => Some(first),
        Some(_) => None,
    }
}

/// Encode a single character as a 7-segment bitmask
///
/// Tries the exact character, then its uppercase form, then its lowercase
/// form. Characters with no glyph encode as [`BLANK`]. The result never has
/// [`DECIMAL_POINT`] set.
pub fn encode(c: char) -> u8 {
    lookup(c)
        .or_else(|| single(c.to_uppercase()).and_then(lookup))
        .or_else(|| single(c.to_lowercase()).and_then(lookup))
        .or(lookup(' '))
        .unwrap_or(BLANK)
}

/// Render text into a full display frame
///
/// Each character fills the next digit, except `.` which lights the decimal
/// point of the digit before it (and is ignored at the very start). Once all
/// [`DIGITS`] positions are filled, a trailing `.` still applies to the last
/// digit; the first further character stops rendering and the status reports
/// how many characters were dropped.
pub fn encode_text(text: &str) -> (Frame, WriteStatus) {
    let mut frame = [BLANK; DIGITS];
    let mut filled = 0;

    for (consumed, c) in text.chars().enumerate() {
        if c == '.' {
            if filled > 0 {
                frame[filled - 1] |= DECIMAL_POINT;
            }
            continue;
        }
        if filled >= DIGITS {
            let dropped = text.chars().count() - consumed;
            return (frame, WriteStatus::Truncated { dropped });
        }
        frame[filled] = encode(c);
        filled += 1;
    }

    (frame, WriteStatus::Complete)
}
