//! UTF-8 validation with detailed error reporting.
//!
//! This module provides UTF-8 validation that reports:
//! - The exact byte offset of the error
//! - The line number (1-indexed)
//! - The column number (1-indexed, in bytes)
//! - The specific type of UTF-8 violation
//!
//! ## Well-formed Byte Sequences
//!
//! | Code points          | Byte 1  | Byte 2  | Byte 3  | Byte 4  |
//! |----------------------|---------|---------|---------|---------|
//! | U+0000..U+007F       | 00..7F  |         |         |         |
//! | U+0080..U+07FF       | C2..DF  | 80..BF  |         |         |
//! | U+0800..U+0FFF       | E0      | A0..BF  | 80..BF  |         |
//! | U+1000..U+CFFF       | E1..EC  | 80..BF  | 80..BF  |         |
//! | U+D000..U+D7FF       | ED      | 80..9F  | 80..BF  |         |
//! | U+E000..U+FFFF       | EE..EF  | 80..BF  | 80..BF  |         |
//! | U+10000..U+3FFFF     | F0      | 90..BF  | 80..BF  | 80..BF  |
//! | U+40000..U+FFFFF     | F1..F3  | 80..BF  | 80..BF  | 80..BF  |
//! | U+100000..U+10FFFF   | F4      | 80..8F  | 80..BF  | 80..BF  |
//!
//! The restricted second-byte ranges reject overlong encodings (E0, F0),
//! surrogates (ED) and code points above U+10FFFF (F4) as soon as the second
//! byte is seen. The same scan is shared with
//! [`strip_invalid_utf8`](super::cleanup::strip_invalid_utf8), which drops the
//! maximal ill-formed subpart reported by a failed scan.

/// Error information for UTF-8 validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf8Error {
    /// The byte offset where the error occurred (0-indexed).
    pub offset: usize,
    /// The line number where the error occurred (1-indexed).
    pub line: usize,
    /// The column (byte position within the line, 1-indexed).
    pub column: usize,
    /// The kind of UTF-8 error.
    pub kind: Utf8ErrorKind,
}

impl Utf8Error {
    /// Build an error at `offset`, resolving line and column from `input`.
    fn at(input: &[u8], offset: usize, kind: Utf8ErrorKind) -> Self {
        let before = &input[..offset];
        let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |nl| nl + 1);

        Self {
            offset,
            line,
            column: offset - line_start + 1,
            kind,
        }
    }
}

impl core::fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} at byte {}, line {}, column {}",
            self.kind, self.offset, self.line, self.column
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Utf8Error {}

/// The specific type of UTF-8 validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8ErrorKind {
    /// A byte in the range 0x80-0xBF or 0xF8-0xFF appeared where a lead byte
    /// was expected.
    InvalidLeadByte,

    /// A byte outside the range 0x80-0xBF appeared where a continuation byte was expected.
    InvalidContinuationByte,

    /// A character was encoded using more bytes than necessary
    /// (lead bytes C0 and C1, or E0/F0 followed by a too-small second byte).
    OverlongEncoding,

    /// A surrogate code point (U+D800-U+DFFF) was encoded.
    SurrogateCodepoint,

    /// A code point above U+10FFFF was encoded (lead bytes F5-F7, or F4
    /// followed by 90-BF).
    OutOfRangeCodepoint,

    /// A multi-byte sequence was truncated at the end of input.
    TruncatedSequence,
}

impl core::fmt::Display for Utf8ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLeadByte => write!(f, "invalid UTF-8 lead byte"),
            Self::InvalidContinuationByte => write!(f, "invalid UTF-8 continuation byte"),
            Self::OverlongEncoding => write!(f, "overlong UTF-8 encoding"),
            Self::SurrogateCodepoint => write!(f, "surrogate code point in UTF-8"),
            Self::OutOfRangeCodepoint => write!(f, "code point above U+10FFFF"),
            Self::TruncatedSequence => write!(f, "truncated UTF-8 sequence"),
        }
    }
}

/// A failed scan of one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Malformed {
    /// Length of the maximal ill-formed subpart starting at the lead byte.
    pub(crate) skip: usize,
    /// Offset of the byte that made the sequence ill-formed.
    pub(crate) offset: usize,
    pub(crate) kind: Utf8ErrorKind,
}

/// Scan the sequence starting at `pos` (which must be in bounds).
///
/// Returns the length of the well-formed sequence, or the ill-formed subpart
/// to skip.
pub(crate) fn scan_sequence(input: &[u8], pos: usize) -> Result<usize, Malformed> {
    let lead = input[pos];
    let single = |kind| Malformed {
        skip: 1,
        offset: pos,
        kind,
    };

    let (len, lo, hi) = match lead {
        0x00..=0x7F => return Ok(1),
        0x80..=0xBF | 0xF8..=0xFF => return Err(single(Utf8ErrorKind::InvalidLeadByte)),
        0xC0 | 0xC1 => return Err(single(Utf8ErrorKind::OverlongEncoding)),
        0xF5..=0xF7 => return Err(single(Utf8ErrorKind::OutOfRangeCodepoint)),
        0xC2..=0xDF => (2, 0x80, 0xBF),
        0xE0 => (3, 0xA0, 0xBF),
        0xE1..=0xEC | 0xEE..=0xEF => (3, 0x80, 0xBF),
        0xED => (3, 0x80, 0x9F),
        0xF0 => (4, 0x90, 0xBF),
        0xF1..=0xF3 => (4, 0x80, 0xBF),
        0xF4 => (4, 0x80, 0x8F),
    };

    let Some(&second) = input.get(pos + 1) else {
        return Err(single(Utf8ErrorKind::TruncatedSequence));
    };

    if !is_continuation_byte(second) {
        return Err(Malformed {
            skip: 1,
            offset: pos + 1,
            kind: Utf8ErrorKind::InvalidContinuationByte,
        });
    }

    if !(lo..=hi).contains(&second) {
        return Err(single(match lead {
            0xED => Utf8ErrorKind::SurrogateCodepoint,
            0xF4 => Utf8ErrorKind::OutOfRangeCodepoint,
            _ => Utf8ErrorKind::OverlongEncoding,
        }));
    }

    for i in 2..len {
        match input.get(pos + i) {
            None => {
                return Err(Malformed {
                    skip: i,
                    offset: pos,
                    kind: Utf8ErrorKind::TruncatedSequence,
                })
            }
            Some(&b) if !is_continuation_byte(b) => {
                return Err(Malformed {
                    skip: i,
                    offset: pos + i,
                    kind: Utf8ErrorKind::InvalidContinuationByte,
                })
            }
            Some(_) => {}
        }
    }

    Ok(len)
}

/// Validate that the input is valid UTF-8.
///
/// Returns `Ok(())` if the input is valid UTF-8, or an `Err(Utf8Error)` with
/// detailed information about the first validation error.
///
/// # Examples
///
/// ```
/// use charsan::text::utf8::{validate_utf8, Utf8ErrorKind};
///
/// assert!(validate_utf8(b"Hello, world!").is_ok());
/// assert!(validate_utf8("émoji: 🎉".as_bytes()).is_ok());
///
/// // Surrogate half U+D800
/// let err = validate_utf8(&[b'a', 0xED, 0xA0, 0x80]).unwrap_err();
/// assert_eq!(err.kind, Utf8ErrorKind::SurrogateCodepoint);
/// assert_eq!(err.offset, 1);
/// ```
pub fn validate_utf8(input: &[u8]) -> Result<(), Utf8Error> {
    let mut pos = 0;

    while pos < input.len() {
        // ASCII runs dominate real text
        if input[pos] < 0x80 {
            pos += 1;
            continue;
        }

        match scan_sequence(input, pos) {
            Ok(len) => pos += len,
            Err(bad) => return Err(Utf8Error::at(input, bad.offset, bad.kind)),
        }
    }

    Ok(())
}

/// Check whether the input is structurally valid UTF-8.
///
/// The empty input is valid.
///
/// ```
/// use charsan::is_utf8;
///
/// assert!(is_utf8(b""));
/// assert!(is_utf8(b"hello"));
/// assert!(!is_utf8(&[0xFF]));
/// ```
#[inline]
pub fn is_utf8(input: &[u8]) -> bool {
    validate_utf8(input).is_ok()
}

/// Check if a byte is a valid UTF-8 continuation byte (0x80-0xBF).
#[inline(always)]
pub(crate) fn is_continuation_byte(byte: u8) -> bool {
    (byte & 0xC0) == 0x80
}

/// Encode a Unicode code point as UTF-8.
///
/// Returns `None` if the code point is invalid (surrogate or > U+10FFFF).
/// On success, returns the UTF-8 bytes and the number of bytes used.
///
/// # Examples
///
/// ```
/// use charsan::text::utf8::encode_code_point;
///
/// let (bytes, len) = encode_code_point(0xE9).unwrap();
/// assert_eq!(&bytes[..len], "é".as_bytes());
///
/// assert!(encode_code_point(0xD800).is_none());
/// assert!(encode_code_point(0x110000).is_none());
/// ```
pub fn encode_code_point(cp: u32) -> Option<([u8; 4], usize)> {
    if (0xD800..=0xDFFF).contains(&cp) || cp > 0x10FFFF {
        return None;
    }

    let mut buf = [0u8; 4];

    let len = if cp < 0x80 {
        buf[0] = cp as u8;
        1
    } else if cp < 0x800 {
        buf[0] = 0xC0 | ((cp >> 6) as u8);
        buf[1] = 0x80 | ((cp & 0x3F) as u8);
        2
    } else if cp < 0x10000 {
        buf[0] = 0xE0 | ((cp >> 12) as u8);
        buf[1] = 0x80 | (((cp >> 6) & 0x3F) as u8);
        buf[2] = 0x80 | ((cp & 0x3F) as u8);
        3
    } else {
        buf[0] = 0xF0 | ((cp >> 18) as u8);
        buf[1] = 0x80 | (((cp >> 12) & 0x3F) as u8);
        buf[2] = 0x80 | (((cp >> 6) & 0x3F) as u8);
        buf[3] = 0x80 | ((cp & 0x3F) as u8);
        4
    };

    Some((buf, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(input: &[u8]) -> Utf8ErrorKind {
        validate_utf8(input).unwrap_err().kind
    }

    mod valid_utf8 {
        use super::*;

        #[test]
        fn empty_input() {
            assert!(is_utf8(b""));
        }

        #[test]
        fn every_ascii_byte() {
            for byte in 0x00..=0x7F {
                assert!(is_utf8(&[byte]), "ASCII byte 0x{:02X} should be valid", byte);
            }
        }

        #[test]
        fn boundary_code_points() {
            for cp in [
                0x7F, 0x80, 0x7FF, 0x800, 0xD7FF, 0xE000, 0xFFFD, 0xFFFF, 0x10000, 0x10FFFF,
            ] {
                let (bytes, len) = encode_code_point(cp).unwrap();
                assert!(is_utf8(&bytes[..len]), "U+{:04X} should be valid", cp);
            }
        }

        #[test]
        fn scripts() {
            for text in ["café", "日本語", "한국어", "مرحبا", "שלום", "🎉🚀", "Ĳssel Œuvre"] {
                assert!(is_utf8(text.as_bytes()), "{text}");
            }
        }
    }

    mod invalid_utf8 {
        use super::*;

        #[test]
        fn lone_ff() {
            assert!(!is_utf8(&[0xFF]));
            assert_eq!(kind_of(&[0xFF]), Utf8ErrorKind::InvalidLeadByte);
        }

        #[test]
        fn bare_continuation() {
            assert_eq!(kind_of(&[0x80]), Utf8ErrorKind::InvalidLeadByte);
            assert_eq!(kind_of(&[b'a', 0xBF]), Utf8ErrorKind::InvalidLeadByte);
        }

        #[test]
        fn overlong_forms() {
            assert_eq!(kind_of(&[0xC0, 0x80]), Utf8ErrorKind::OverlongEncoding);
            assert_eq!(kind_of(&[0xC1, 0xBF]), Utf8ErrorKind::OverlongEncoding);
            assert_eq!(kind_of(&[0xE0, 0x80, 0xAF]), Utf8ErrorKind::OverlongEncoding);
            assert_eq!(
                kind_of(&[0xF0, 0x80, 0x80, 0xAF]),
                Utf8ErrorKind::OverlongEncoding
            );
        }

        #[test]
        fn surrogates() {
            assert_eq!(kind_of(&[0xED, 0xA0, 0x80]), Utf8ErrorKind::SurrogateCodepoint);
            assert_eq!(kind_of(&[0xED, 0xBF, 0xBF]), Utf8ErrorKind::SurrogateCodepoint);
        }

        #[test]
        fn out_of_range() {
            assert_eq!(
                kind_of(&[0xF4, 0x90, 0x80, 0x80]),
                Utf8ErrorKind::OutOfRangeCodepoint
            );
            assert_eq!(kind_of(&[0xF5, 0x80]), Utf8ErrorKind::OutOfRangeCodepoint);
        }

        #[test]
        fn truncated() {
            assert_eq!(kind_of(&[0xC3]), Utf8ErrorKind::TruncatedSequence);
            assert_eq!(kind_of(&[0xE2, 0x82]), Utf8ErrorKind::TruncatedSequence);
            assert_eq!(kind_of(&[0xF0, 0x9F, 0x8E]), Utf8ErrorKind::TruncatedSequence);
        }

        #[test]
        fn bad_continuation_reported_at_offending_byte() {
            let err = validate_utf8(&[0xE2, 0x82, b'x']).unwrap_err();
            assert_eq!(err.kind, Utf8ErrorKind::InvalidContinuationByte);
            assert_eq!(err.offset, 2);
        }
    }

    mod positions {
        use super::*;

        #[test]
        fn line_and_column() {
            let err = validate_utf8(b"first\nsecond \xFF").unwrap_err();
            assert_eq!(err.offset, 13);
            assert_eq!(err.line, 2);
            assert_eq!(err.column, 8);
        }

        #[test]
        fn display() {
            let err = validate_utf8(b"ab\xC3").unwrap_err();
            assert_eq!(
                err.to_string(),
                "truncated UTF-8 sequence at byte 2, line 1, column 3"
            );
        }
    }

    mod maximal_subparts {
        use super::*;

        #[test]
        fn skip_lengths() {
            assert_eq!(scan_sequence(&[0xE2, 0x82, b'x'], 0).unwrap_err().skip, 2);
            assert_eq!(scan_sequence(&[0xF0, 0x9F, 0x8E], 0).unwrap_err().skip, 3);
            assert_eq!(scan_sequence(&[0xED, 0xA0, 0x80], 0).unwrap_err().skip, 1);
            assert_eq!(scan_sequence(&[0xC3, b'a'], 0).unwrap_err().skip, 1);
        }

        #[test]
        fn agrees_with_core() {
            let samples: [&[u8]; 6] = [
                b"plain",
                &[0xC3, 0xA9, 0xFF],
                &[0xE0, 0x9F, 0x80],
                &[0xF4, 0x8F, 0xBF, 0xBF],
                &[0xF0, 0x90, 0x80],
                &[0xEF, 0xBB, 0xBF, b'x'],
            ];
            for sample in samples {
                assert_eq!(is_utf8(sample), core::str::from_utf8(sample).is_ok());
            }
        }
    }
}
