//! Decoding of `\uXXXX` escaped code points.
//!
//! An escape is a backslash, the letter `u`, and 4 to 6 hexadecimal digits.
//! Escapes with more than 4 digits are removed. A 4-digit escape is read as
//! the big-endian byte pair `XX XX`, decoded in a [`SourceEncoding`], and
//! replaced by the resulting UTF-8 text.
//!
//! ## Failure Policy
//!
//! An unrecognized encoding name fails the whole call with
//! [`HexDecodeError::UnsupportedEncoding`] before any output is produced.
//! A single escape the encoding cannot represent (for example a lone
//! surrogate in UCS-2) is handled by [`Unmappable`], scoped to that escape.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::encoding::{ParseEncodingError, SourceEncoding};
use super::utf8::encode_code_point;

/// Encoding assumed when the caller does not name one.
pub const DEFAULT_SOURCE_ENCODING: &str = "UCS-2BE";

/// Longest digit run consumed by one escape.
const MAX_DIGITS: usize = 6;

/// What to do with an escape whose bytes the source encoding cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Unmappable {
    /// Leave the literal escape text in place (default).
    #[default]
    Keep,
    /// Drop the escape.
    Remove,
    /// Replace the escape with `?`.
    Substitute,
    /// Abort with [`HexDecodeError::Unmappable`].
    Fail,
}

/// Options for [`decode_hex_code_points_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HexDecodeOptions {
    /// Encoding of the byte pair carried by each escape (default: UCS-2BE).
    pub encoding: SourceEncoding,
    /// Policy for escapes the encoding cannot represent (default: keep).
    pub on_unmappable: Unmappable,
}

impl HexDecodeOptions {
    /// Options decoding from `encoding` with the default unmappable policy.
    pub fn new(encoding: SourceEncoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    /// Set the source encoding.
    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the policy for unmappable escapes.
    pub fn with_on_unmappable(mut self, policy: Unmappable) -> Self {
        self.on_unmappable = policy;
        self
    }
}

/// Errors from escape decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexDecodeError {
    /// The source encoding name is not recognized.
    UnsupportedEncoding {
        /// The name as given by the caller.
        name: String,
    },
    /// An escape could not be represented and the policy is [`Unmappable::Fail`].
    Unmappable {
        /// Byte offset of the backslash in the input.
        offset: usize,
        /// The literal escape text.
        escape: String,
        /// The encoding it was decoded with.
        encoding: SourceEncoding,
    },
}

impl fmt::Display for HexDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedEncoding { name } => {
                write!(f, "unsupported source encoding '{}'", name)
            }
            Self::Unmappable {
                offset,
                escape,
                encoding,
            } => write!(
                f,
                "escape '{}' at byte {} is not representable in {}",
                escape, offset, encoding
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HexDecodeError {}

impl From<ParseEncodingError> for HexDecodeError {
    fn from(err: ParseEncodingError) -> Self {
        Self::UnsupportedEncoding { name: err.name }
    }
}

/// A matched escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Escape {
    start: usize,
    end: usize,
    /// The byte pair, present only for exactly 4 digits.
    pair: Option<[u8; 2]>,
}

#[inline]
fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Match an escape starting exactly at `pos`.
fn escape_at(input: &[u8], pos: usize) -> Option<Escape> {
    if input.get(pos) != Some(&b'\\') || input.get(pos + 1) != Some(&b'u') {
        return None;
    }

    let digits_start = pos + 2;
    let digits = input[digits_start..]
        .iter()
        .take(MAX_DIGITS)
        .take_while(|&&b| hex_value(b).is_some())
        .count();

    if digits < 4 {
        return None;
    }

    let pair = (digits == 4).then(|| {
        let d = &input[digits_start..digits_start + 4];
        let nibble = |i: usize| hex_value(d[i]).unwrap_or(0);
        [(nibble(0) << 4) | nibble(1), (nibble(2) << 4) | nibble(3)]
    });

    Some(Escape {
        start: pos,
        end: digits_start + digits,
        pair,
    })
}

fn push_char(out: &mut Vec<u8>, c: char) {
    if let Some((bytes, len)) = encode_code_point(u32::from(c)) {
        out.extend_from_slice(&bytes[..len]);
    }
}

/// Try to join a high surrogate escape with a low surrogate escape right after it.
fn surrogate_pair(
    input: &[u8],
    high_escape: &Escape,
    encoding: SourceEncoding,
) -> Option<(char, usize)> {
    let high = encoding.code_unit(high_escape.pair?)?;
    if !(0xD800..=0xDBFF).contains(&high) {
        return None;
    }

    let low_escape = escape_at(input, high_escape.end)?;
    let low = encoding.code_unit(low_escape.pair?)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return None;
    }

    let cp = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(cp).map(|c| (c, low_escape.end))
}

/// Decode `\uXXXX` escapes, reading each byte pair in the named encoding.
///
/// Unmappable escapes are kept literally; use [`decode_hex_code_points_with`]
/// to choose another policy.
///
/// # Errors
///
/// Returns [`HexDecodeError::UnsupportedEncoding`] if `encoding` is not a
/// recognized encoding name.
///
/// # Examples
///
/// ```
/// use charsan::text::escape::{decode_hex_code_points, HexDecodeError};
///
/// assert_eq!(decode_hex_code_points(b"\\u0041", "UCS-2BE").unwrap(), b"A");
/// assert_eq!(decode_hex_code_points(b"x\\u01F600y", "UCS-2BE").unwrap(), b"xy");
/// assert!(matches!(
///     decode_hex_code_points(b"\\u0041", "KLINGON"),
///     Err(HexDecodeError::UnsupportedEncoding { .. })
/// ));
/// ```
pub fn decode_hex_code_points(input: &[u8], encoding: &str) -> Result<Vec<u8>, HexDecodeError> {
    let encoding: SourceEncoding = encoding.parse()?;
    decode_hex_code_points_with(input, &HexDecodeOptions::new(encoding))
}

/// Decode `\uXXXX` escapes with explicit options.
///
/// # Errors
///
/// Returns [`HexDecodeError::Unmappable`] for the first unrepresentable
/// escape when the policy is [`Unmappable::Fail`]; other policies never fail.
///
/// # Examples
///
/// ```
/// use charsan::text::escape::{decode_hex_code_points_with, HexDecodeOptions, Unmappable};
/// use charsan::SourceEncoding;
///
/// let options = HexDecodeOptions::new(SourceEncoding::Utf16Be);
/// let decoded = decode_hex_code_points_with(b"\\ud83c\\udf89", &options).unwrap();
/// assert_eq!(decoded, "🎉".as_bytes());
///
/// let options = HexDecodeOptions::new(SourceEncoding::Ucs2Be)
///     .with_on_unmappable(Unmappable::Substitute);
/// assert_eq!(decode_hex_code_points_with(b"[\\ud83c]", &options).unwrap(), b"[?]");
/// ```
pub fn decode_hex_code_points_with(
    input: &[u8],
    options: &HexDecodeOptions,
) -> Result<Vec<u8>, HexDecodeError> {
    let mut out = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        let Some(escape) = escape_at(input, pos) else {
            out.push(input[pos]);
            pos += 1;
            continue;
        };

        // 5 or 6 digits: dropped regardless of value
        let Some(pair) = escape.pair else {
            pos = escape.end;
            continue;
        };

        if options.encoding.pairs_surrogates() {
            if let Some((c, end)) = surrogate_pair(input, &escape, options.encoding) {
                push_char(&mut out, c);
                pos = end;
                continue;
            }
        }

        match options.encoding.decode_pair(pair) {
            Some((chars, count)) => {
                for &c in &chars[..count] {
                    push_char(&mut out, c);
                }
            }
            None => {
                let literal = &input[escape.start..escape.end];

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    offset = escape.start,
                    encoding = options.encoding.name(),
                    policy = ?options.on_unmappable,
                    "unmappable escape"
                );

                match options.on_unmappable {
                    Unmappable::Keep => out.extend_from_slice(literal),
                    Unmappable::Remove => {}
                    Unmappable::Substitute => out.push(b'?'),
                    Unmappable::Fail => {
                        return Err(HexDecodeError::Unmappable {
                            offset: escape.start,
                            escape: String::from_utf8_lossy(literal).into_owned(),
                            encoding: options.encoding,
                        })
                    }
                }
            }
        }

        pos = escape.end;
    }

    Ok(out)
}
