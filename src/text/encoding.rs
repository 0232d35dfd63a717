//! Source encodings for escaped code units.
//!
//! A `\uXXXX` escape carries two raw bytes. [`SourceEncoding`] says how those
//! two bytes are read: as one 16-bit code unit (UCS-2, UTF-16), as a UTF-8
//! sequence, or as two single-byte characters (ASCII, Latin-1, Windows-1252).

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Encoding of the byte pair carried by a `\uXXXX` escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceEncoding {
    /// UCS-2, big-endian. Surrogate code units are unmappable.
    #[default]
    Ucs2Be,
    /// UCS-2, little-endian.
    Ucs2Le,
    /// UTF-16, big-endian. Adjacent high/low surrogate escapes form one character.
    Utf16Be,
    /// UTF-16, little-endian.
    Utf16Le,
    /// The two bytes form a UTF-8 sequence (or two ASCII characters).
    Utf8,
    /// ISO-8859-1: each byte is the code point of the same value.
    Latin1,
    /// Windows-1252: Latin-1 with printable characters in 0x80-0x9F.
    Windows1252,
    /// US-ASCII: bytes 0x80 and above are unmappable.
    Ascii,
}

/// Accepted names, matched case-insensitively.
const NAMES: &[(&str, SourceEncoding)] = &[
    ("UCS-2BE", SourceEncoding::Ucs2Be),
    ("UCS-2", SourceEncoding::Ucs2Be),
    ("UCS2BE", SourceEncoding::Ucs2Be),
    ("UCS2", SourceEncoding::Ucs2Be),
    ("ISO-10646-UCS-2", SourceEncoding::Ucs2Be),
    ("UCS-2LE", SourceEncoding::Ucs2Le),
    ("UCS2LE", SourceEncoding::Ucs2Le),
    ("UTF-16BE", SourceEncoding::Utf16Be),
    ("UTF-16", SourceEncoding::Utf16Be),
    ("UTF16BE", SourceEncoding::Utf16Be),
    ("UTF16", SourceEncoding::Utf16Be),
    ("UTF-16LE", SourceEncoding::Utf16Le),
    ("UTF16LE", SourceEncoding::Utf16Le),
    ("UTF-8", SourceEncoding::Utf8),
    ("UTF8", SourceEncoding::Utf8),
    ("ISO-8859-1", SourceEncoding::Latin1),
    ("ISO8859-1", SourceEncoding::Latin1),
    ("LATIN1", SourceEncoding::Latin1),
    ("L1", SourceEncoding::Latin1),
    ("WINDOWS-1252", SourceEncoding::Windows1252),
    ("CP1252", SourceEncoding::Windows1252),
    ("ASCII", SourceEncoding::Ascii),
    ("US-ASCII", SourceEncoding::Ascii),
];

/// Windows-1252 code points for bytes 0x80-0x9F (0 = undefined).
const CP1252_HIGH: [u16; 32] = [
    0x20AC, 0x0000, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, //
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0x0000, 0x017D, 0x0000, //
    0x0000, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, //
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x0000, 0x017E, 0x0178,
];

/// Error returned when an encoding name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEncodingError {
    /// The name as given by the caller.
    pub name: String,
}

impl fmt::Display for ParseEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported source encoding '{}'", self.name)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseEncodingError {}

impl FromStr for SourceEncoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        NAMES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|&(_, encoding)| encoding)
            .ok_or_else(|| ParseEncodingError {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl SourceEncoding {
    /// Canonical name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ucs2Be => "UCS-2BE",
            Self::Ucs2Le => "UCS-2LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "ISO-8859-1",
            Self::Windows1252 => "Windows-1252",
            Self::Ascii => "ASCII",
        }
    }

    /// Whether adjacent escapes holding a surrogate pair decode as one character.
    #[inline]
    pub fn pairs_surrogates(self) -> bool {
        matches!(self, Self::Utf16Be | Self::Utf16Le)
    }

    /// The 16-bit code unit for UCS-2 and UTF-16 encodings.
    ///
    /// Returns `None` for encodings that read the pair as bytes.
    #[inline]
    pub fn code_unit(self, pair: [u8; 2]) -> Option<u16> {
        match self {
            Self::Ucs2Be | Self::Utf16Be => Some(u16::from_be_bytes(pair)),
            Self::Ucs2Le | Self::Utf16Le => Some(u16::from_le_bytes(pair)),
            _ => None,
        }
    }

    /// Decode a byte pair into one or two characters.
    ///
    /// Returns the characters and how many of them are used, or `None` if the
    /// pair cannot be represented (a lone surrogate, an invalid UTF-8
    /// sequence, or a byte undefined in the encoding).
    ///
    /// ```
    /// use charsan::SourceEncoding;
    ///
    /// assert_eq!(SourceEncoding::Ucs2Be.decode_pair([0x00, 0xE9]), Some((['é', '\0'], 1)));
    /// assert_eq!(SourceEncoding::Latin1.decode_pair([0x41, 0xE9]), Some((['A', 'é'], 2)));
    /// assert_eq!(SourceEncoding::Ascii.decode_pair([0x41, 0xE9]), None);
    /// ```
    pub fn decode_pair(self, pair: [u8; 2]) -> Option<([char; 2], usize)> {
        if let Some(unit) = self.code_unit(pair) {
            return char::from_u32(u32::from(unit)).map(|c| ([c, '\0'], 1));
        }

        match self {
            Self::Utf8 => {
                let text = core::str::from_utf8(&pair).ok()?;
                let mut chars = text.chars();
                let first = chars.next()?;
                Some(match chars.next() {
                    Some(second) => ([first, second], 2),
                    None => ([first, '\0'], 1),
                })
            }
            Self::Latin1 => Some(([char::from(pair[0]), char::from(pair[1])], 2)),
            Self::Windows1252 => Some(([cp1252_char(pair[0])?, cp1252_char(pair[1])?], 2)),
            Self::Ascii if pair[0].is_ascii() && pair[1].is_ascii() => {
                Some(([char::from(pair[0]), char::from(pair[1])], 2))
            }
            _ => None,
        }
    }
}

fn cp1252_char(byte: u8) -> Option<char> {
    match byte {
        0x80..=0x9F => match CP1252_HIGH[usize::from(byte - 0x80)] {
            0 => None,
            cp => char::from_u32(u32::from(cp)),
        },
        _ => Some(char::from(byte)),
    }
}
