//! Text processing utilities.
//!
//! This module provides the byte-level text transformations of the crate.
//!
//! ## UTF-8 Validation and Cleanup
//!
//! The [`utf8`] module validates UTF-8 with detailed error reporting including
//! byte offset, line number, and column position. The [`cleanup`] module drops
//! malformed sequences instead of reporting them.
//!
//! ```
//! use charsan::text::utf8::{validate_utf8, Utf8ErrorKind};
//! use charsan::text::cleanup::strip_invalid_utf8;
//!
//! assert!(validate_utf8("日本語".as_bytes()).is_ok());
//!
//! let err = validate_utf8(b"ok\n\x80").unwrap_err();
//! assert_eq!(err.kind, Utf8ErrorKind::InvalidLeadByte);
//! assert_eq!((err.offset, err.line, err.column), (3, 2, 1));
//!
//! assert_eq!(strip_invalid_utf8(b"ok\n\x80"), b"ok\n");
//! ```
//!
//! ## Decoding and Normalization
//!
//! ```
//! use charsan::text::{decode_hex_code_points, decode_non_breaking_spaces, remove_accents};
//!
//! assert_eq!(decode_hex_code_points(b"caf\\u00e9", "UCS-2BE").unwrap(), "café".as_bytes());
//! assert_eq!(decode_non_breaking_spaces(b"a&nbsp;b"), b"a b");
//! assert_eq!(remove_accents("Ærøskøbing".as_bytes()), b"Aeroskobing");
//! ```

pub mod accents;
pub mod cleanup;
pub mod encoding;
pub mod escape;
pub mod nbsp;
pub mod utf8;

// Re-export commonly used types
pub use accents::{remove_accents, remove_accents_str};
pub use cleanup::{cleanup_utf8, strip_invalid_utf8};
pub use encoding::{ParseEncodingError, SourceEncoding};
pub use escape::{
    decode_hex_code_points, decode_hex_code_points_with, HexDecodeError, HexDecodeOptions,
    Unmappable, DEFAULT_SOURCE_ENCODING,
};
pub use nbsp::decode_non_breaking_spaces;
pub use utf8::{is_utf8, validate_utf8, Utf8Error, Utf8ErrorKind};
