//! # Charsan
//!
//! Character set sanitizing helpers for Rust.
//!
//! Every transformation is a stateless function over a byte slice that returns a
//! fresh buffer. Input is never required to be valid UTF-8.
//!
//! ## Module Organization
//!
//! - [`text::utf8`] - UTF-8 validation with detailed error reporting
//! - [`text::cleanup`] - Removal of malformed UTF-8 byte sequences
//! - [`text::escape`] - Decoding of `\uXXXX` escapes from a source encoding
//! - [`text::nbsp`] - Non-breaking space normalization
//! - [`text::accents`] - Accent removal via a static lookup table
//! - [`config`] - A configurable pipeline chaining the above
//!
//! ## Quick Start
//!
//! ```
//! use charsan::{cleanup_utf8, decode_hex_code_points, is_utf8, remove_accents};
//!
//! assert!(is_utf8("café".as_bytes()));
//! assert!(!is_utf8(&[0xFF]));
//!
//! assert_eq!(cleanup_utf8(b"Clich\xE9 caf\xE9"), b"Clich caf");
//! assert_eq!(decode_hex_code_points(b"\\u0041", "UCS-2BE").unwrap(), b"A");
//! assert_eq!(remove_accents("Crème brûlée".as_bytes()), b"Creme brulee");
//! ```
//!
//! ## Features
//!
//! - `std` (default) - `std::error::Error` impls for the error types
//! - `serde` - Serialization/deserialization of [`SanitizeConfig`]
//! - `tracing` - Debug events when a transformation degrades
//! - `cli` - The `charsan` command line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

/// Text transformations (validation, cleanup, decoding, accent removal).
pub mod text;

/// Pipeline configuration.
pub mod config;

pub use config::{CleanupMode, SanitizeConfig};
pub use text::{
    cleanup_utf8, decode_hex_code_points, decode_hex_code_points_with,
    decode_non_breaking_spaces, is_utf8, remove_accents, remove_accents_str, strip_invalid_utf8,
    validate_utf8, HexDecodeError, HexDecodeOptions, ParseEncodingError, SourceEncoding,
    Unmappable, Utf8Error, Utf8ErrorKind, DEFAULT_SOURCE_ENCODING,
};
