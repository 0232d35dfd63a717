//! Configuration for the sanitize pipeline.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::text::{
    cleanup_utf8, decode_hex_code_points_with, decode_non_breaking_spaces, remove_accents,
    strip_invalid_utf8, HexDecodeError, HexDecodeOptions, SourceEncoding, Unmappable,
    DEFAULT_SOURCE_ENCODING,
};

/// Which UTF-8 cleanup the pipeline runs last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CleanupMode {
    /// No cleanup.
    Off,
    /// [`cleanup_utf8`]: the fixed deletion table (default).
    #[default]
    Legacy,
    /// [`strip_invalid_utf8`]: drop exactly what a strict validator rejects.
    Strict,
}

/// Configuration for [`SanitizeConfig::apply`].
///
/// Steps run in a fixed order: escape decoding, non-breaking spaces, accent
/// removal, then UTF-8 cleanup. Cleanup runs last so that bytes produced by
/// earlier steps are covered too.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SanitizeConfig {
    /// UTF-8 cleanup strategy (default: legacy)
    pub cleanup: CleanupMode,
    /// Decode `\uXXXX` escapes (default: false)
    pub decode_escapes: bool,
    /// Encoding name for escape decoding (default: "UCS-2BE")
    pub source_encoding: String,
    /// Policy for escapes the encoding cannot represent (default: keep)
    pub on_unmappable: Unmappable,
    /// Replace `&nbsp;` and U+00A0 with spaces (default: true)
    pub decode_nbsp: bool,
    /// Replace accented letters with ASCII (default: false)
    pub remove_accents: bool,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            cleanup: CleanupMode::Legacy,
            decode_escapes: false,
            source_encoding: DEFAULT_SOURCE_ENCODING.to_string(),
            on_unmappable: Unmappable::Keep,
            decode_nbsp: true,
            remove_accents: false,
        }
    }
}

impl SanitizeConfig {
    /// A configuration with every step disabled.
    pub fn none() -> Self {
        Self {
            cleanup: CleanupMode::Off,
            decode_nbsp: false,
            ..Self::default()
        }
    }

    /// A configuration with every step enabled and strict cleanup.
    pub fn all() -> Self {
        Self {
            cleanup: CleanupMode::Strict,
            decode_escapes: true,
            decode_nbsp: true,
            remove_accents: true,
            ..Self::default()
        }
    }

    /// Set the cleanup strategy.
    pub fn with_cleanup(mut self, cleanup: CleanupMode) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Enable escape decoding from the named encoding.
    pub fn with_escapes(mut self, source_encoding: &str) -> Self {
        self.decode_escapes = true;
        self.source_encoding = source_encoding.to_string();
        self
    }

    /// Set the policy for unmappable escapes.
    pub fn with_on_unmappable(mut self, policy: Unmappable) -> Self {
        self.on_unmappable = policy;
        self
    }

    /// Enable or disable non-breaking space replacement.
    pub fn with_nbsp(mut self, enabled: bool) -> Self {
        self.decode_nbsp = enabled;
        self
    }

    /// Enable or disable accent removal.
    pub fn with_accent_removal(mut self, enabled: bool) -> Self {
        self.remove_accents = enabled;
        self
    }

    /// Options for the escape decoding step.
    ///
    /// # Errors
    ///
    /// Returns [`HexDecodeError::UnsupportedEncoding`] if `source_encoding`
    /// is not recognized.
    pub fn hex_options(&self) -> Result<HexDecodeOptions, HexDecodeError> {
        let encoding: SourceEncoding = self.source_encoding.parse()?;
        Ok(HexDecodeOptions::new(encoding).with_on_unmappable(self.on_unmappable))
    }

    /// Run the enabled steps over `input`.
    ///
    /// # Errors
    ///
    /// Only the escape step can fail: an unrecognized `source_encoding`, or
    /// an unmappable escape under [`Unmappable::Fail`]. The encoding name is
    /// checked even when the input has no escapes.
    ///
    /// # Examples
    ///
    /// ```
    /// use charsan::SanitizeConfig;
    ///
    /// let config = SanitizeConfig::default()
    ///     .with_escapes("UCS-2BE")
    ///     .with_accent_removal(true);
    /// let out = config.apply(b"Cr\\u00e8me&nbsp;br\\u00fbl\\u00e9\\u0065\xFF").unwrap();
    /// assert_eq!(out, b"Creme brulee");
    /// ```
    pub fn apply(&self, input: &[u8]) -> Result<Vec<u8>, HexDecodeError> {
        let mut text = if self.decode_escapes {
            decode_hex_code_points_with(input, &self.hex_options()?)?
        } else {
            input.to_vec()
        };

        if self.decode_nbsp {
            text = decode_non_breaking_spaces(&text);
        }

        if self.remove_accents {
            text = remove_accents(&text);
        }

        Ok(match self.cleanup {
            CleanupMode::Off => text,
            CleanupMode::Legacy => cleanup_utf8(&text),
            CleanupMode::Strict => strip_invalid_utf8(&text),
        })
    }
}
