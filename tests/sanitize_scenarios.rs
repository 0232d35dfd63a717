//! Snapshot tests for representative sanitizing scenarios.

use charsan::text::utf8::validate_utf8;
use charsan::{
    cleanup_utf8, decode_hex_code_points, decode_hex_code_points_with, decode_non_breaking_spaces,
    remove_accents, strip_invalid_utf8, HexDecodeOptions, SourceEncoding, Unmappable,
};

fn show(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// ============================================================================
// Form submissions with Latin-1 bytes
// ============================================================================

#[test]
fn test_latin1_form_field() {
    let field = b"Clich\xE9 caf\xE9, na\xEFve r\xE9sum\xE9";
    insta::assert_snapshot!(show(&cleanup_utf8(field)), @"Clich caf, nave rsum");
    insta::assert_snapshot!(show(&strip_invalid_utf8(field)), @"Clich caf, nave rsum");
}

#[test]
fn test_controls_and_emoji() {
    let field = "bell\u{7}\u{0}ring\u{7f}, 🎉 done".as_bytes();
    insta::assert_snapshot!(show(&cleanup_utf8(field)), @"bellring,  done");
    // Controls and 4-byte sequences are valid UTF-8
    assert_eq!(strip_invalid_utf8(field), field);
}

#[test]
fn test_validation_error_report() {
    let err = validate_utf8(b"line one\nbad \xC3( here").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid UTF-8 continuation byte at byte 14, line 2, column 6");
}

// ============================================================================
// Escaped code points
// ============================================================================

#[test]
fn test_json_style_escapes() {
    let text = b"Gr\\u00fc\\u00df Gott \\u2014 \\u20ac 5";
    let out = decode_hex_code_points(text, "UCS-2BE").unwrap();
    insta::assert_snapshot!(show(&out), @"Grüß Gott — € 5");
}

#[test]
fn test_surrogates_by_encoding() {
    let text = b"party \\ud83c\\udf89!";
    let ucs2 = decode_hex_code_points(text, "UCS-2BE").unwrap();
    let utf16 = decode_hex_code_points(text, "UTF-16BE").unwrap();
    insta::assert_snapshot!(show(&ucs2), @"party \\ud83c\\udf89!");
    insta::assert_snapshot!(show(&utf16), @"party 🎉!");
}

#[test]
fn test_byte_pair_encodings() {
    let decode = |text: &[u8], encoding| show(&decode_hex_code_points(text, encoding).unwrap());
    insta::assert_snapshot!(decode(b"[\\ue900]", "UCS-2LE"), @"[é]");
    insta::assert_snapshot!(decode(b"[\\u4142]", "Latin1"), @"[AB]");
    insta::assert_snapshot!(decode(b"[\\uc3a9]", "UTF-8"), @"[é]");
    insta::assert_snapshot!(decode(b"[\\u8093]", "CP1252"), @"[€“]");
}

#[test]
fn test_unmappable_policies() {
    let text = b"ok \\u0080 fine \\u00ff.";
    let decode = |policy| {
        let options = HexDecodeOptions::new(SourceEncoding::Ascii).with_on_unmappable(policy);
        show(&decode_hex_code_points_with(text, &options).unwrap())
    };
    insta::assert_snapshot!(decode(Unmappable::Keep), @"ok \\u0080 fine \\u00ff.");
    insta::assert_snapshot!(decode(Unmappable::Remove), @"ok  fine .");
    insta::assert_snapshot!(decode(Unmappable::Substitute), @"ok ? fine ?.");
}

// ============================================================================
// Spaces and accents
// ============================================================================

#[test]
fn test_price_with_nbsp() {
    let text = "Total:&nbsp;1\u{A0}299,00&nbsp;€".as_bytes();
    insta::assert_snapshot!(show(&decode_non_breaking_spaces(text)), @"Total: 1 299,00 €");
}

#[test]
fn test_place_names() {
    let text = "Zürich, Malmö, Kraków, Ærøskøbing, Œland, Dvůr Králové";
    insta::assert_snapshot!(
        show(&remove_accents(text.as_bytes())),
        @"Zuerich, Malmoe, Krakow, Aeroskobing, OEland, Dvur Kralove"
    );
}

// ============================================================================
// Full pipeline
// ============================================================================

#[cfg(feature = "serde")]
#[test]
fn test_pipeline_from_json() {
    use charsan::{CleanupMode, SanitizeConfig};

    let config: SanitizeConfig = serde_json::from_str(
        r#"{"cleanup": "strict", "decode_escapes": true, "remove_accents": true}"#,
    )
    .unwrap();
    assert_eq!(config.cleanup, CleanupMode::Strict);

    let input = b"Cr\\u00e8me&nbsp;br\\u00fbl\\u00e9\\u0065 \xFF\\u00bd";
    insta::assert_snapshot!(show(&config.apply(input).unwrap()), @"Creme brulee ½");
}

#[cfg(feature = "serde")]
#[test]
fn test_pipeline_config_roundtrip() {
    use charsan::SanitizeConfig;

    let config = SanitizeConfig::all().with_escapes("UTF-16LE");
    let json = serde_json::to_string(&config).unwrap();
    insta::assert_snapshot!(json, @r#"{"cleanup":"strict","decode_escapes":true,"source_encoding":"UTF-16LE","on_unmappable":"keep","decode_nbsp":true,"remove_accents":true}"#);
}
