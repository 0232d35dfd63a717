//! Accent removal via a static lookup table.
//!
//! [`ACCENTS`] maps accented Latin letters from the Latin-1 Supplement and
//! Latin Extended-A blocks to ASCII. Most letters map to their base letter;
//! German umlauts, Scandinavian rings and ligatures expand to two letters
//! (`Ä` → `Ae`, `Å` → `Aa`, `ß` → `ss`, `Ĳ` → `IJ`, `Œ` → `OE`).
//!
//! Every key encodes as a 2-byte UTF-8 sequence with a lead byte in C2-C5,
//! which lets [`remove_accents`] work on arbitrary bytes without decoding
//! the whole input.

use alloc::string::String;
use alloc::vec::Vec;

use super::utf8::is_continuation_byte;

/// Accented letters and their ASCII replacements, sorted by code point.
pub static ACCENTS: [(char, &str); 187] = [
    ('ª', "a"),
    ('À', "A"),
    ('Á', "A"),
    ('Â', "A"),
    ('Ã', "A"),
    ('Ä', "Ae"),
    ('Å', "Aa"),
    ('Æ', "Ae"),
    ('Ç', "C"),
    ('È', "E"),
    ('É', "E"),
    ('Ê', "E"),
    ('Ë', "E"),
    ('Ì', "I"),
    ('Í', "I"),
    ('Î', "I"),
    ('Ï', "I"),
    ('Ñ', "N"),
    ('Ò', "O"),
    ('Ó', "O"),
    ('Ô', "O"),
    ('Õ', "O"),
    ('Ö', "Oe"),
    ('Ø', "O"),
    ('Ù', "U"),
    ('Ú', "U"),
    ('Û', "U"),
    ('Ü', "Ue"),
    ('Ý', "Y"),
    ('ß', "ss"),
    ('à', "a"),
    ('á', "a"),
    ('â', "a"),
    ('ã', "a"),
    ('ä', "ae"),
    ('å', "aa"),
    ('æ', "ae"),
    ('ç', "c"),
    ('è', "e"),
    ('é', "e"),
    ('ê', "e"),
    ('ë', "e"),
    ('ì', "i"),
    ('í', "i"),
    ('î', "i"),
    ('ï', "i"),
    ('ñ', "n"),
    ('ò', "o"),
    ('ó', "o"),
    ('ô', "o"),
    ('õ', "o"),
    ('ö', "oe"),
    ('ø', "o"),
    ('ù', "u"),
    ('ú', "u"),
    ('û', "u"),
    ('ü', "ue"),
    ('ý', "y"),
    ('ÿ', "y"),
    // Latin Extended-A
    ('Ā', "A"),
    ('ā', "a"),
    ('Ă', "A"),
    ('ă', "a"),
    ('Ą', "A"),
    ('ą', "a"),
    ('Ć', "C"),
    ('ć', "c"),
    ('Ĉ', "C"),
    ('ĉ', "c"),
    ('Ċ', "C"),
    ('ċ', "c"),
    ('Č', "C"),
    ('č', "c"),
    ('Ď', "D"),
    ('ď', "d"),
    ('Đ', "D"),
    ('đ', "d"),
    ('Ē', "E"),
    ('ē', "e"),
    ('Ĕ', "E"),
    ('ĕ', "e"),
    ('Ė', "E"),
    ('ė', "e"),
    ('Ę', "E"),
    ('ę', "e"),
    ('Ě', "E"),
    ('ě', "e"),
    ('Ĝ', "G"),
    ('ĝ', "g"),
    ('Ğ', "G"),
    ('ğ', "g"),
    ('Ġ', "G"),
    ('ġ', "g"),
    ('Ģ', "G"),
    ('ģ', "g"),
    ('Ĥ', "H"),
    ('ĥ', "h"),
    ('Ħ', "H"),
    ('ħ', "h"),
    ('Ĩ', "I"),
    ('ĩ', "i"),
    ('Ī', "I"),
    ('ī', "i"),
    ('Ĭ', "I"),
    ('ĭ', "i"),
    ('Į', "I"),
    ('į', "i"),
    ('İ', "I"),
    ('ı', "i"),
    ('Ĳ', "IJ"),
    ('ĳ', "ij"),
    ('Ĵ', "J"),
    ('ĵ', "j"),
    ('Ķ', "K"),
    ('ķ', "k"),
    ('ĸ', "k"),
    ('Ĺ', "L"),
    ('ĺ', "l"),
    ('Ļ', "L"),
    ('ļ', "l"),
    ('Ľ', "L"),
    ('ľ', "l"),
    ('Ŀ', "L"),
    ('ŀ', "l"),
    ('Ł', "L"),
    ('ł', "l"),
    ('Ń', "N"),
    ('ń', "n"),
    ('Ņ', "N"),
    ('ņ', "n"),
    ('Ň', "N"),
    ('ň', "n"),
    ('ŉ', "n"),
    ('Ŋ', "N"),
    ('ŋ', "n"),
    ('Ō', "O"),
    ('ō', "o"),
    ('Ŏ', "O"),
    ('ŏ', "o"),
    ('Ő', "O"),
    ('ő', "o"),
    ('Œ', "OE"),
    ('œ', "oe"),
    ('Ŕ', "R"),
    ('ŕ', "r"),
    ('Ŗ', "R"),
    ('ŗ', "r"),
    ('Ř', "R"),
    ('ř', "r"),
    ('Ś', "S"),
    ('ś', "s"),
    ('Ŝ', "S"),
    ('ŝ', "s"),
    ('Ş', "S"),
    ('ş', "s"),
    ('Š', "S"),
    ('š', "s"),
    ('Ţ', "T"),
    ('ţ', "t"),
    ('Ť', "T"),
    ('ť', "t"),
    ('Ŧ', "T"),
    ('ŧ', "t"),
    ('Ũ', "U"),
    ('ũ', "u"),
    ('Ū', "U"),
    ('ū', "u"),
    ('Ŭ', "U"),
    ('ŭ', "u"),
    ('Ů', "U"),
    ('ů', "u"),
    ('Ű', "U"),
    ('ű', "u"),
    ('Ų', "U"),
    ('ų', "u"),
    ('Ŵ', "W"),
    ('ŵ', "w"),
    ('Ŷ', "Y"),
    ('ŷ', "y"),
    ('Ÿ', "Y"),
    ('Ź', "Z"),
    ('ź', "z"),
    ('Ż', "Z"),
    ('ż', "z"),
    ('Ž', "Z"),
    ('ž', "z"),
    ('ſ', "s"),
];

/// ASCII replacement for an accented letter, if the table has one.
///
/// ```
/// use charsan::text::accents::accent_replacement;
///
/// assert_eq!(accent_replacement('é'), Some("e"));
/// assert_eq!(accent_replacement('ß'), Some("ss"));
/// assert_eq!(accent_replacement('ж'), None);
/// ```
#[inline]
pub fn accent_replacement(c: char) -> Option<&'static str> {
    ACCENTS
        .binary_search_by_key(&c, |&(key, _)| key)
        .ok()
        .map(|i| ACCENTS[i].1)
}

/// Look up the 2-byte sequence at `pos`.
#[inline]
fn replacement_at(input: &[u8], pos: usize) -> Option<&'static str> {
    let lead = input[pos];
    if !(0xC2..=0xC5).contains(&lead) {
        return None;
    }

    let next = *input.get(pos + 1)?;
    if !is_continuation_byte(next) {
        return None;
    }

    let cp = (u32::from(lead & 0x1F) << 6) | u32::from(next & 0x3F);
    accent_replacement(char::from_u32(cp)?)
}

/// Replace accented letters with their ASCII equivalents.
///
/// One left-to-right pass: each table key found is replaced and scanning
/// resumes after it; every other byte is copied. Input need not be UTF-8.
///
/// # Examples
///
/// ```
/// use charsan::text::accents::remove_accents;
///
/// assert_eq!(remove_accents("café".as_bytes()), b"cafe");
/// assert_eq!(remove_accents("Straße in Köln".as_bytes()), b"Strasse in Koeln");
/// assert_eq!(remove_accents("Ελλάδα".as_bytes()), "Ελλάδα".as_bytes());
/// ```
pub fn remove_accents(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        match replacement_at(input, pos) {
            Some(ascii) => {
                out.extend_from_slice(ascii.as_bytes());
                pos += 2;
            }
            None => {
                out.push(input[pos]);
                pos += 1;
            }
        }
    }

    out
}

/// [`remove_accents`] for string input.
///
/// ```
/// use charsan::remove_accents_str;
///
/// assert_eq!(remove_accents_str("Łódź"), "Lodz");
/// ```
pub fn remove_accents_str(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match accent_replacement(c) {
            Some(ascii) => out.push_str(ascii),
            None => out.push(c),
        }
    }
    out
}
