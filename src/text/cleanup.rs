//! Removal of malformed UTF-8 byte sequences.
//!
//! Two strategies are provided:
//!
//! - [`cleanup_utf8`] applies a fixed deletion table in one leftmost,
//!   non-overlapping pass. It is the historical web-form cleanup: besides
//!   broken sequences it also drops most C0 control bytes and every 4-byte
//!   sequence, and it only inspects continuation-byte counts, not ranges.
//! - [`strip_invalid_utf8`] drops exactly the maximal ill-formed subparts a
//!   strict validator would reject, so its output is always valid UTF-8.
//!
//! ## Deletion Table
//!
//! `C` stands for a continuation byte (0x80-0xBF), `C*` for a maximal run of
//! them following the lead byte.
//!
//! | Lead byte                          | Run length | Deleted           |
//! |------------------------------------|------------|-------------------|
//! | 00-7F                              | >= 1       | lead + run        |
//! | 00-08, 0B, 0C, 0E-19, 7F           | 0          | lead              |
//! | C0, C1, F0-FF                      | any        | lead + run        |
//! | C2-DF                              | 0          | lead              |
//! | C2-DF                              | >= 2       | lead + run        |
//! | E0-EF                              | 0 or 1     | lead + run        |
//! | E0-EF                              | >= 3       | lead + run        |
//!
//! Anything else is copied: ASCII bytes with no run, C2-DF with a run of one,
//! E0-EF with a run of two, and continuation bytes that no lead byte claimed
//! (only possible at the very start of the input).

use alloc::vec::Vec;

use super::utf8::{is_continuation_byte, scan_sequence, validate_utf8};

/// What the deletion table says about the unit starting at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Keep(usize),
    Delete(usize),
}

/// Number of consecutive continuation bytes starting at `from`.
#[inline]
fn continuation_run(input: &[u8], from: usize) -> usize {
    input
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|&&b| is_continuation_byte(b)).count())
}

#[inline]
fn is_stray_control(byte: u8) -> bool {
    matches!(byte, 0x00..=0x08 | 0x0B | 0x0C | 0x0E..=0x19 | 0x7F)
}

fn classify(input: &[u8], pos: usize) -> Unit {
    let lead = input[pos];

    match lead {
        0x80..=0xBF => Unit::Keep(1),
        0x00..=0x7F => match continuation_run(input, pos + 1) {
            0 if is_stray_control(lead) => Unit::Delete(1),
            0 => Unit::Keep(1),
            run => Unit::Delete(1 + run),
        },
        0xC0 | 0xC1 | 0xF0..=0xFF => Unit::Delete(1 + continuation_run(input, pos + 1)),
        0xC2..=0xDF => match continuation_run(input, pos + 1) {
            1 => Unit::Keep(2),
            run => Unit::Delete(1 + run),
        },
        0xE0..=0xEF => match continuation_run(input, pos + 1) {
            2 => Unit::Keep(3),
            run => Unit::Delete(1 + run),
        },
    }
}

/// Remove malformed UTF-8 byte sequences using the fixed deletion table.
///
/// Bytes not covered by a deletion keep their original relative order.
/// A control byte followed by continuation bytes is deleted together with
/// the whole run, so the result is idempotent:
/// `cleanup_utf8(&cleanup_utf8(s)) == cleanup_utf8(s)`.
///
/// Valid UTF-8 is returned unchanged unless it contains one of the listed
/// control bytes or a 4-byte sequence. Overlong and surrogate 3-byte forms
/// survive, because only continuation counts are checked.
///
/// # Examples
///
/// ```
/// use charsan::text::cleanup::cleanup_utf8;
///
/// assert_eq!(cleanup_utf8(b"Clich\xE9 caf\xE9"), b"Clich caf");
/// assert_eq!(cleanup_utf8("déjà vu".as_bytes()), "déjà vu".as_bytes());
/// assert_eq!(cleanup_utf8(b"tab\there\x00"), b"tab\there");
/// ```
pub fn cleanup_utf8(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        match classify(input, pos) {
            Unit::Keep(len) => {
                out.extend_from_slice(&input[pos..pos + len]);
                pos += len;
            }
            Unit::Delete(len) => pos += len,
        }
    }

    out
}

/// Remove every byte that is not part of a well-formed UTF-8 sequence.
///
/// Each maximal ill-formed subpart (the same segmentation the Unicode standard
/// recommends for U+FFFD substitution) is dropped without replacement. The
/// result is always valid UTF-8, valid input is returned unchanged, and the
/// function is idempotent.
///
/// # Examples
///
/// ```
/// use charsan::text::cleanup::strip_invalid_utf8;
///
/// assert_eq!(strip_invalid_utf8(b"Clich\xE9 caf\xE9"), b"Clich caf");
/// assert_eq!(strip_invalid_utf8("🎉 ok".as_bytes()), "🎉 ok".as_bytes());
/// assert_eq!(strip_invalid_utf8(&[0xED, 0xA0, 0x80, b'x']), b"x");
/// ```
pub fn strip_invalid_utf8(input: &[u8]) -> Vec<u8> {
    if validate_utf8(input).is_ok() {
        return input.to_vec();
    }

    let mut out = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        match scan_sequence(input, pos) {
            Ok(len) => {
                out.extend_from_slice(&input[pos..pos + len]);
                pos += len;
            }
            Err(bad) => pos += bad.skip,
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::utf8::is_utf8;

    mod deletion_table {
        use super::*;

        #[test]
        fn empty_input() {
            assert!(cleanup_utf8(b"").is_empty());
        }

        #[test]
        fn stray_controls() {
            for byte in [0x00, 0x05, 0x08, 0x0B, 0x0C, 0x0E, 0x0F, 0x10, 0x19, 0x7F] {
                assert_eq!(cleanup_utf8(&[b'a', byte, b'b']), b"ab", "byte 0x{:02X}", byte);
            }
        }

        #[test]
        fn kept_controls() {
            // Tab, newline, carriage return and 0x1A-0x1F are not in the table
            let input = b"a\tb\nc\rd\x1Ae\x1Ff";
            assert_eq!(cleanup_utf8(input), input);
        }

        #[test]
        fn ascii_followed_by_continuations() {
            assert_eq!(cleanup_utf8(&[b'x', b'a', 0x80, 0xBF, b'y']), b"xy");
            // A control byte takes its continuation run with it
            assert_eq!(cleanup_utf8(&[0x01, 0x80, b'z']), b"z");
        }

        #[test]
        fn always_overlong_and_four_byte_leads() {
            assert_eq!(cleanup_utf8(&[b'a', 0xC0, 0xAF, b'b']), b"ab");
            assert_eq!(cleanup_utf8(&[0xC1]), b"");
            assert_eq!(cleanup_utf8("a🎉b".as_bytes()), b"ab");
            assert_eq!(cleanup_utf8(&[0xFF, 0x80, 0x80, 0x80, 0x80, b'!']), b"!");
        }

        #[test]
        fn two_byte_leads() {
            assert_eq!(cleanup_utf8(&[0xC3, 0xA9]), "é".as_bytes());
            assert_eq!(cleanup_utf8(&[0xC3, b'e']), b"e");
            assert_eq!(cleanup_utf8(&[0xC3, 0xA9, 0xA9, b'e']), b"e");
            assert_eq!(cleanup_utf8(&[b'e', 0xC3]), b"e");
        }

        #[test]
        fn three_byte_leads() {
            assert_eq!(cleanup_utf8("€".as_bytes()), "€".as_bytes());
            assert_eq!(cleanup_utf8(&[0xE2, b'x']), b"x");
            assert_eq!(cleanup_utf8(&[0xE2, 0x82, b'x']), b"x");
            assert_eq!(cleanup_utf8(&[0xE2, 0x82, 0xAC, 0xAC, b'x']), b"x");
            assert_eq!(cleanup_utf8(&[b'x', 0xE2, 0x82]), b"x");
        }

        #[test]
        fn three_byte_ranges_not_checked() {
            // Overlong and surrogate forms have the right shape and survive
            assert_eq!(cleanup_utf8(&[0xE0, 0x80, 0x80]), [0xE0, 0x80, 0x80]);
            assert_eq!(cleanup_utf8(&[0xED, 0xA0, 0x80]), [0xED, 0xA0, 0x80]);
        }

        #[test]
        fn leading_continuation_is_kept() {
            assert_eq!(cleanup_utf8(&[0x80, b'a']), [0x80, b'a']);
        }

        #[test]
        fn scenario_latin1_bytes() {
            let cleaned = cleanup_utf8(b"Clich\xE9 caf\xE9");
            assert_eq!(cleaned, b"Clich caf");
            assert!(is_utf8(&cleaned));
        }

        #[test]
        fn idempotent_on_tricky_input() {
            let input = [b'A', 0x01, 0x80, 0xC3, 0xA9, 0xE2, 0x82, b'z', 0xF0, 0x9F];
            let once = cleanup_utf8(&input);
            assert_eq!(cleanup_utf8(&once), once);
        }
    }

    mod strict {
        use super::*;

        #[test]
        fn valid_input_unchanged() {
            let text = "Zażółć gęślą jaźń 🎉 日本";
            assert_eq!(strip_invalid_utf8(text.as_bytes()), text.as_bytes());
        }

        #[test]
        fn drops_maximal_subparts() {
            // E2 82 is one truncated subpart, F0 80 splits into two bytes
            let input = [b'a', 0xE2, 0x82, b'b', 0xF0, 0x80, b'c', 0xC3];
            assert_eq!(strip_invalid_utf8(&input), b"abc");
        }

        #[test]
        fn keeps_what_the_table_would_drop() {
            let input = "\u{1}x🎉".as_bytes();
            assert_eq!(strip_invalid_utf8(input), input);
        }
    }
}
