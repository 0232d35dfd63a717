//! Non-breaking space normalization.

use alloc::vec::Vec;

/// The HTML entity replaced by [`decode_non_breaking_spaces`].
const NBSP_ENTITY: &[u8] = b"&nbsp;";

fn replace_entity(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        if input[pos..].starts_with(NBSP_ENTITY) {
            out.push(b' ');
            pos += NBSP_ENTITY.len();
        } else {
            out.push(input[pos]);
            pos += 1;
        }
    }

    out
}

/// Replace `&nbsp;` entities and U+00A0 characters with ordinary spaces.
///
/// The entity is replaced first, at the byte level. The U+00A0 pass needs the
/// text to be valid UTF-8; when it is not, the entity-replaced bytes are
/// returned as they are. This function never fails.
///
/// # Examples
///
/// ```
/// use charsan::text::nbsp::decode_non_breaking_spaces;
///
/// assert_eq!(decode_non_breaking_spaces(b"a&nbsp;b"), b"a b");
/// assert_eq!(decode_non_breaking_spaces("a\u{A0}b".as_bytes()), b"a b");
///
/// // Not UTF-8: only the entity is replaced
/// assert_eq!(decode_non_breaking_spaces(b"\xFF&nbsp;\xC2\xA0"), b"\xFF \xC2\xA0");
/// ```
pub fn decode_non_breaking_spaces(input: &[u8]) -> Vec<u8> {
    let replaced = replace_entity(input);

    match core::str::from_utf8(&replaced) {
        Ok(text) if text.contains('\u{A0}') => text.replace('\u{A0}', " ").into_bytes(),
        Ok(_) => replaced,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                valid_up_to = _err.valid_up_to(),
                "input is not UTF-8, skipping U+00A0 replacement"
            );
            replaced
        }
    }
}
