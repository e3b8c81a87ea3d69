//! Character grammar and URI-component percent-encoding used on cookie values.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::borrow::Cow;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Helper: check if a char is allowed in a serialized cookie field
/// (HTAB, 0x20-0x7E, 0x80-0xFF).
#[inline(always)]
fn is_field_char(c: char) -> bool {
    matches!(c, '\t' | '\u{20}'..='\u{7e}' | '\u{80}'..='\u{ff}')
}

/// True when `s` is non-empty and every char is in the field grammar.
pub(crate) fn is_valid_field(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_field_char)
}

/// Trim optional whitespace (space and HTAB) from both ends.
#[inline]
pub(crate) fn trim_ows(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\t')
}

/// Percent-encode a value as a URI component.
pub(crate) fn encode_component(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, COMPONENT).into()
}

/// Strict URI-component decoding.
///
/// Fails when a `%` is not followed by two hex digits or when the decoded
/// bytes are not UTF-8.
pub(crate) fn decode_component(value: &str) -> Option<Cow<'_, str>> {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(value).decode_utf8().ok()
}

/// Decode `value` if it contains a `%`, keeping the raw text when the escape is malformed.
pub(crate) fn try_decode(value: &str) -> String {
    if !value.contains('%') {
        return value.to_string();
    }

    match decode_component(value) {
        Some(decoded) => decoded.into_owned(),
        None => {
            tracing::debug!(value, "malformed percent-escape, keeping raw value");
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_grammar() {
        let cases = [
            ("foo", true),
            ("foo bar", true),
            ("\tfoo", true),
            ("caf\u{e9}", true),
            ("", false),
            ("foo\n", false),
            ("foo\u{7f}", false),
            ("foo\u{280a}", false),
        ];

        for (input, expected) in cases {
            assert_eq!(is_valid_field(input), expected, "{input:?}");
        }
    }

    #[test]
    fn encode_matches_uri_component() {
        assert_eq!(encode_component("bar +baz"), "bar%20%2Bbaz");
        assert_eq!(encode_component("a-b_c.d!e~f*g'h(i)j"), "a-b_c.d!e~f*g'h(i)j");
        assert_eq!(encode_component(" \",;/"), "%20%22%2C%3B%2F");
        assert_eq!(encode_component("\u{e9}"), "%C3%A9");
        assert_eq!(encode_component(""), "");
    }

    #[test]
    fn decode_is_strict() {
        assert_eq!(decode_component("%20%22%2c%3b%2f").as_deref(), Some(" \",;/"));
        assert_eq!(decode_component("%C3%A9").as_deref(), Some("\u{e9}"));
        assert_eq!(decode_component("%1"), None);
        assert_eq!(decode_component("%zz"), None);
        assert_eq!(decode_component("%1%20"), None);
        // Lone continuation byte is not UTF-8.
        assert_eq!(decode_component("%80"), None);
    }

    #[test]
    fn try_decode_falls_back_to_raw() {
        assert_eq!(try_decode("plain"), "plain");
        assert_eq!(try_decode("val%20ue"), "val ue");
        assert_eq!(try_decode("%1"), "%1");
    }

    #[test]
    fn ows_only() {
        assert_eq!(trim_ows(" \t foo \t"), "foo");
        assert_eq!(trim_ows("\nfoo"), "\nfoo");
    }
}
