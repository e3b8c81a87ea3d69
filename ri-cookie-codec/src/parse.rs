//! `Cookie` header parsing.

use crate::collection::CookieCollection;
use crate::encoding::{trim_ows, try_decode};
use crate::record::{ATTRIBUTE_KEYS, CookieRecord};
use std::borrow::Cow;

/// One `name=value` pair scanned from a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    pub name: String,
    /// Trimmed and percent-decoded.
    pub value: String,
    /// Byte offset of the `;` that ended the pair, or the input length.
    pub end: usize,
}

/// Iterator over the pairs of a single header string.
///
/// Duplicates are not filtered and attributes are not folded here; see [`parse`].
pub struct HeaderPairs<'c> {
    // The source string, which we split and parse.
    string: Cow<'c, str>,
    // The index where we last split off.
    last: usize,
}

impl<'c> HeaderPairs<'c> {
    pub fn new<S>(string: S) -> Self
    where
        S: Into<Cow<'c, str>>,
    {
        Self {
            string: string.into(),
            last: 0,
        }
    }
}

impl Iterator for HeaderPairs<'_> {
    type Item = RawPair;

    fn next(&mut self) -> Option<Self::Item> {
        let s = self.string.as_ref();
        let len = s.len();

        if self.last >= len {
            return None;
        }

        let i = self.last;
        let Some(eq) = s[i..].find('=').map(|k| i + k) else {
            self.last = len;
            return None;
        };
        let end = s[eq..].find(';').map(|k| eq + k).unwrap_or(len);

        let mut name = trim_ows(&s[i..eq]);
        // A stray `;` means bare tokens came first (`fizz; foo=bar`); keep what follows the last one.
        if let Some(malformed) = name.rfind(';') {
            name = trim_ows(&name[malformed + 1..]);
        }

        let value = try_decode(trim_ows(&s[eq + 1..end]));

        self.last = end + 1;

        Some(RawPair {
            name: name.to_string(),
            value,
            end,
        })
    }
}

/// Byte range of the raw value for each recognized attribute key, by index in `ATTRIBUTE_KEYS`.
type AttributeBag = [Option<(usize, usize)>; ATTRIBUTE_KEYS.len()];

/// The attribute bag that applies to each pair of `s`.
///
/// A pair's bag holds every `;`-separated `key=value` segment after the pair's
/// own `;`, later segments winning. Segments are walked once from the right and
/// the bag is carried leftwards, so the cost is linear in `s`.
fn fold_attributes(s: &str, pairs: &[RawPair]) -> Vec<AttributeBag> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, b) in s.bytes().enumerate() {
        if b == b';' {
            segments.push((start, i));
            start = i + 1;
        }
    }
    segments.push((start, s.len()));

    let mut bags = vec![[None; ATTRIBUTE_KEYS.len()]; pairs.len()];
    let mut bag: AttributeBag = [None; ATTRIBUTE_KEYS.len()];
    let mut next = segments.len();

    for (k, pair) in pairs.iter().enumerate().rev() {
        while next > 0 && segments[next - 1].0 > pair.end {
            next -= 1;
            let (a, b) = segments[next];
            let Some((key, _)) = s[a..b].split_once('=') else {
                continue;
            };
            if let Some(slot) = ATTRIBUTE_KEYS.iter().position(|known| *known == trim_ows(key)) {
                // Walking right to left: the first hit is the latest segment.
                if bag[slot].is_none() {
                    bag[slot] = Some((a + key.len() + 1, b));
                }
            }
        }
        bags[k] = bag;
    }

    bags
}

/// Parse one or more `Cookie` header values into a collection keyed by name.
///
/// Inputs are scanned in order and the first occurrence of a name wins, also
/// across inputs. Pairs without `=` are skipped and malformed percent-escapes
/// leave the value as written. Parsing never fails.
///
/// ```
/// use ri_cookie_codec::parse;
///
/// let cookies = parse(["foo=bar; baz=%20raz", "foo=ignored"]);
/// assert_eq!(cookies.len(), 2);
/// assert_eq!(cookies.get("foo").unwrap().value, "bar");
/// assert_eq!(cookies.get("baz").unwrap().value, " raz");
/// ```
pub fn parse<I, S>(inputs: I) -> CookieCollection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cookies = CookieCollection::new();

    for input in inputs {
        let s = input.as_ref();
        let pairs: Vec<RawPair> = HeaderPairs::new(s).collect();
        let bags = fold_attributes(s, &pairs);

        for (pair, bag) in pairs.into_iter().zip(bags) {
            if cookies.contains(&pair.name) {
                tracing::trace!(name = %pair.name, "duplicate cookie ignored");
                continue;
            }

            let mut record = CookieRecord::new(pair.name, pair.value);
            for (key, range) in ATTRIBUTE_KEYS.iter().zip(bag) {
                if let Some((a, b)) = range {
                    record.apply_attribute(key, &try_decode(trim_ows(&s[a..b])));
                }
            }

            tracing::trace!(name = %record.name, "cookie parsed");
            cookies.insert(record);
        }
    }

    cookies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Expires, Flag, SameSite};
    use time::macros::datetime;

    fn name_values(cookies: &CookieCollection) -> Vec<(&str, &str)> {
        cookies.iter().map(|c| (c.name.as_str(), c.value.as_str())).collect()
    }

    #[test]
    fn parse_name_value() {
        let cases = [
            ("", vec![]),
            (";;", vec![]),
            ("foo", vec![]),
            ("foo=bar", vec![("foo", "bar")]),
            ("foo=123", vec![("foo", "123")]),
            ("FOO    = bar;   baz  =   raz", vec![("FOO", "bar"), ("baz", "raz")]),
            ("foo= ; bar=", vec![("foo", ""), ("bar", "")]),
            ("foo=bar;fizz  ;  buzz", vec![("foo", "bar")]),
            ("  fizz; foo=  bar", vec![("foo", "bar")]),
            ("a=1;x;y;foo=2", vec![("a", "1"), ("foo", "2")]),
            ("session=abc=123; other=value", vec![("session", "abc=123"), ("other", "value")]),
        ];

        for (input, expected) in cases {
            let cookies = parse([input]);
            assert_eq!(name_values(&cookies), expected, "{input:?}");
        }
    }

    #[test]
    fn parse_without_inputs() {
        assert!(parse(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn parse_decodes_values() {
        let cookies = parse([r#"foo="bar=123456789&name=Magic+Mouse""#]);
        assert_eq!(cookies.get("foo").map(|c| c.value.as_str()), Some(r#""bar=123456789&name=Magic+Mouse""#));

        let cookies = parse(["email=%20%22%2c%3b%2f"]);
        assert_eq!(cookies.get("email").map(|c| c.value.as_str()), Some(" \",;/"));
    }

    #[test]
    fn parse_keeps_raw_value_on_escape_error() {
        let cookies = parse(["foo=%1;bar=bar"]);
        assert_eq!(name_values(&cookies), [("foo", "%1"), ("bar", "bar")]);
    }

    #[test]
    fn parse_ignores_duplicates() {
        let cases = [
            ("foo=1;foo=2", vec![("foo", "1")]),
            ("foo=%1;bar=bar;foo=boo", vec![("foo", "%1"), ("bar", "bar")]),
            ("foo=false;bar=bar;foo=true", vec![("foo", "false"), ("bar", "bar")]),
            ("foo=;bar=bar;foo=boo", vec![("foo", ""), ("bar", "bar")]),
        ];

        for (input, expected) in cases {
            assert_eq!(name_values(&parse([input])), expected, "{input:?}");
        }
    }

    #[test]
    fn parse_accumulates_inputs() {
        let cookies = parse(["foo=1; bar=2", "bar=3; baz=4"]);
        assert_eq!(name_values(&cookies), [("foo", "1"), ("bar", "2"), ("baz", "4")]);
    }

    #[test]
    fn parse_folds_attributes() {
        let cookies = parse(["foo=bar; path=/; domain=example.com; maxAge=60; secure; httpOnly=true; sameSite=lax"]);
        let foo = cookies.get("foo").expect("foo parsed");

        assert_eq!(foo.path.as_deref(), Some("/"));
        assert_eq!(foo.domain.as_deref(), Some("example.com"));
        assert_eq!(foo.max_age, Some(60.0));
        assert_eq!(foo.http_only, Flag::On);
        assert_eq!(foo.same_site, SameSite::Lax);
        // Bare flags carry no `=` and are ignored.
        assert_eq!(foo.secure, Flag::Off);

        // The attribute segments are pairs in their own right.
        assert_eq!(cookies.get("path").map(|c| c.value.as_str()), Some("/"));
    }

    #[test]
    fn parse_folds_later_segments_over_earlier() {
        let cookies = parse(["a=1; path=/x; b=2; path=/y"]);

        assert_eq!(cookies.get("a").and_then(|c| c.path.as_deref()), Some("/y"));
        assert_eq!(cookies.get("b").and_then(|c| c.path.as_deref()), Some("/y"));
        // The first `path` pair only sees the segments after it.
        assert_eq!(cookies.get("path").and_then(|c| c.path.as_deref()), Some("/y"));
        assert_eq!(cookies.get("path").map(|c| c.value.as_str()), Some("/x"));
    }

    #[test]
    fn parse_ignores_cookies_named_like_attributes() {
        let cases = ["session=abc; Secure=1", "a=1; b=2; Expires=soon", "a=1; Max-Age=x; SameSite=foo; Path=/"];

        for input in cases {
            let cookies = parse([input]);
            for cookie in &cookies {
                assert_eq!(cookie, &CookieRecord::new(cookie.name.as_str(), cookie.value.as_str()), "{input:?}");
                assert!(cookie.to_set_cookie_string().is_ok(), "{input:?}");
            }
        }
    }

    #[test]
    fn parse_large_header() {
        let header: String = (0..20_000).map(|i| format!("c{i}=v{i}; ")).collect();
        let cookies = parse([format!("{header}path=/")]);

        assert_eq!(cookies.len(), 20_001);
        assert_eq!(cookies.get("c0").map(|c| c.value.as_str()), Some("v0"));
        assert_eq!(cookies.get("c19999").and_then(|c| c.path.as_deref()), Some("/"));
        assert_eq!(cookies.get("c0").and_then(|c| c.path.as_deref()), Some("/"));

        let repeated = "dup=1; ".repeat(20_000);
        let cookies = parse([repeated]);
        assert_eq!(name_values(&cookies), [("dup", "1")]);
    }

    #[test]
    fn parse_unknown_attributes_do_not_leak() {
        let cookies = parse(["FOO = bar; baz = raz"]);
        assert_eq!(cookies.get("FOO"), Some(&CookieRecord::new("FOO", "bar")));
        assert_eq!(cookies.get("baz"), Some(&CookieRecord::new("baz", "raz")));
    }

    #[test]
    fn parse_expires_attribute() {
        let cookies = parse(["foo=bar; expires=Sun, 24 Dec 2000 10:30:59 GMT"]);
        let foo = cookies.get("foo").expect("foo parsed");
        assert_eq!(foo.expires, Some(Expires::At(datetime!(2000-12-24 10:30:59 UTC))));

        let cookies = parse(["foo=bar; expires=soon"]);
        let foo = cookies.get("foo").expect("foo parsed");
        assert_eq!(foo.expires, Some(Expires::Invalid("soon".into())));
    }

    #[test]
    fn header_pairs_reports_offsets() {
        let pairs: Vec<_> = HeaderPairs::new("a=1; b=%20x; flag").collect();

        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].name.as_str(), pairs[0].value.as_str(), pairs[0].end), ("a", "1", 3));
        assert_eq!((pairs[1].name.as_str(), pairs[1].value.as_str(), pairs[1].end), ("b", " x", 11));
    }

    #[test]
    fn round_trip_name_value() {
        for value in ["bar", "bar baz", "caf\u{e9}", "", "a+b&c"] {
            let record = CookieRecord::new("foo", value);
            let header = record.to_set_cookie_string().expect("valid record");
            let cookies = parse([header]);

            assert_eq!(cookies.len(), 1);
            assert_eq!(cookies.get("foo"), Some(&record), "{value:?}");
        }
    }
}
