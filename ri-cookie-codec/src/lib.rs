//! A codec for HTTP cookie data.
//!
//! This crate parses `Cookie` header values into [`CookieRecord`]s and serializes
//! records back into `Set-Cookie` strings, enforcing the RFC 6265 character rules
//! on the way out.
//!
//! Construction is permissive and emission is strict: a record accepts any
//! attribute values, and only [`CookieRecord::to_set_cookie_string`],
//! [`serialize`] and [`CookieRecord::is_expired`] validate them.
//!
//! # Features
//!
//! - **Forgiving parsing**: optional whitespace is trimmed, bare tokens are skipped,
//!   the first occurrence of a name wins, and malformed percent-escapes are kept as written
//! - **Strict serialization**: every attribute is checked against the cookie field grammar
//!   and failures name the offending attribute through [`CookieError`]
//! - **Percent-encoding**: values are encoded and decoded as URI components
//! - **`cookie` crate interop**: [`CookieRecord::to_cookie`] and `From<&cookie::Cookie>`
//! - **reqwest**: enable the `reqwest` feature to store records in a `reqwest` cookie jar
//!
//! # Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ri-cookie-codec = "0.1"
//! ```
//!
//! For reqwest support, enable the `reqwest` feature:
//!
//! ```toml
//! [dependencies]
//! ri-cookie-codec = { version = "0.1", features = ["reqwest"] }
//! ```
//!
//! # Examples
//!
//! Parsing a `Cookie` header:
//!
//! ```
//! use ri_cookie_codec::parse;
//!
//! let cookies = parse(["FOO    = bar;   baz  =   raz; foo=%1"]);
//!
//! assert_eq!(cookies.names().collect::<Vec<_>>(), ["FOO", "baz", "foo"]);
//! assert_eq!(cookies.get("foo").unwrap().value, "%1");
//! ```
//!
//! Serializing a record:
//!
//! ```
//! use ri_cookie_codec::{CookieError, CookieRecord, serialize};
//!
//! let cookie = CookieRecord::new("session", "abc 123")
//!     .with_path("/")
//!     .with_max_age(3.99)
//!     .with_same_site(true);
//!
//! assert_eq!(
//!     serialize([&cookie]).unwrap(),
//!     "session=abc%20123; Path=/; Max-Age=3; SameSite=Strict"
//! );
//!
//! let invalid = CookieRecord::new("session", "abc").with_same_site("foo");
//! assert_eq!(invalid.to_set_cookie_string(), Err(CookieError::InvalidSameSite));
//! ```

mod collection;
mod encoding;
mod error;
mod parse;
mod record;
mod serialize;

pub use collection::CookieCollection;
pub use error::CookieError;
pub use parse::{HeaderPairs, RawPair, parse};
pub use record::{CookieRecord, Expires, Flag, SameSite};
pub use serialize::serialize;

/// Optional support for reqwest integration when `reqwest` feature is enabled.
#[cfg(feature = "reqwest")]
pub mod reqwest_support {
    use super::*;
    use reqwest::Url;
    use reqwest::cookie::Jar;

    /// Serialize `cookie` and store it in `jar` as if `url` had set it.
    ///
    /// # Example
    ///
    /// ```
    /// use ri_cookie_codec::CookieRecord;
    /// use ri_cookie_codec::reqwest_support::add_to_jar;
    ///
    /// let jar = reqwest::cookie::Jar::default();
    /// let url: reqwest::Url = "https://example.com".parse().unwrap();
    ///
    /// add_to_jar(&jar, &url, &CookieRecord::new("session", "abc123").with_path("/")).unwrap();
    /// ```
    pub fn add_to_jar(jar: &Jar, url: &Url, cookie: &CookieRecord) -> Result<(), CookieError> {
        let set_cookie = cookie.to_set_cookie_string()?;
        jar.add_cookie_str(&set_cookie, url);
        Ok(())
    }
}
