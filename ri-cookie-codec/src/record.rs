//! The cookie record and its attribute types.
//!
//! A [`CookieRecord`] is a plain value holder. Nothing is validated on
//! construction; attributes that cannot be emitted are kept in an `Invalid`
//! state and rejected when the record is serialized or checked for expiry.

use crate::encoding::{trim_ows, try_decode};
use crate::error::CookieError;
use cookie::Cookie;
use std::time::SystemTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// RFC 1123 date as used by `Expires`, always in GMT.
pub(crate) const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// A boolean cookie flag (`Secure`, `HttpOnly`, `Partitioned`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Flag {
    /// Absent or false. Never emitted.
    #[default]
    Off,
    On,
    /// A set value that is not a boolean.
    Invalid(String),
}

impl Flag {
    pub fn is_on(&self) -> bool {
        matches!(self, Flag::On)
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value { Flag::On } else { Flag::Off }
    }
}

impl From<&str> for Flag {
    fn from(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("false") {
            Flag::Off
        } else if value.eq_ignore_ascii_case("true") {
            Flag::On
        } else {
            Flag::Invalid(value.to_string())
        }
    }
}

/// The `SameSite` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Unset,
    Strict,
    Lax,
    None,
    /// A value that names none of the policies.
    Invalid(String),
}

impl SameSite {
    /// The policy as the `cookie` crate models it. `Unset` and `Invalid` have no counterpart.
    pub fn to_cookie_same_site(&self) -> Option<cookie::SameSite> {
        match self {
            SameSite::Strict => Some(cookie::SameSite::Strict),
            SameSite::Lax => Some(cookie::SameSite::Lax),
            SameSite::None => Some(cookie::SameSite::None),
            SameSite::Unset | SameSite::Invalid(_) => None,
        }
    }
}

/// `true` means `Strict`, `false` leaves the attribute unset.
impl From<bool> for SameSite {
    fn from(value: bool) -> Self {
        if value { SameSite::Strict } else { SameSite::Unset }
    }
}

impl From<&str> for SameSite {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            SameSite::Unset
        } else if value.eq_ignore_ascii_case("strict") {
            SameSite::Strict
        } else if value.eq_ignore_ascii_case("lax") {
            SameSite::Lax
        } else if value.eq_ignore_ascii_case("none") {
            SameSite::None
        } else {
            SameSite::Invalid(value.to_string())
        }
    }
}

impl From<cookie::SameSite> for SameSite {
    fn from(value: cookie::SameSite) -> Self {
        match value {
            cookie::SameSite::Strict => SameSite::Strict,
            cookie::SameSite::Lax => SameSite::Lax,
            cookie::SameSite::None => SameSite::None,
        }
    }
}

/// The `Expires` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expires {
    At(OffsetDateTime),
    /// Text that is not a point in time.
    Invalid(String),
}

impl Expires {
    /// Read an RFC 1123 date (`Sun, 24 Dec 2000 10:30:59 GMT`).
    ///
    /// Anything else is kept verbatim as [`Expires::Invalid`].
    pub fn parse(s: &str) -> Self {
        match PrimitiveDateTime::parse(trim_ows(s), HTTP_DATE) {
            Ok(dt) => Expires::At(dt.assume_utc()),
            Err(_) => Expires::Invalid(s.to_string()),
        }
    }

    /// The instant, or [`CookieError::InvalidExpires`] when there is none.
    pub fn datetime(&self) -> Result<OffsetDateTime, CookieError> {
        match self {
            Expires::At(dt) => Ok(*dt),
            Expires::Invalid(_) => Err(CookieError::InvalidExpires),
        }
    }

    pub(crate) fn to_http_date(&self) -> Result<String, CookieError> {
        self.datetime()?
            .to_offset(UtcOffset::UTC)
            .format(HTTP_DATE)
            .map_err(|_| CookieError::InvalidExpires)
    }
}

impl From<OffsetDateTime> for Expires {
    fn from(value: OffsetDateTime) -> Self {
        Expires::At(value)
    }
}

impl From<SystemTime> for Expires {
    fn from(value: SystemTime) -> Self {
        Expires::At(value.into())
    }
}

/// Attribute keys read from a parsed attribute bag, matched exactly.
pub(crate) const ATTRIBUTE_KEYS: [&str; 8] = [
    "domain",
    "path",
    "maxAge",
    "expires",
    "secure",
    "httpOnly",
    "sameSite",
    "partitioned",
];

/// Numeric coercion of attribute text: blank is zero, garbage is NaN.
fn coerce_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// One HTTP cookie with its attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub path: Option<String>,
    /// Seconds. Floored on output; must be finite.
    ///
    /// The floored value is emitted as an `i64`, so finite values beyond
    /// `i64::MAX` (about 9.2e18) saturate instead of being printed as floats.
    pub max_age: Option<f64>,
    pub expires: Option<Expires>,
    pub secure: Flag,
    pub http_only: Flag,
    pub same_site: SameSite,
    pub partitioned: Flag,
}

impl CookieRecord {
    /// Create a record with only a name and a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Build a record from a raw attribute bag, reading only the recognized keys.
    ///
    /// Keys must match exactly: `domain`, `path`, `maxAge`, `expires`, `secure`,
    /// `httpOnly`, `sameSite`, `partitioned`. Anything else, including `Path` or
    /// `Max-Age`, is dropped.
    pub fn from_attributes<'a, I>(name: impl Into<String>, value: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::new(name, value);
        for (key, val) in attributes {
            record.apply_attribute(key, val);
        }
        record
    }

    pub(crate) fn apply_attribute(&mut self, key: &str, val: &str) {
        match key {
            "domain" => self.domain = Some(val.to_string()),
            "path" => self.path = Some(val.to_string()),
            "maxAge" => self.max_age = Some(coerce_number(val)),
            "expires" => self.expires = (!val.is_empty()).then(|| Expires::parse(val)),
            "secure" => self.secure = Flag::from(val),
            "httpOnly" => self.http_only = Flag::from(val),
            "sameSite" => self.same_site = SameSite::from(val),
            "partitioned" => self.partitioned = Flag::from(val),
            _ => {}
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_max_age(mut self, seconds: f64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn with_expires(mut self, expires: impl Into<Expires>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    pub fn with_secure(mut self, secure: impl Into<Flag>) -> Self {
        self.secure = secure.into();
        self
    }

    pub fn with_http_only(mut self, http_only: impl Into<Flag>) -> Self {
        self.http_only = http_only.into();
        self
    }

    pub fn with_same_site(mut self, same_site: impl Into<SameSite>) -> Self {
        self.same_site = same_site.into();
        self
    }

    pub fn with_partitioned(mut self, partitioned: impl Into<Flag>) -> Self {
        self.partitioned = partitioned.into();
        self
    }

    /// Whether the cookie has expired by the current wall-clock time.
    ///
    /// # Errors
    ///
    /// [`CookieError::InvalidExpires`] if `expires` is set but is not a point in time.
    pub fn is_expired(&self) -> Result<bool, CookieError> {
        self.is_expired_at(OffsetDateTime::now_utc())
    }

    /// Whether the cookie has expired as of `now`. A record without `expires` never expires.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> Result<bool, CookieError> {
        match &self.expires {
            None => Ok(false),
            Some(expires) => Ok(now > expires.datetime()?),
        }
    }

    /// Convert into a [`cookie::Cookie`], validating exactly like serialization.
    ///
    /// The value is carried percent-encoded.
    pub fn to_cookie(&self) -> Result<Cookie<'static>, CookieError> {
        self.to_set_cookie_string()?;

        let mut builder = Cookie::build((
            self.name.clone(),
            crate::encoding::encode_component(&self.value).into_owned(),
        ));

        if let Some(domain) = self.domain.as_deref().filter(|d| !d.is_empty()) {
            builder = builder.domain(domain.to_string());
        }
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            builder = builder.path(path.to_string());
        }
        if let Some(max_age) = self.max_age {
            builder = builder.max_age(time::Duration::seconds(max_age.floor() as i64));
        }
        if let Some(expires) = &self.expires {
            builder = builder.expires(expires.datetime()?);
        }
        if self.secure.is_on() {
            builder = builder.secure(true);
        }
        if self.http_only.is_on() {
            builder = builder.http_only(true);
        }
        if self.partitioned.is_on() {
            builder = builder.partitioned(true);
        }
        if let Some(same_site) = self.same_site.to_cookie_same_site() {
            builder = builder.same_site(same_site);
        }

        Ok(builder.build())
    }
}

/// The inverse of [`CookieRecord::to_cookie`]: the cookie's value is percent-decoded.
impl From<&Cookie<'_>> for CookieRecord {
    fn from(cookie: &Cookie<'_>) -> Self {
        Self {
            name: cookie.name().to_string(),
            value: try_decode(cookie.value()),
            domain: cookie.domain().map(str::to_string),
            path: cookie.path().map(str::to_string),
            max_age: cookie.max_age().map(|d| d.whole_seconds() as f64),
            expires: cookie.expires_datetime().map(Expires::At),
            secure: cookie.secure().unwrap_or(false).into(),
            http_only: cookie.http_only().unwrap_or(false).into(),
            same_site: cookie.same_site().map(SameSite::from).unwrap_or_default(),
            partitioned: cookie.partitioned().unwrap_or(false).into(),
        }
    }
}
