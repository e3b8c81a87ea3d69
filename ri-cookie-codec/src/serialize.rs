//! `Set-Cookie` serialization.

use crate::encoding::{encode_component, is_valid_field};
use crate::error::CookieError;
use crate::record::{CookieRecord, Flag, SameSite};

/// Serialize every record and concatenate the results.
///
/// No separator is inserted; the usual case is a single record per
/// `Set-Cookie` header. An empty input yields an empty string.
///
/// # Errors
///
/// The first [`CookieError`] raised by any record.
pub fn serialize<'a, I>(records: I) -> Result<String, CookieError>
where
    I: IntoIterator<Item = &'a CookieRecord>,
{
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_set_cookie_string()?);
    }
    Ok(out)
}

/// Helper: resolve a flag, rejecting anything that is not a boolean.
#[inline]
fn flag_set(flag: &Flag, err: CookieError) -> Result<bool, CookieError> {
    match flag {
        Flag::Off => Ok(false),
        Flag::On => Ok(true),
        Flag::Invalid(_) => Err(err),
    }
}

impl CookieRecord {
    /// Render the record as a `Set-Cookie` value.
    ///
    /// Attributes are emitted in a fixed order: `Domain`, `Path`, `Max-Age`,
    /// `Expires`, `Secure`, `Partitioned`, `SameSite`, `HttpOnly`. The value is
    /// percent-encoded as a URI component.
    ///
    /// ```
    /// use ri_cookie_codec::CookieRecord;
    ///
    /// let cookie = CookieRecord::new("foo", "bar +baz").with_path("/").with_http_only(true);
    /// assert_eq!(cookie.to_set_cookie_string().unwrap(), "foo=bar%20%2Bbaz; Path=/; HttpOnly");
    /// ```
    pub fn to_set_cookie_string(&self) -> Result<String, CookieError> {
        self.write_set_cookie().inspect_err(|err| {
            tracing::debug!(name = %self.name, attribute = err.attribute(), "cookie rejected");
        })
    }

    fn write_set_cookie(&self) -> Result<String, CookieError> {
        if !is_valid_field(&self.name) {
            return Err(CookieError::InvalidName);
        }

        let value = encode_component(&self.value);
        if !value.is_empty() && !is_valid_field(&value) {
            return Err(CookieError::InvalidValue);
        }

        let mut out = String::with_capacity(self.name.len() + value.len() + 1);
        out.push_str(&self.name);
        out.push('=');
        out.push_str(&value);

        if let Some(domain) = self.domain.as_deref().filter(|d| !d.is_empty()) {
            if !is_valid_field(domain) {
                return Err(CookieError::InvalidDomain);
            }
            out.push_str("; Domain=");
            out.push_str(domain);
        }

        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            if !is_valid_field(path) {
                return Err(CookieError::InvalidPath);
            }
            out.push_str("; Path=");
            out.push_str(path);
        }

        if let Some(max_age) = self.max_age {
            if !max_age.is_finite() {
                return Err(CookieError::InvalidMaxAge);
            }
            out.push_str(&format!("; Max-Age={}", max_age.floor() as i64));
        }

        if let Some(expires) = &self.expires {
            out.push_str("; Expires=");
            out.push_str(&expires.to_http_date()?);
        }

        if flag_set(&self.secure, CookieError::InvalidSecure)? {
            out.push_str("; Secure");
        }

        if flag_set(&self.partitioned, CookieError::InvalidPartitioned)? {
            out.push_str("; Partitioned");
        }

        match &self.same_site {
            SameSite::Unset => {}
            SameSite::Strict => out.push_str("; SameSite=Strict"),
            SameSite::Lax => out.push_str("; SameSite=Lax"),
            SameSite::None => out.push_str("; SameSite=None"),
            SameSite::Invalid(_) => return Err(CookieError::InvalidSameSite),
        }

        if flag_set(&self.http_only, CookieError::InvalidHttpOnly)? {
            out.push_str("; HttpOnly");
        }

        Ok(out)
    }
}
