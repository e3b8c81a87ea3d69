//! Errors raised while serializing a cookie or checking its expiry.

use thiserror::Error;

/// An invalid argument found while acting on a [`CookieRecord`](crate::CookieRecord).
///
/// Records accept anything at construction. Validation runs when a record is
/// serialized or checked for expiry, and the first offending attribute is
/// reported through one of these variants.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum CookieError {
    #[error("argument name is invalid")]
    InvalidName,
    #[error("argument value is invalid")]
    InvalidValue,
    #[error("option domain is invalid")]
    InvalidDomain,
    #[error("option path is invalid")]
    InvalidPath,
    #[error("option maxAge is invalid")]
    InvalidMaxAge,
    #[error("option expires is invalid")]
    InvalidExpires,
    #[error("option secure is invalid")]
    InvalidSecure,
    #[error("option partitioned is invalid")]
    InvalidPartitioned,
    #[error("option sameSite is invalid")]
    InvalidSameSite,
    #[error("option httpOnly is invalid")]
    InvalidHttpOnly,
}

impl CookieError {
    /// Name of the attribute that failed validation.
    pub fn attribute(&self) -> &'static str {
        match self {
            CookieError::InvalidName => "name",
            CookieError::InvalidValue => "value",
            CookieError::InvalidDomain => "domain",
            CookieError::InvalidPath => "path",
            CookieError::InvalidMaxAge => "maxAge",
            CookieError::InvalidExpires => "expires",
            CookieError::InvalidSecure => "secure",
            CookieError::InvalidPartitioned => "partitioned",
            CookieError::InvalidSameSite => "sameSite",
            CookieError::InvalidHttpOnly => "httpOnly",
        }
    }
}
