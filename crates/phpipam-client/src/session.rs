//! Session token state.
//!
//! A [`Session`] holds the token issued by phpIPAM and the moment it expires.
//! It is owned by [`crate::PhpIpamClient`] and only mutated through the
//! client's authentication methods.

use crate::Result;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use phpipam_core::types::lenient;
use phpipam_core::Error;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Time subtracted from the expiry when deciding whether a token is usable.
pub const SAFETY_MARGIN: Duration = Duration::minutes(5);

/// Lifetime assigned to pre-issued static tokens.
pub const STATIC_TOKEN_LIFETIME: Duration = Duration::days(365);

/// Format of the `expires` field returned by phpIPAM.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Credentials used to obtain a session token.
#[derive(Debug)]
pub enum Credentials {
    /// Username and password exchanged for a token via HTTP basic auth.
    Password {
        /// phpIPAM username
        username: String,
        /// phpIPAM password
        password: SecretString,
    },
    /// Pre-issued token that is used as-is.
    Token(SecretString),
}

impl Credentials {
    /// Username/password credentials.
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Static token credentials.
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(SecretString::from(token.into()))
    }
}

/// Current token and its expiry.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<SecretString>,
    expires: Option<DateTime<Utc>>,
}

impl Session {
    /// An unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session holding a static token valid for [`STATIC_TOKEN_LIFETIME`].
    #[must_use]
    pub fn with_static_token(token: &str, now: DateTime<Utc>) -> Self {
        Self {
            token: Some(SecretString::from(token.to_string())),
            expires: Some(now + STATIC_TOKEN_LIFETIME),
        }
    }

    /// The current token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// When the current token expires.
    #[must_use]
    pub const fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    /// Whether a token is held and `now + SAFETY_MARGIN` is strictly before
    /// its expiry.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.token, self.expires) {
            (Some(_), Some(expires)) => now + SAFETY_MARGIN < expires,
            _ => false,
        }
    }

    /// [`Session::is_valid_at`] evaluated against the current time.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Store a freshly issued token.
    pub fn set(&mut self, token: String, expires: DateTime<Utc>) {
        self.token = Some(SecretString::from(token));
        self.expires = Some(expires);
    }

    /// Extend the current token, replacing it if the server rotated it.
    pub fn extend(&mut self, token: Option<String>, expires: DateTime<Utc>) {
        if let Some(token) = token {
            self.token = Some(SecretString::from(token));
        }
        self.expires = Some(expires);
    }

    /// Forget the current token.
    pub fn clear(&mut self) {
        self.token = None;
        self.expires = None;
    }
}

/// Payload of `POST user/` and `PATCH user/`.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub expires: Option<String>,
}

impl TokenResponse {
    pub(crate) fn expiry(&self) -> Result<DateTime<Utc>> {
        let raw = self
            .expires
            .as_deref()
            .ok_or_else(|| Error::ParseError("token response has no expiry".to_string()))?;
        parse_expiry(raw)
    }
}

/// Parse a phpIPAM expiry timestamp (`YYYY-MM-DD HH:MM:SS`) as UTC.
///
/// # Errors
///
/// Returns [`Error::ParseError`] if the timestamp does not match the format.
pub fn parse_expiry(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), EXPIRY_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|err| Error::ParseError(format!("Invalid token expiry `{raw}`: {err}")))
}
