//! Session issuance for the shared upload password.

use axum_extra::extract::cookie::Cookie;
use time::OffsetDateTime;

use crate::{cookie, token::TokenCodec};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid password")]
    InvalidPassword,
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Payload prefix of every issued token
pub const PAYLOAD_PREFIX: &str = "auth:";

/// Exchanges the shared password for signed session tokens.
///
/// Holds no per-session state: a token stays valid until its cookie
/// expires, there is no revocation.
#[derive(Clone)]
pub struct SessionIssuer {
    expected_password: String,
    codec: TokenCodec,
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer").finish_non_exhaustive()
    }
}

impl SessionIssuer {
    pub fn new(expected_password: impl Into<String>, secret: impl AsRef<[u8]>) -> Self {
        Self {
            expected_password: expected_password.into(),
            codec: TokenCodec::new(secret),
        }
    }

    /// Checks `submitted` against the configured password and signs a new token.
    pub fn login(&self, submitted: Option<&str>) -> Result<String> {
        self.login_at(submitted, OffsetDateTime::now_utc())
    }

    pub fn login_at(&self, submitted: Option<&str>, now: OffsetDateTime) -> Result<String> {
        let Some(submitted) = submitted.filter(|p| !p.is_empty()) else {
            tracing::warn!("Login rejected: no password submitted");
            return Err(SessionError::InvalidPassword);
        };

        if submitted != self.expected_password {
            tracing::warn!("Login rejected: password mismatch");
            return Err(SessionError::InvalidPassword);
        }

        let payload = format!("{PAYLOAD_PREFIX}{}", epoch_millis(now));

        Ok(self.codec.sign(&payload))
    }

    /// Session cookie for a successful [`SessionIssuer::login`].
    pub fn login_cookie(&self, submitted: Option<&str>) -> Result<Cookie<'static>> {
        self.login(submitted).map(cookie::session_cookie)
    }

    /// Always succeeds; the returned cookie deletes the session on the client.
    pub fn logout(&self) -> Cookie<'static> {
        cookie::cleared_cookie()
    }
}

fn epoch_millis(now: OffsetDateTime) -> i128 {
    now.unix_timestamp_nanos() / 1_000_000
}
