//! Session cookie transport.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Cookie name for the session token
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// 30 days in seconds
pub const MAX_AGE_SECONDS: i64 = 60 * 60 * 24 * 30;

fn base_cookie(value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, value))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Session cookie carrying `token`.
///
/// The token alphabet (`[A-Za-z0-9_-]` signature plus a `auth:<millis>`
/// payload) never needs cookie-value escaping.
pub fn session_cookie(token: impl Into<String>) -> Cookie<'static> {
    base_cookie(token.into(), Duration::seconds(MAX_AGE_SECONDS))
}

/// Same attributes as [`session_cookie`] with an empty value and `Max-Age=0`.
pub fn cleared_cookie() -> Cookie<'static> {
    base_cookie(String::new(), Duration::ZERO)
}

/// `Set-Cookie` header value for a fresh session.
pub fn build(token: &str) -> String {
    session_cookie(token).to_string()
}

/// `Set-Cookie` header value that deletes the session cookie.
pub fn clear() -> String {
    cleared_cookie().to_string()
}

/// Returns the session token from a raw `Cookie` request header.
///
/// Pairs are `;` separated with optional whitespace. Malformed pairs are
/// skipped and an empty value counts as absent.
pub fn extract(cookie_header: Option<&str>) -> Option<&str> {
    let header = cookie_header?;

    header
        .split(';')
        .filter_map(|pair| pair.trim_start().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE_NAME)
        .map(|(_, value)| value.trim_end())
        .filter(|value| !value.is_empty())
}
