//! Auth cookie construction and parsing.
//!
//! Both tokens travel as `HttpOnly; SameSite=Strict` cookies. The refresh
//! token travels *only* here — never in a header — so logging proxies
//! that capture headers cannot leak it.

use axum::http::{HeaderMap, header};

/// Cookie name for the access token (1 hour).
pub const ACCESS_COOKIE: &str = "accessToken";

/// Cookie name for the refresh token (1 year).
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Extract a cookie value from the Cookie header.
pub fn get_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in cookie_header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                return Some(value);
            }
        }
    }
    None
}

/// Build a `Set-Cookie` value for an auth token.
pub fn auth_cookie(name: &str, value: &str, domain: &str, max_age_seconds: u64) -> String {
    format!(
        "{name}={value}; HttpOnly; SameSite=Strict; Path=/; Domain={domain}; Max-Age={max_age_seconds}"
    )
}

/// Build a `Set-Cookie` value that clears an auth cookie.
pub fn expired_cookie(name: &str, domain: &str) -> String {
    format!("{name}=; HttpOnly; SameSite=Strict; Path=/; Domain={domain}; Max-Age=0")
}
