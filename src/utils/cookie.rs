//! The access token cookie.
//!
//! Browsers receive the token as an `HttpOnly` cookie so scripts cannot read
//! it. API clients may ignore the cookie and send the token from the response
//! body as a bearer header instead.

use anyhow::anyhow;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::AppendHeaders;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use mytherion_config::JwtConfig;
use mytherion_core::AppError;

pub const TOKEN_COOKIE_NAME: &str = "mytherion_token";

/// `Set-Cookie` value carrying a freshly issued token.
pub fn session_cookie(token: &str, config: &JwtConfig) -> Result<HeaderValue, AppError> {
    build(token, config.access_token_seconds(), config.cookie_secure)
}

/// `Set-Cookie` value that makes the browser drop the token cookie.
pub fn cleared_cookie(config: &JwtConfig) -> Result<HeaderValue, AppError> {
    build("", 0, config.cookie_secure)
}

/// Wraps a cookie value as a response header part.
pub fn set_cookie(value: HeaderValue) -> AppendHeaders<[(HeaderName, HeaderValue); 1]> {
    AppendHeaders([(SET_COOKIE, value)])
}

/// Value of the token cookie on a request, if present and non-empty.
pub fn token_from_cookie(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE_NAME)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
}

fn build(value: &str, max_age: i64, secure: bool) -> Result<HeaderValue, AppError> {
    let cookie = Cookie::build((TOKEN_COOKIE_NAME, value))
        .path("/")
        .max_age(Duration::seconds(max_age))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .build();

    HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| AppError::internal(anyhow!("Invalid cookie header: {}", e)))
}
