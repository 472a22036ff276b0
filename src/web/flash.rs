//! One-shot flash messages carried across a redirect in a cookie.
//!
//! The cookie holds a base64url-encoded JSON list of messages. The next page
//! that renders them also clears the cookie.

use axum::http::HeaderMap;
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::web::cookies::{CookiePolicy, read_cookie};

pub const FLASH_COOKIE: &str = "flash";

/// Encodes messages into a cookie-safe value.
pub fn encode(messages: &[String]) -> String {
    let json = serde_json::to_vec(messages).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decodes a cookie value. Garbage decodes to no messages.
pub fn decode(value: &str) -> Vec<String> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// Reads pending flash messages from the request.
pub fn take(headers: &HeaderMap) -> Vec<String> {
    read_cookie(headers, FLASH_COOKIE)
        .map(|value| decode(&value))
        .unwrap_or_default()
}

/// `Set-Cookie` value queueing `message` for the next page.
pub fn set(policy: CookiePolicy, message: &str) -> String {
    policy.set(FLASH_COOKIE, &encode(&[message.to_string()]))
}

/// `Set-Cookie` value discarding displayed messages.
pub fn clear(policy: CookiePolicy) -> String {
    policy.expire(FLASH_COOKIE)
}

/// `303 See Other` redirect to `to`, setting every given cookie.
pub fn redirect_with_cookies(to: &str, cookies: Vec<String>) -> Response {
    let mut response = (StatusCode::SEE_OTHER, [(LOCATION, to.to_string())]).into_response();
    for cookie in cookies {
        match cookie.parse() {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(_) => tracing::warn!("dropping cookie that is not a valid header value"),
        }
    }
    response
}

/// Redirects to `to` and shows `message` on the next rendered page.
pub fn redirect_with_flash(policy: CookiePolicy, to: &str, message: &str) -> Response {
    redirect_with_cookies(to, vec![set(policy, message)])
}
