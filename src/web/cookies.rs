//! Minimal cookie helpers for the `Cookie` / `Set-Cookie` headers.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Returns the value of cookie `name` from the request headers.
///
/// Handles multiple cookies in one header and multiple `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie_header| cookie_header.to_str().ok())
        .find_map(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(key), Some(value)) if key == name && !value.is_empty() => {
                        Some(value.to_string())
                    }
                    _ => None,
                }
            })
        })
}

/// Attributes shared by every cookie the site sets.
///
/// All cookies are site-wide, script-inaccessible and `SameSite=Lax`;
/// `secure` adds the `Secure` attribute when the site is served over HTTPS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
}

impl CookiePolicy {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// `Set-Cookie` value for a cookie that lives for the browser session.
    pub fn set(&self, name: &str, value: &str) -> String {
        self.finish(format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax"))
    }

    /// `Set-Cookie` value for a cookie that survives browser restarts.
    pub fn set_persistent(&self, name: &str, value: &str, max_age_secs: i64) -> String {
        self.finish(format!(
            "{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
        ))
    }

    /// `Set-Cookie` value that removes a cookie.
    pub fn expire(&self, name: &str) -> String {
        self.finish(format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"))
    }

    fn finish(&self, mut cookie: String) -> String {
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_read_cookie_among_many() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session=abc.def; flash=xyz"),
        );

        assert_eq!(read_cookie(&headers, "session"), Some("abc.def".to_string()));
        assert_eq!(read_cookie(&headers, "flash"), Some("xyz".to_string()));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("b=2"));

        assert_eq!(read_cookie(&headers, "b"), Some("2".to_string()));
    }

    #[test]
    fn test_empty_value_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session="));

        assert_eq!(read_cookie(&headers, "session"), None);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("token=a=b"));

        assert_eq!(read_cookie(&headers, "token"), Some("a=b".to_string()));
    }

    #[test]
    fn test_expired_cookie() {
        assert_eq!(
            CookiePolicy::default().expire("flash"),
            "flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
        );
    }

    #[test]
    fn test_secure_policy_marks_every_cookie() {
        let policy = CookiePolicy::new(true);

        assert_eq!(
            policy.set("csrf_token", "abc"),
            "csrf_token=abc; Path=/; HttpOnly; SameSite=Lax; Secure"
        );
        assert_eq!(
            policy.set_persistent("session", "x", 60),
            "session=x; Path=/; HttpOnly; SameSite=Lax; Max-Age=60; Secure"
        );
        assert!(policy.expire("flash").ends_with("Max-Age=0; Secure"));

        assert!(!CookiePolicy::new(false).set("flash", "x").contains("Secure"));
    }
}
