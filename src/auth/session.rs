//! Signed session cookies.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::web::cookies::CookiePolicy;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie carrying the session.
pub const SESSION_COOKIE: &str = "session";

/// Issues and verifies stateless session cookies.
///
/// The cookie value is `<user_id>.<expires_unix>.<mac>`, where `mac` is the
/// hex-encoded HMAC-SHA256 of `<user_id>.<expires_unix>` keyed by the server
/// secret. Nothing is stored server-side; logging out clears the cookie.
#[derive(Clone)]
pub struct SessionManager {
    secret: String,
    session_ttl: Duration,
    remember_ttl: Duration,
    cookies: CookiePolicy,
}

impl SessionManager {
    /// Creates a new session manager.
    ///
    /// # Arguments
    ///
    /// - `secret` - HMAC key; sessions signed with another key are rejected
    /// - `session_ttl` - lifetime of an ordinary session
    /// - `remember_ttl` - lifetime of a "remember me" session
    /// - `secure` - whether cookies carry the `Secure` attribute
    pub fn new(secret: String, session_ttl: Duration, remember_ttl: Duration, secure: bool) -> Self {
        Self {
            secret,
            session_ttl,
            remember_ttl,
            cookies: CookiePolicy::new(secure),
        }
    }

    /// Cookie attributes every site cookie should share with the session.
    pub fn cookie_policy(&self) -> CookiePolicy {
        self.cookies
    }

    fn sign(&self, payload: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Builds the signed cookie value for a user.
    pub fn token(&self, user_id: i64, remember: bool) -> String {
        let ttl = if remember {
            self.remember_ttl
        } else {
            self.session_ttl
        };
        // Saturates instead of panicking on absurd lifetimes.
        let expires = Utc::now()
            .checked_add_signed(ttl)
            .map_or(i64::MAX, |at| at.timestamp());
        let payload = format!("{user_id}.{expires}");
        let signature = self.sign(&payload);
        format!("{payload}.{signature}")
    }

    /// Returns the `Set-Cookie` header value that starts a session.
    ///
    /// "Remember me" sessions get a `Max-Age` so they survive browser
    /// restarts; ordinary sessions end with the browser session.
    pub fn issue(&self, user_id: i64, remember: bool) -> String {
        let token = self.token(user_id, remember);
        if remember {
            self.cookies
                .set_persistent(SESSION_COOKIE, &token, self.remember_ttl.num_seconds())
        } else {
            self.cookies.set(SESSION_COOKIE, &token)
        }
    }

    /// Returns the `Set-Cookie` header value that ends a session.
    pub fn clear(&self) -> String {
        self.cookies.expire(SESSION_COOKIE)
    }

    /// Verifies a cookie value and returns the user ID it carries.
    ///
    /// Returns `None` for malformed, forged or expired values.
    pub fn verify(&self, value: &str) -> Option<i64> {
        let (payload, signature) = value.rsplit_once('.')?;
        let (user_id, expires) = payload.split_once('.')?;

        let signature = hex::decode(signature).ok()?;
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes()).ok()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let expires: i64 = expires.parse().ok()?;
        if expires <= Utc::now().timestamp() {
            return None;
        }

        user_id.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(secret: &str) -> SessionManager {
        SessionManager::new(
            secret.to_string(),
            Duration::hours(24),
            Duration::days(365),
            false,
        )
    }

    #[test]
    fn test_token_roundtrip() {
        let sessions = manager("secret");
        let token = sessions.token(42, false);
        assert_eq!(sessions.verify(&token), Some(42));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = manager("secret-a").token(42, true);
        assert_eq!(manager("secret-b").verify(&token), None);
    }

    #[test]
    fn test_tampered_user_id_is_rejected() {
        let sessions = manager("secret");
        let token = sessions.token(42, false);
        let tampered = token.replacen("42", "43", 1);
        assert_eq!(sessions.verify(&tampered), None);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let sessions = SessionManager::new(
            "secret".to_string(),
            Duration::seconds(-10),
            Duration::days(1),
            false,
        );
        let token = sessions.token(7, false);
        assert_eq!(sessions.verify(&token), None);
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        let sessions = manager("secret");
        assert_eq!(sessions.verify(""), None);
        assert_eq!(sessions.verify("42"), None);
        assert_eq!(sessions.verify("42.123"), None);
        assert_eq!(sessions.verify("42.123.zz"), None);
        assert_eq!(sessions.verify("abc.def.0011"), None);
    }

    #[test]
    fn test_issue_cookie_attributes() {
        let sessions = manager("secret");

        let cookie = sessions.issue(1, false);
        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Max-Age"));

        let cookie = sessions.issue(1, true);
        assert!(cookie.contains(&format!("Max-Age={}", 365 * 24 * 3600)));
    }

    #[test]
    fn test_huge_lifetime_does_not_panic() {
        let sessions = SessionManager::new(
            "secret".to_string(),
            Duration::hours(1),
            Duration::days(100_000_000),
            false,
        );

        let token = sessions.token(1, true);
        assert_eq!(sessions.verify(&token), Some(1));
        assert!(sessions.issue(1, true).contains("Max-Age="));
    }

    #[test]
    fn test_secure_flag() {
        let sessions = SessionManager::new(
            "secret".to_string(),
            Duration::hours(1),
            Duration::days(1),
            true,
        );
        assert!(sessions.issue(1, false).ends_with("; Secure"));
        assert!(sessions.clear().ends_with("; Secure"));
        assert!(sessions.cookie_policy().secure);
    }

    #[test]
    fn test_clear_expires_cookie() {
        let cookie = manager("secret").clear();
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
