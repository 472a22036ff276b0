//! Double-submit CSRF tokens.
//!
//! Form pages carry a random token both in the `csrf_token` cookie and in a
//! hidden form field; a POST is accepted only when the two match.

use rand::Rng;
use serde_json::json;

use crate::error::AppError;

pub const CSRF_COOKIE: &str = "csrf_token";

const TOKEN_BYTES: usize = 32;

/// Generates a fresh random token (64 hex characters).
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Checks a submitted token against the one stored in the cookie.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the cookie is missing or the tokens differ.
pub fn verify(cookie_token: Option<&str>, submitted: &str) -> Result<(), AppError> {
    match cookie_token {
        Some(expected) if !submitted.is_empty() && constant_time_eq(expected, submitted) => Ok(()),
        _ => Err(AppError::bad_request(
            "The CSRF token is missing or invalid.",
            json!({ "field": "csrf_token" }),
        )),
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token() {
        let a = generate_token();
        let b = generate_token();

        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_matching() {
        let token = generate_token();
        assert!(verify(Some(&token), &token).is_ok());
    }

    #[test]
    fn test_verify_rejects_mismatch_and_missing() {
        let token = generate_token();

        assert!(verify(Some(&token), &generate_token()).is_err());
        assert!(verify(None, &token).is_err());
        assert!(verify(Some(""), "").is_err());
        assert!(verify(Some(&token), &token[..10]).is_err());
    }
}
