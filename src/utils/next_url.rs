//! Validation of the post-login `next` redirect target.

use url::Url;

/// Base used to resolve relative targets; only its origin matters.
const LOCAL_BASE: &str = "http://localhost/";

/// Returns a same-site redirect target for `next`, or `None` if it is unsafe.
///
/// Only relative references without a scheme or host are accepted, so a
/// crafted `?next=https://evil.example` or `?next=//evil.example` cannot turn
/// the login form into an open redirect. The result is the normalized path
/// plus query.
pub fn safe_next(next: &str) -> Option<String> {
    let next = next.trim();
    if next.is_empty() || next.contains('\\') {
        return None;
    }

    if Url::parse(next).is_ok() {
        return None;
    }

    let base = Url::parse(LOCAL_BASE).ok()?;
    let resolved = base.join(next).ok()?;
    if resolved.origin() != base.origin() {
        return None;
    }

    let mut target = resolved.path().to_string();
    if let Some(query) = resolved.query() {
        target.push('?');
        target.push_str(query);
    }

    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_are_kept() {
        assert_eq!(safe_next("/index"), Some("/index".to_string()));
        assert_eq!(safe_next("/user/susan"), Some("/user/susan".to_string()));
        assert_eq!(
            safe_next("/edit_profile?x=1"),
            Some("/edit_profile?x=1".to_string())
        );
        assert_eq!(safe_next("index"), Some("/index".to_string()));
    }

    #[test]
    fn test_absolute_urls_are_rejected() {
        assert_eq!(safe_next("https://evil.example/"), None);
        assert_eq!(safe_next("http://localhost/index"), None);
        assert_eq!(safe_next("javascript:alert(1)"), None);
    }

    #[test]
    fn test_scheme_relative_urls_are_rejected() {
        assert_eq!(safe_next("//evil.example/path"), None);
        assert_eq!(safe_next("/\\evil.example"), None);
    }

    #[test]
    fn test_empty_is_rejected() {
        assert_eq!(safe_next(""), None);
        assert_eq!(safe_next("   "), None);
    }
}
