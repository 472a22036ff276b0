//! Web-specific middleware.
//!
//! - [`session`] - resolves the session cookie and records user activity
//! - [`web_auth`] - redirects anonymous visitors of protected pages to `/login`

pub mod session;
pub mod web_auth;
