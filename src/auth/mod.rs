//! Credential handling: password hashing and session cookies.

pub mod password;
pub mod session;

pub use session::SessionManager;
