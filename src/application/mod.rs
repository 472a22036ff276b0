//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a small API that already speaks [`crate::error::AppError`].
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - Registration, login checks and profiles

pub mod services;
