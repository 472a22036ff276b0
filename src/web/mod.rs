//! Server-rendered web pages.
//!
//! Uses Askama templates for rendering and signed cookies for sessions.
//!
//! # Modules
//!
//! - [`handlers`] - Page handlers
//! - [`forms`] - Form payloads and validation
//! - [`middleware`] - Session resolution and login-required checks
//! - [`routes`] - Route configuration
//! - [`context`] - Per-request page context (current user, flashes, CSRF)
//! - [`cookies`], [`flash`], [`csrf`] - Cookie plumbing

pub mod context;
pub mod cookies;
pub mod csrf;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod views;
