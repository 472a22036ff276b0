//! JSON endpoints for operators and load balancers.
//!
//! - [`dto`] - Response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing and rate limiting

pub mod dto;
pub mod handlers;
pub mod middleware;
