//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - PostgreSQL repository implementations

pub mod persistence;
