//! Utility functions used by request handlers.
//!
//! - [`next_url`] - Open-redirect-safe handling of the login `next` parameter

pub mod next_url;
