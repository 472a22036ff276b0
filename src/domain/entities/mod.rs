//! Core domain entities.
//!
//! Entities are plain data structures. Creation and partial updates use
//! separate input structs:
//!
//! - [`User`] - A registered account
//! - [`NewUser`] - Data for creating an account
//! - [`ProfileUpdate`] - Editable profile fields

pub mod user;

pub use user::{NewUser, ProfileUpdate, User};
