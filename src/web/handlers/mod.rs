//! HTML page handlers.

mod edit_profile;
mod index;
mod login;
mod logout;
mod not_found;
mod register;
mod user;

pub use edit_profile::{edit_profile_page, edit_profile_submit};
pub use index::index_handler;
pub use login::{login_page, login_submit};
pub use logout::logout_handler;
pub use not_found::not_found_handler;
pub use register::{register_page, register_submit};
pub use user::user_handler;
