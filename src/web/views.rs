//! Display-ready values shared by several templates.

use crate::domain::entities::User;

/// A post as shown in a feed.
///
/// Posts are not persisted yet; pages show fixed sample content.
#[derive(Debug, Clone)]
pub struct PostView {
    pub author: String,
    pub avatar: Option<String>,
    pub body: String,
}

impl PostView {
    pub fn new(author: &str, body: &str) -> Self {
        Self {
            author: author.to_string(),
            avatar: None,
            body: body.to_string(),
        }
    }

    pub fn by(user: &User, body: &str) -> Self {
        Self {
            author: user.username.clone(),
            avatar: Some(user.avatar(36)),
            body: body.to_string(),
        }
    }
}

/// Formats a timestamp the way profile pages show it.
pub fn format_timestamp(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}
