//! User registration, authentication and profile service.

use chrono::Utc;
use serde_json::json;
use std::sync::{Arc, OnceLock};

use crate::auth::password::{hash_password_async, verify_password_async};
use crate::domain::entities::{NewUser, ProfileUpdate, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Data collected by the registration form.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Password checked against when the username is unknown, so that a failed
/// login costs one bcrypt verification either way.
const DUMMY_PASSWORD: &str = "no-such-user";

/// Service for user accounts.
///
/// Uniqueness is checked up front so the form can show a friendly message;
/// the database constraints still catch races between two registrations.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hash_cost: u32,
    dummy_hash: OnceLock<String>,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    ///
    /// `hash_cost` is the bcrypt cost used for new passwords.
    pub fn new(repository: Arc<R>, hash_cost: u32) -> Self {
        Self {
            repository,
            hash_cost,
            dummy_hash: OnceLock::new(),
        }
    }

    /// Hash of [`DUMMY_PASSWORD`] at the configured cost, computed on first use.
    async fn unknown_user_hash(&self) -> Result<String, AppError> {
        if let Some(hash) = self.dummy_hash.get() {
            return Ok(hash.clone());
        }

        let hash = hash_password_async(DUMMY_PASSWORD.to_string(), self.hash_cost).await?;
        Ok(self.dummy_hash.get_or_init(|| hash).clone())
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] naming the `username` or `email` field
    /// when either is already taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(&self, input: RegisterInput) -> Result<User, AppError> {
        let username = input.username.trim().to_string();
        let email = input.email.trim().to_string();

        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict(
                "Please use a different username.",
                json!({ "field": "username" }),
            ));
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "Please use a different email address.",
                json!({ "field": "email" }),
            ));
        }

        let password_hash = hash_password_async(input.password, self.hash_cost).await?;

        let user = self
            .repository
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "user registered");

        Ok(user)
    }

    /// Checks a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the user does not exist or the
    /// password does not match. Both cases produce the same error and run
    /// one bcrypt verification.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self.repository.find_by_username(username.trim()).await?;

        let password_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.unknown_user_hash().await?,
        };
        let valid = verify_password_async(password.to_string(), password_hash).await?;

        match user {
            Some(user) if valid => Ok(user),
            _ => {
                tracing::info!(username = %username, "failed login attempt");
                Err(AppError::unauthorized(
                    "Invalid username or password",
                    json!({}),
                ))
            }
        }
    }

    /// Looks up a user by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// Looks up a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no such user exists.
    pub async fn get_by_username(&self, username: &str) -> Result<User, AppError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "username": username })))
    }

    /// Updates a user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] naming the `username` field when the
    /// user picks a name that belongs to someone else.
    pub async fn update_profile(
        &self,
        user: &User,
        update: ProfileUpdate,
    ) -> Result<User, AppError> {
        let update = ProfileUpdate {
            username: update.username.trim().to_string(),
            about_me: update
                .about_me
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        if update.username != user.username
            && self
                .repository
                .find_by_username(&update.username)
                .await?
                .is_some()
        {
            return Err(AppError::conflict(
                "Please use a different username.",
                json!({ "field": "username" }),
            ));
        }

        self.repository.update_profile(user.id, update).await
    }

    /// Records that a user was active just now.
    pub async fn record_activity(&self, id: i64) -> Result<(), AppError> {
        self.repository.touch_last_seen(id, Utc::now()).await
    }

    /// Lists all users.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    /// Counts all users.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
