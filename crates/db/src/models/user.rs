//! User entity model and DTOs.

use blog_core::roles::is_owner;
use blog_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Carries the password hash, so it is never serialized directly. Use
/// [`UserResponse`] for anything sent to a client.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub account: String,
    pub nickname: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub password_hash: Option<String>,
    pub role: String,
    pub github_id: Option<i64>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
}

impl User {
    pub fn is_owner(&self) -> bool {
        is_owner(&self.role)
    }
}

/// Safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(with = "blog_core::datetime")]
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            account: user.account,
            nickname: user.nickname,
            birthday: user.birthday,
            role: user.role,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a user. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub account: String,
    pub nickname: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub password_hash: Option<String>,
    pub role: String,
}

/// Profile fetched from GitHub after a successful OAuth exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubProfile {
    pub id: i64,
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl GitHubProfile {
    /// Synthetic account name used for GitHub sign-ins.
    pub fn account(&self) -> String {
        format!("github_{}", self.id)
    }

    /// Display name, falling back to the login when the profile has none.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }
}
