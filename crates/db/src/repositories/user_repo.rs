//! Repository for the `users` table.

use blog_core::roles::{ROLE_OWNER, ROLE_USER};
use blog_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, GitHubProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, account, nickname, birthday, password_hash, role, \
                       github_id, avatar_url, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, account, nickname, birthday, password_hash, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.account)
            .bind(&input.nickname)
            .bind(input.birthday)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by account name (case-sensitive).
    pub async fn find_by_account(
        pool: &PgPool,
        account: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE account = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(account)
            .fetch_optional(pool)
            .await
    }

    /// List all users, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id ASC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Find the user linked to a GitHub account, creating it on first sign-in.
    ///
    /// The avatar is refreshed on every sign-in. `owner_github_id` marks which
    /// GitHub account is granted the owner role.
    pub async fn find_or_create_by_github(
        pool: &PgPool,
        profile: &GitHubProfile,
        owner_github_id: Option<i64>,
    ) -> Result<User, sqlx::Error> {
        let role = if owner_github_id == Some(profile.id) {
            ROLE_OWNER
        } else {
            ROLE_USER
        };
        let query = format!(
            "INSERT INTO users (name, account, nickname, github_id, avatar_url, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (github_id) DO UPDATE SET
                avatar_url = EXCLUDED.avatar_url,
                role = EXCLUDED.role
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(profile.display_name())
            .bind(profile.account())
            .bind(&profile.login)
            .bind(profile.id)
            .bind(&profile.avatar_url)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Create or refresh the configured owner account.
    pub async fn upsert_owner(
        pool: &PgPool,
        account: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, account, password_hash, role)
             VALUES ($1, $1, $2, '{ROLE_OWNER}')
             ON CONFLICT (account) DO UPDATE SET
                password_hash = EXCLUDED.password_hash,
                role = '{ROLE_OWNER}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(account)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }
}
