//! Handlers for user accounts.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use blog_core::error::CoreError;
use blog_core::roles::ROLE_USER;
use blog_db::models::user::{CreateUser, UserResponse};
use blog_db::repositories::UserRepo;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireOwner;
use crate::response::{created, ApiResponse};
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub account: String,
    pub password: Option<String>,
    pub nickname: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(ApiResponse::success(users))
}

/// POST /users
///
/// Owner only. Duplicate accounts surface as 409 via `uq_users_account`.
pub async fn create_user(
    RequireOwner(owner): RequireOwner,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let name = input.name.trim();
    let account = input.account.trim();
    if name.is_empty() || account.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name and account are required".into(),
        )));
    }

    let password_hash = match input.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => Some(
            hash_password(password)
                .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?,
        ),
        None => None,
    };

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: name.to_string(),
            account: account.to_string(),
            nickname: input.nickname,
            birthday: input.birthday,
            password_hash,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = owner.user_id, "User created");
    Ok(created(UserResponse::from(user)))
}
