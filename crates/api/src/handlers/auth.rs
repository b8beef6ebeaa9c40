//! Handlers for password login and token verification.

use axum::extract::State;
use axum::Json;
use blog_core::error::CoreError;
use blog_core::types::DbId;
use blog_db::models::user::{User, UserResponse};
use blog_db::repositories::UserRepo;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::handlers::visits::record_owner_visit_detached;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub account: String,
    pub password: String,
}

/// Token plus the user it was issued for. Shared with the GitHub flow.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
    pub is_owner: bool,
}

/// Response body for `GET /auth/verify`.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub id: DbId,
    pub name: String,
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub role: String,
    pub is_owner: bool,
    pub expires_at: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /login
///
/// Authenticate with account + password. An owner login also bumps today's
/// owner visit counter in the background.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid account or password".into(),
        ))
    };

    let user = UserRepo::find_by_account(&state.pool, input.account.trim())
        .await?
        .ok_or_else(invalid)?;

    // GitHub-only accounts have no password and cannot log in here.
    let hash = user.password_hash.as_deref().ok_or_else(invalid)?;
    let matches = verify_password(&input.password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !matches {
        tracing::info!(account = %user.account, "Login rejected: wrong password");
        return Err(invalid());
    }

    if user.is_owner() {
        record_owner_visit_detached(&state.pool);
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(ApiResponse::success(issue_token(&state, user)?))
}

/// GET /auth/verify
///
/// Validate the bearer token and return the current user.
pub async fn verify(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<VerifyResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User not found".into())))?;

    let expires_at = DateTime::from_timestamp(auth.expires_at, 0)
        .map(|ts| blog_core::datetime::format(&ts))
        .unwrap_or_default();

    Ok(ApiResponse::success(VerifyResponse {
        id: user.id,
        is_owner: user.is_owner(),
        name: user.name,
        account: user.account,
        nickname: user.nickname,
        role: user.role,
        expires_at,
    }))
}

/// Sign a token for `user` and package the login response.
pub(crate) fn issue_token(state: &AppState, user: User) -> AppResult<LoginResponse> {
    let token = generate_access_token(user.id, &user.account, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    Ok(LoginResponse {
        token,
        is_owner: user.is_owner(),
        user: UserResponse::from(user),
    })
}
