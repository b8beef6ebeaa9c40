//! GitHub OAuth sign-in and the owner's repository list.

use axum::extract::{Query, State};
use axum::Json;
use blog_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::github::{GitHubClient, Repository};
use crate::handlers::auth::{issue_token, LoginResponse};
use crate::handlers::visits::record_owner_visit_detached;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AuthorizeUrl {
    pub url: String,
}

/// `?code=` on the callback, or `{ "code": ... }` on the POST variant.
#[derive(Debug, Deserialize)]
pub struct CodeParams {
    #[serde(default)]
    pub code: String,
}

/// GET /auth/github
pub async fn login_url(State(state): State<AppState>) -> AppResult<ApiResponse<AuthorizeUrl>> {
    let github = &state.config.github;
    let (client_id, _) = github
        .credentials()
        .ok_or_else(|| AppError::InternalError("GitHub OAuth not configured".into()))?;

    Ok(ApiResponse::success(AuthorizeUrl {
        url: GitHubClient::authorize_url(client_id, &github.redirect_uri),
    }))
}

/// GET /auth/github/callback?code=
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CodeParams>,
) -> AppResult<ApiResponse<LoginResponse>> {
    sign_in(&state, &params.code).await.map(ApiResponse::success)
}

/// POST /auth/github/login
pub async fn login_with_code(
    State(state): State<AppState>,
    Json(params): Json<CodeParams>,
) -> AppResult<ApiResponse<LoginResponse>> {
    sign_in(&state, &params.code).await.map(ApiResponse::success)
}

/// GET /github/repos
pub async fn list_repos(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Repository>>> {
    let login = state
        .config
        .github
        .owner_login
        .as_deref()
        .ok_or_else(|| AppError::InternalError("GITHUB_OWNER_LOGIN not configured".into()))?;

    let repos = state.github.list_repos(login).await?;
    Ok(ApiResponse::success(repos))
}

/// Exchange the code, fetch the profile, find-or-create the user, issue a token.
async fn sign_in(state: &AppState, code: &str) -> AppResult<LoginResponse> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::BadRequest("Missing authorization code".into()));
    }

    let github = &state.config.github;
    let (client_id, client_secret) = github
        .credentials()
        .ok_or_else(|| AppError::InternalError("GitHub OAuth not configured".into()))?;

    let access_token = state
        .github
        .exchange_code(client_id, client_secret, code)
        .await?;
    let profile = state.github.fetch_user(&access_token).await?;

    let user =
        UserRepo::find_or_create_by_github(&state.pool, &profile, github.owner_github_id).await?;

    if user.is_owner() {
        record_owner_visit_detached(&state.pool);
    }

    tracing::info!(user_id = user.id, github_id = profile.id, "GitHub sign-in");
    issue_token(state, user)
}
