//! Route definitions for password and GitHub sign-in.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, github_auth};
use crate::state::AppState;

/// ```text
/// POST /login                   -> login
/// GET  /auth/verify             -> verify
/// GET  /auth/github             -> login_url
/// GET  /auth/github/callback    -> callback
/// POST /auth/github/login       -> login_with_code
/// GET  /github/repos            -> list_repos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/auth/verify", get(auth::verify))
        .route("/auth/github", get(github_auth::login_url))
        .route("/auth/github/callback", get(github_auth::callback))
        .route("/auth/github/login", post(github_auth::login_with_code))
        .route("/github/repos", get(github_auth::list_repos))
}
