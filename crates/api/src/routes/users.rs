use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(users::list_users).post(users::create_user))
}
