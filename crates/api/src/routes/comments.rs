use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Mounted at `/comments`. Every route requires a bearer token.
///
/// ```text
/// GET    /        -> list_comments
/// POST   /        -> create_comment
/// DELETE /{id}    -> delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/{id}", delete(comments::delete_comment))
}
