use axum::routing::get;
use axum::Router;

use crate::handlers::blogs;
use crate::state::AppState;

/// Mounted at `/blogs`.
///
/// ```text
/// GET /        -> list_blogs
/// GET /{id}    -> get_blog
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::list_blogs))
        .route("/{id}", get(blogs::get_blog))
}
