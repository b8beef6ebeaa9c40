//! Route definitions for the category hierarchy.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Mounted at `/categories`.
///
/// ```text
/// GET    /            -> list_categories
/// POST   /            -> create_category
/// GET    /hot-tags    -> hot_tags
/// GET    /{id}        -> get_category
/// PUT    /{id}        -> update_category
/// DELETE /{id}        -> delete_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/hot-tags", get(categories::hot_tags))
        .route(
            "/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
}
