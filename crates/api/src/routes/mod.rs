pub mod auth;
pub mod blogs;
pub mod categories;
pub mod comments;
pub mod health;
pub mod upload;
pub mod users;
pub mod visits;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree. Mounted both at the root and under `/api`.
///
/// Route hierarchy:
///
/// ```text
/// /login                                POST  password login
/// /auth/verify                          GET   validate bearer token
/// /auth/github                          GET   GitHub authorize URL
/// /auth/github/callback                 GET   ?code= sign-in
/// /auth/github/login                    POST  {code} sign-in
/// /github/repos                         GET   owner's public repositories
///
/// /users                                list, create (owner only)
///
/// /blogs                                list (paged)
/// /blogs/{id}                           get
///
/// /categories                           list (tree by default), create
/// /categories/hot-tags                  most used tags
/// /categories/{id}                      get (with subtree), update, delete
///
/// /comments                             list, create (auth required)
/// /comments/{id}                        delete (auth required)
///
/// /visits                               list (paged), create
/// /guest                                create
/// /owner/visits                         owner visit stats
/// /owner/today-visits                   today's owner visit count
///
/// /upload                               multipart proxy to the image host
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/blogs", blogs::router())
        .nest("/categories", categories::router())
        .nest("/comments", comments::router())
        .merge(visits::router())
        .nest("/upload", upload::router())
}
