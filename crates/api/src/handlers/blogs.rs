//! Read-only handlers for the blog link directory.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use blog_core::error::CoreError;
use blog_core::types::DbId;
use blog_db::models::blog::BlogFilter;
use blog_db::repositories::BlogRepo;

use crate::error::{AppError, AppResult};
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /blogs?category_id=&keyword=&page=&page_size=
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(filter): Query<BlogFilter>,
    Query(paging): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = paging.to_page()?;
    let (blogs, total) = BlogRepo::list(&state.pool, &filter, page).await?;
    Ok(ApiResponse::paged(blogs, total, page.page))
}

/// GET /blogs/{id}
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let blog = BlogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))?;
    Ok(ApiResponse::success(blog))
}
