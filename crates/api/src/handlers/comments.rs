//! Handlers for threaded article comments. All endpoints require a token.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use blog_core::comment::{validate_content, validate_nickname};
use blog_core::error::CoreError;
use blog_core::types::DbId;
use blog_db::models::comment::{CreateComment, CreateCommentRequest};
use blog_db::repositories::CommentRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::PageParams;
use crate::response::{created, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentListParams {
    pub article_id: DbId,
    /// Return the whole thread, oldest first, without paging.
    #[serde(default)]
    pub all: bool,
}

/// GET /comments?article_id=&page=&page_size=&all=
///
/// Paged: root comments newest first, each carrying its full reply tree;
/// `total` counts roots.
pub async fn list_comments(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<CommentListParams>,
    Query(paging): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    if params.all {
        let thread = CommentRepo::thread(&state.pool, params.article_id).await?;
        return Ok(ApiResponse::success(thread));
    }

    let page = paging.to_page()?;
    let (roots, total) = CommentRepo::thread_page(&state.pool, params.article_id, page).await?;
    Ok(ApiResponse::paged(roots, total, page.page))
}

/// POST /comments
pub async fn create_comment(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    let nickname = validate_nickname(&input.nickname)?.to_string();
    let content = validate_content(&input.content)?.to_string();

    if !CommentRepo::article_exists(&state.pool, input.article_id).await? {
        return Err(AppError::BadRequest(format!(
            "Article {} does not exist",
            input.article_id
        )));
    }
    if let Some(parent_id) = input.parent_id {
        if !CommentRepo::parent_exists(&state.pool, parent_id, input.article_id).await? {
            return Err(AppError::BadRequest(format!(
                "Parent comment {parent_id} does not belong to article {}",
                input.article_id
            )));
        }
    }

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            article_id: input.article_id,
            parent_id: input.parent_id,
            nickname,
            email: input.email.filter(|e| !e.trim().is_empty()),
            avatar_url: input.avatar_url.filter(|a| !a.trim().is_empty()),
            content,
        },
    )
    .await?;

    tracing::info!(
        comment_id = comment.id,
        article_id = comment.article_id,
        user_id = user.user_id,
        "Comment created"
    );
    Ok(created(comment))
}

/// DELETE /comments/{id}
///
/// Replies go with their parent (database cascade).
pub async fn delete_comment(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CommentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }));
    }
    tracing::info!(comment_id = id, user_id = user.user_id, "Comment deleted");
    Ok(ApiResponse::success(()))
}
