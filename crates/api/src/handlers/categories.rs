//! Handlers for the category hierarchy.
//!
//! Folders and articles share one self-referencing table. The list endpoint
//! returns a nested forest by default; the detail endpoint loads the subtree
//! below a single category level by level.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use blog_core::category::{
    clamp_hot_tag_limit, normalize_tags, resolve_type, validate_name, validate_parent,
    VALID_CATEGORY_TYPES,
};
use blog_core::error::CoreError;
use blog_core::tree::{build_tree, load_subtree};
use blog_core::types::DbId;
use blog_db::models::category::{CategoryFilter, CategoryInput};
use blog_db::repositories::CategoryRepo;
use blog_db::tree::CategoryChildLoader;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::{created, ApiResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CategoryListParams {
    /// Nest the result unless this is exactly `false`. Ignored when
    /// `parent_id` is set.
    pub tree: Option<String>,
    pub parent_id: Option<DbId>,
    #[serde(rename = "type")]
    pub category_type: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HotTagParams {
    pub limit: Option<i64>,
}

impl CategoryListParams {
    fn wants_tree(&self) -> bool {
        self.parent_id.is_none() && self.tree.as_deref() != Some("false")
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> AppResult<impl IntoResponse> {
    let as_tree = params.wants_tree();
    // Unknown types are ignored rather than rejected.
    let category_type = params
        .category_type
        .filter(|t| VALID_CATEGORY_TYPES.contains(&t.as_str()));

    let filter = CategoryFilter {
        parent_id: params.parent_id,
        category_type,
        keyword: params.keyword.filter(|k| !k.trim().is_empty()),
    };
    let categories = CategoryRepo::list(&state.pool, &filter).await?;

    if as_tree {
        Ok(ApiResponse::success(build_tree(categories)))
    } else {
        Ok(ApiResponse::success(categories))
    }
}

/// GET /categories/{id}
///
/// The category with every descendant nested under `children`.
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    category.children = load_subtree(&CategoryChildLoader::new(&state.pool), id).await?;

    Ok(ApiResponse::success(category))
}

/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    let category_type = resolve_type(input.category_type.as_deref())?;

    if let Some(parent_id) = input.parent_id {
        if !CategoryRepo::exists(&state.pool, parent_id).await? {
            return Err(AppError::BadRequest(format!(
                "Parent category {parent_id} does not exist"
            )));
        }
    }

    let tags = normalize_tags(input.tags.clone());
    let category = CategoryRepo::create(&state.pool, &input, category_type, &tags).await?;

    tracing::info!(
        category_id = category.id,
        parent_id = ?category.parent_id,
        category_type = %category.category_type,
        "Category created"
    );
    Ok(created(category))
}

/// PUT /categories/{id}
///
/// Full replace. Moving a category beneath itself or one of its own
/// descendants is rejected.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    let category_type = resolve_type(input.category_type.as_deref())?;
    validate_parent(id, input.parent_id)?;

    if let Some(parent_id) = input.parent_id {
        if !CategoryRepo::exists(&state.pool, parent_id).await? {
            return Err(AppError::BadRequest(format!(
                "Parent category {parent_id} does not exist"
            )));
        }
        if CategoryRepo::is_descendant(&state.pool, id, parent_id).await? {
            return Err(AppError::Core(CoreError::Validation(
                "A category cannot be moved beneath one of its descendants".into(),
            )));
        }
    }

    let tags = normalize_tags(input.tags.clone());
    let category = CategoryRepo::update(&state.pool, id, &input, category_type, &tags)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(category_id = id, "Category updated");
    Ok(ApiResponse::success(category))
}

/// DELETE /categories/{id}
///
/// Descendants and their comments are removed by the database cascade.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(category_id = id, "Category deleted");
    Ok(ApiResponse::success(()))
}

/// GET /categories/hot-tags?limit=
pub async fn hot_tags(
    State(state): State<AppState>,
    Query(params): Query<HotTagParams>,
) -> AppResult<impl IntoResponse> {
    let tags = CategoryRepo::hot_tags(&state.pool, clamp_hot_tag_limit(params.limit)).await?;
    Ok(ApiResponse::success(tags))
}
