//! Blog post metadata (read-only through the API).

use blog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `blogs` row joined with its category name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Blog {
    pub id: DbId,
    pub title: String,
    pub url: String,
    pub category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub description: String,
    #[serde(with = "blog_core::datetime")]
    pub created_at: Timestamp,
    #[serde(with = "blog_core::datetime")]
    pub updated_at: Timestamp,
}

/// Query filters for the blog list.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BlogFilter {
    pub category_id: Option<DbId>,
    pub keyword: Option<String>,
}
