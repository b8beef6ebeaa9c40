//! Repository for the `blogs` table.

use blog_core::pagination::Page;
use blog_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog::{Blog, BlogFilter};

const SELECT: &str = "SELECT b.id, b.title, b.url, b.category_id, c.name AS category_name, \
                      b.description, b.created_at, b.updated_at \
                      FROM blogs b LEFT JOIN categories c ON c.id = b.category_id";

const FILTER: &str = "WHERE ($1::BIGINT IS NULL OR b.category_id = $1) \
                      AND ($2::TEXT IS NULL OR b.title ILIKE $2)";

pub struct BlogRepo;

impl BlogRepo {
    /// One page of blogs, newest first, plus the total matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &BlogFilter,
        page: Page,
    ) -> Result<(Vec<Blog>, i64), sqlx::Error> {
        let pattern = filter.keyword.as_ref().map(|k| format!("%{k}%"));

        let count_query = format!("SELECT COUNT(*) FROM blogs b {FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(filter.category_id)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "{SELECT} {FILTER}
             ORDER BY b.created_at DESC, b.id DESC
             LIMIT $3 OFFSET $4"
        );
        let blogs = sqlx::query_as::<_, Blog>(&query)
            .bind(filter.category_id)
            .bind(&pattern)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((blogs, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("{SELECT} WHERE b.id = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
