//! Repository for the `categories` table.
//!
//! Every list query returns rows pre-sorted by `(sort_order, id)` so the tree
//! builder can keep input order for siblings.

use blog_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryFilter, CategoryInput, HotTag};

const COLUMNS: &str = "id, name, type, parent_id, sort_order, description, tags, url, \
                       img_url, created_at, updated_at";

/// Provides CRUD and hierarchy queries for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List categories matching `filter`, ordered by `(sort_order, id)`.
    pub async fn list(
        pool: &PgPool,
        filter: &CategoryFilter,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let pattern = filter.keyword.as_ref().map(|k| format!("%{k}%"));
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE ($1::BIGINT IS NULL OR parent_id = $1)
               AND ($2::TEXT IS NULL OR type = $2)
               AND ($3::TEXT IS NULL OR name ILIKE $3)
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(filter.parent_id)
            .bind(&filter.category_type)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Direct children of `parent_id`, ordered by `(sort_order, id)`.
    pub async fn find_children(
        pool: &PgPool,
        parent_id: DbId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE parent_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Whether `candidate` lies anywhere beneath `ancestor`.
    pub async fn is_descendant(
        pool: &PgPool,
        ancestor: DbId,
        candidate: DbId,
    ) -> Result<bool, sqlx::Error> {
        // UNION (not UNION ALL) stops on stored cycles.
        sqlx::query_scalar::<_, bool>(
            "WITH RECURSIVE subtree AS (
                SELECT id FROM categories WHERE parent_id = $1
                UNION
                SELECT c.id FROM categories c JOIN subtree s ON c.parent_id = s.id
             )
             SELECT EXISTS(SELECT 1 FROM subtree WHERE id = $2)",
        )
        .bind(ancestor)
        .bind(candidate)
        .fetch_one(pool)
        .await
    }

    /// Insert a category. `category_type` and `tags` are already validated.
    pub async fn create(
        pool: &PgPool,
        input: &CategoryInput,
        category_type: &str,
        tags: &[String],
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories
                (name, type, parent_id, sort_order, description, tags, url, img_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(input.name.trim())
            .bind(category_type)
            .bind(input.parent_id)
            .bind(input.sort_order)
            .bind(&input.description)
            .bind(tags)
            .bind(&input.url)
            .bind(&input.img_url)
            .fetch_one(pool)
            .await
    }

    /// Replace every editable field. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CategoryInput,
        category_type: &str,
        tags: &[String],
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = $2,
                type = $3,
                parent_id = $4,
                sort_order = $5,
                description = $6,
                tags = $7,
                url = $8,
                img_url = $9,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(input.name.trim())
            .bind(category_type)
            .bind(input.parent_id)
            .bind(input.sort_order)
            .bind(&input.description)
            .bind(tags)
            .bind(&input.url)
            .bind(&input.img_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category and, through `ON DELETE CASCADE`, its whole subtree
    /// and their comments. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Most used tags, by number of categories carrying them.
    pub async fn hot_tags(pool: &PgPool, limit: i64) -> Result<Vec<HotTag>, sqlx::Error> {
        sqlx::query_as::<_, HotTag>(
            "SELECT tag AS name, COUNT(*) AS count
             FROM categories, unnest(tags) AS tag
             GROUP BY tag
             ORDER BY count DESC, name ASC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
