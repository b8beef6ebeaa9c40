//! Repository for the `comments` table.

use blog_core::pagination::Page;
use blog_core::tree::build_tree;
use blog_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CreateComment};

const COLUMNS: &str = "id, article_id, parent_id, nickname, email, avatar_url, content, created_at";

/// Provides thread queries and CRUD for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Every comment on an article, oldest first.
    pub async fn list_by_article(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE article_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    /// Full thread for an article as a forest, oldest roots first.
    pub async fn thread(pool: &PgPool, article_id: DbId) -> Result<Vec<Comment>, sqlx::Error> {
        let flat = Self::list_by_article(pool, article_id).await?;
        Ok(build_tree(flat))
    }

    /// Number of top-level comments on an article.
    pub async fn count_roots(pool: &PgPool, article_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE article_id = $1 AND parent_id IS NULL",
        )
        .bind(article_id)
        .fetch_one(pool)
        .await
    }

    /// One page of top-level comments, newest first.
    pub async fn list_roots(
        pool: &PgPool,
        article_id: DbId,
        page: Page,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE article_id = $1 AND parent_id IS NULL
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(article_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Every reply on an article, oldest first.
    pub async fn list_replies(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE article_id = $1 AND parent_id IS NOT NULL
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    /// A page of root comments with their complete reply trees.
    ///
    /// `total` counts root comments only. Replies whose root is on another
    /// page are fetched but end up unreachable and are discarded by the
    /// tree builder.
    pub async fn thread_page(
        pool: &PgPool,
        article_id: DbId,
        page: Page,
    ) -> Result<(Vec<Comment>, i64), sqlx::Error> {
        let total = Self::count_roots(pool, article_id).await?;
        if total == 0 {
            return Ok((Vec::new(), 0));
        }

        let mut rows = Self::list_roots(pool, article_id, page).await?;
        if rows.is_empty() {
            return Ok((rows, total));
        }
        rows.extend(Self::list_replies(pool, article_id).await?);

        Ok((build_tree(rows), total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `article_id` names a category of type `article`.
    pub async fn article_exists(pool: &PgPool, article_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1 AND type = 'article')",
        )
        .bind(article_id)
        .fetch_one(pool)
        .await
    }

    /// Whether `parent_id` is a comment on the same article.
    pub async fn parent_exists(
        pool: &PgPool,
        parent_id: DbId,
        article_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1 AND article_id = $2)",
        )
        .bind(parent_id)
        .bind(article_id)
        .fetch_one(pool)
        .await
    }

    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (article_id, parent_id, nickname, email, avatar_url, content)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.article_id)
            .bind(input.parent_id)
            .bind(&input.nickname)
            .bind(&input.email)
            .bind(&input.avatar_url)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Delete a comment and its replies. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
