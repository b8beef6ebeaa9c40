//! Repository for the bounded `visit_logs` table.
//!
//! Recency is `created_at`, ties broken by `id`. The retention pass in
//! [`crate::retention`] drives `count`, `cutoff` and `delete_older_than`.

use blog_core::pagination::Page;
use blog_core::retention::RetentionCutoff;
use blog_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::visit::VisitLog;

const COLUMNS: &str = "id, user_nickname, visit_time, content, created_at";

pub struct VisitLogRepo;

impl VisitLogRepo {
    pub async fn create(
        pool: &PgPool,
        user_nickname: &str,
        visit_time: Timestamp,
        content: &str,
    ) -> Result<VisitLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO visit_logs (user_nickname, visit_time, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VisitLog>(&query)
            .bind(user_nickname)
            .bind(visit_time)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// One page ordered by `(visit_time desc, id desc)`, plus the row count.
    pub async fn list(pool: &PgPool, page: Page) -> Result<(Vec<VisitLog>, i64), sqlx::Error> {
        let total = Self::count(pool).await?;
        let query = format!(
            "SELECT {COLUMNS} FROM visit_logs
             ORDER BY visit_time DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let logs = sqlx::query_as::<_, VisitLog>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((logs, total))
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visit_logs")
            .fetch_one(pool)
            .await
    }

    /// The `keep_count`-th most recent row, if the table has that many.
    pub async fn cutoff(
        pool: &PgPool,
        keep_count: i64,
    ) -> Result<Option<RetentionCutoff>, sqlx::Error> {
        let row = sqlx::query_as::<_, (Timestamp, DbId)>(
            "SELECT created_at, id FROM visit_logs
             ORDER BY created_at DESC, id DESC
             OFFSET $1 LIMIT 1",
        )
        .bind(keep_count - 1)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(recency, id)| RetentionCutoff { recency, id }))
    }

    /// Delete every row ranked below `cutoff`. Returns the number removed.
    pub async fn delete_older_than(
        pool: &PgPool,
        cutoff: RetentionCutoff,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM visit_logs WHERE (created_at, id) < ($1, $2)")
            .bind(cutoff.recency)
            .bind(cutoff.id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
