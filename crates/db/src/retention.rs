//! PostgreSQL-backed [`RetentionStore`] for the visit log.

use async_trait::async_trait;
use blog_core::retention::{RetentionCutoff, RetentionStore};
use sqlx::PgPool;

use crate::repositories::VisitLogRepo;

/// Retention store over `visit_logs`.
#[derive(Debug, Clone)]
pub struct PgVisitLogStore {
    pool: PgPool,
}

impl PgVisitLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RetentionStore for PgVisitLogStore {
    type Error = sqlx::Error;

    async fn count(&self) -> Result<u64, sqlx::Error> {
        let n = VisitLogRepo::count(&self.pool).await?;
        Ok(u64::try_from(n).unwrap_or(0))
    }

    async fn cutoff(&self, keep_count: usize) -> Result<Option<RetentionCutoff>, sqlx::Error> {
        let keep = i64::try_from(keep_count).unwrap_or(i64::MAX);
        VisitLogRepo::cutoff(&self.pool, keep).await
    }

    async fn delete_older_than(&self, cutoff: RetentionCutoff) -> Result<u64, sqlx::Error> {
        let deleted = VisitLogRepo::delete_older_than(&self.pool, cutoff).await?;
        tracing::debug!(deleted, cutoff_id = cutoff.id, "Pruned visit logs");
        Ok(deleted)
    }
}
