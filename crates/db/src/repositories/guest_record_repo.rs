//! Repository for the `guest_records` table.

use blog_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::visit::GuestRecord;

pub struct GuestRecordRepo;

impl GuestRecordRepo {
    pub async fn create(
        pool: &PgPool,
        entry_time: Timestamp,
        content: &str,
    ) -> Result<GuestRecord, sqlx::Error> {
        sqlx::query_as::<_, GuestRecord>(
            "INSERT INTO guest_records (entry_time, content)
             VALUES ($1, $2)
             RETURNING id, entry_time, content, created_at",
        )
        .bind(entry_time)
        .bind(content)
        .fetch_one(pool)
        .await
    }
}
