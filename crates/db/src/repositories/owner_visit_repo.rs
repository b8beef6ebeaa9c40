//! Repository for `owner_visit_logs`, one counter row per calendar day (UTC).

use chrono::{Days, NaiveDate};
use sqlx::PgPool;

use crate::models::owner_visit::{OwnerVisitLog, OwnerVisitStats};

pub struct OwnerVisitRepo;

impl OwnerVisitRepo {
    /// Bump the counter for `today`, creating the row on the first visit.
    pub async fn record_visit(pool: &PgPool, today: NaiveDate) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO owner_visit_logs (visit_date, visit_count)
             VALUES ($1, 1)
             ON CONFLICT (visit_date) DO UPDATE SET
                visit_count = owner_visit_logs.visit_count + 1,
                last_visit_time = NOW()",
        )
        .bind(today)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Daily counts for the `days` days ending at `today`, newest first.
    pub async fn stats(
        pool: &PgPool,
        today: NaiveDate,
        days: i64,
    ) -> Result<OwnerVisitStats, sqlx::Error> {
        let back = u64::try_from(days.saturating_sub(1)).unwrap_or(0);
        let since = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);

        let visit_stats = sqlx::query_as::<_, OwnerVisitLog>(
            "SELECT visit_date, visit_count, last_visit_time
             FROM owner_visit_logs
             WHERE visit_date >= $1
             ORDER BY visit_date DESC",
        )
        .bind(since)
        .fetch_all(pool)
        .await?;

        let total_visits: i64 = visit_stats.iter().map(|s| i64::from(s.visit_count)).sum();

        Ok(OwnerVisitStats {
            visit_stats,
            total_visits,
            days,
        })
    }

    /// Visits recorded for `today`, zero if none.
    pub async fn today_visits(pool: &PgPool, today: NaiveDate) -> Result<i32, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i32>(
            "SELECT visit_count FROM owner_visit_logs WHERE visit_date = $1",
        )
        .bind(today)
        .fetch_optional(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
