//! Per-day owner visit counters.

use blog_core::types::Timestamp;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// One day's row from `owner_visit_logs`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OwnerVisitLog {
    pub visit_date: NaiveDate,
    pub visit_count: i32,
    #[serde(with = "blog_core::datetime")]
    pub last_visit_time: Timestamp,
}

/// Daily counts plus their sum over the requested window.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerVisitStats {
    pub visit_stats: Vec<OwnerVisitLog>,
    pub total_visits: i64,
    pub days: i64,
}
