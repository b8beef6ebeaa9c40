//! Visit log and guest record models.

use blog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Content stored when a visit is posted without one.
pub const DEFAULT_VISIT_CONTENT: &str = "Regular visit";

/// A row from the bounded `visit_logs` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VisitLog {
    pub id: DbId,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_nickname: String,
    #[serde(with = "blog_core::datetime")]
    pub visit_time: Timestamp,
    pub content: String,
    #[serde(with = "blog_core::datetime")]
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateVisitLog {
    #[serde(default)]
    pub user_nickname: String,
    #[serde(default, with = "blog_core::datetime::option")]
    pub visit_time: Option<Timestamp>,
    #[serde(default)]
    pub content: String,
}

/// A row from the `guest_records` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GuestRecord {
    pub id: DbId,
    #[serde(with = "blog_core::datetime")]
    pub entry_time: Timestamp,
    pub content: String,
    #[serde(with = "blog_core::datetime")]
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateGuestRecord {
    #[serde(default, with = "blog_core::datetime::option")]
    pub entry_time: Option<Timestamp>,
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_time_accepts_either_format() {
        let a: CreateVisitLog =
            serde_json::from_str(r#"{"visit_time":"2024-05-01 08:00:00"}"#).unwrap();
        let b: CreateVisitLog =
            serde_json::from_str(r#"{"visit_time":"2024-05-01T08:00:00Z"}"#).unwrap();
        assert_eq!(a.visit_time, b.visit_time);
        assert!(a.visit_time.is_some());
        assert!(a.content.is_empty());
    }

    #[test]
    fn missing_visit_time_is_none() {
        let v: CreateVisitLog = serde_json::from_str(r#"{"content":"hi"}"#).unwrap();
        assert!(v.visit_time.is_none());
    }
}
