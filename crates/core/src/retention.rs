//! Bounded retention for append-only log tables.
//!
//! After each insert the table is trimmed back to the `keep_count` most
//! recent rows, ranked by `(recency, id)` descending. The pass is not
//! transactional: concurrent inserts may leave a few extra rows behind, which
//! the next pass removes.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Number of visit-log rows kept when nothing else is configured.
pub const DEFAULT_KEEP_COUNT: usize = 20;

/// How many rows a retention pass keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    keep_count: usize,
}

impl RetentionPolicy {
    /// Build a policy keeping `keep_count` rows. Zero is rejected.
    pub fn new(keep_count: usize) -> Result<Self, CoreError> {
        if keep_count == 0 {
            return Err(CoreError::Validation(
                "Retention keep count must be at least 1".to_string(),
            ));
        }
        Ok(Self { keep_count })
    }

    pub fn keep_count(&self) -> usize {
        self.keep_count
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            keep_count: DEFAULT_KEEP_COUNT,
        }
    }
}

/// The oldest row that survives a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionCutoff {
    pub recency: Timestamp,
    pub id: DbId,
}

/// What a single pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionOutcome {
    /// Row count observed at the start of the pass.
    pub observed: u64,
    pub deleted: u64,
}

/// Storage operations a retention pass needs.
#[async_trait]
pub trait RetentionStore: Send + Sync {
    type Error: std::fmt::Display + Send;

    async fn count(&self) -> Result<u64, Self::Error>;

    /// The `keep_count`-th most recent row by `(recency desc, id desc)`, or
    /// `None` if the table holds fewer rows.
    async fn cutoff(&self, keep_count: usize) -> Result<Option<RetentionCutoff>, Self::Error>;

    /// Delete every row ranked strictly below `cutoff`: older recency, or equal
    /// recency with a smaller id. Returns the number of rows removed.
    async fn delete_older_than(&self, cutoff: RetentionCutoff) -> Result<u64, Self::Error>;
}

/// Run one retention pass.
///
/// A table already at or under the limit is left untouched.
pub async fn enforce_retention<S>(
    store: &S,
    policy: RetentionPolicy,
) -> Result<RetentionOutcome, S::Error>
where
    S: RetentionStore + ?Sized,
{
    let observed = store.count().await?;
    if observed <= policy.keep_count as u64 {
        return Ok(RetentionOutcome {
            observed,
            deleted: 0,
        });
    }

    // Rows may have been removed by a concurrent pass in between.
    let Some(cutoff) = store.cutoff(policy.keep_count).await? else {
        return Ok(RetentionOutcome {
            observed,
            deleted: 0,
        });
    };

    let deleted = store.delete_older_than(cutoff).await?;
    Ok(RetentionOutcome { observed, deleted })
}
