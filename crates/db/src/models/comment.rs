//! Threaded comment model.

use blog_core::tree::TreeNode;
use blog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub article_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<DbId>,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub content: String,
    #[serde(with = "blog_core::datetime")]
    pub created_at: Timestamp,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Comment>,
}

impl TreeNode for Comment {
    type SortKey = (Timestamp, DbId);

    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }

    fn sort_key(&self) -> Self::SortKey {
        (self.created_at, self.id)
    }

    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }
}

/// Request body for posting a comment or a reply.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub article_id: DbId,
    pub parent_id: Option<DbId>,
    pub nickname: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub content: String,
}

/// Validated insert DTO.
#[derive(Debug)]
pub struct CreateComment {
    pub article_id: DbId,
    pub parent_id: Option<DbId>,
    pub nickname: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub content: String,
}
