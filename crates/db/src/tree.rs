//! [`ChildLoader`] implementations backed by repositories.

use async_trait::async_trait;
use blog_core::tree::ChildLoader;
use blog_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::Category;
use crate::repositories::CategoryRepo;

/// Loads category children one level at a time, for the detail view.
pub struct CategoryChildLoader<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryChildLoader<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChildLoader for CategoryChildLoader<'_> {
    type Node = Category;
    type Error = sqlx::Error;

    async fn children_of(&self, parent_id: DbId) -> Result<Vec<Category>, sqlx::Error> {
        CategoryRepo::find_children(self.pool, parent_id).await
    }
}
