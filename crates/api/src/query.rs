//! Shared query parameter types for API handlers.

use blog_core::pagination::Page;
use serde::Deserialize;

use crate::error::AppResult;

/// `?page=&page_size=` (also accepted as `pagesize`).
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    #[serde(alias = "pagesize")]
    pub page_size: Option<i64>,
}

impl PageParams {
    pub fn to_page(&self) -> AppResult<Page> {
        Ok(Page::new(self.page, self.page_size)?)
    }
}
