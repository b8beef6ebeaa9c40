//! Page/offset arithmetic shared by every paginated list endpoint.

use crate::error::CoreError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Highest page number whose offset still fits in an `i64`.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// Default window for owner visit statistics, in days.
pub const DEFAULT_STATS_DAYS: i64 = 7;
pub const MAX_STATS_DAYS: i64 = 365;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub page_size: i64,
}

impl Page {
    /// Build a page from optional query values.
    ///
    /// Missing values fall back to page 1 and [`DEFAULT_PAGE_SIZE`]; values
    /// out of range are rejected rather than clamped.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if !(1..=MAX_PAGE).contains(&page) {
            return Err(CoreError::Validation(format!(
                "page must be between 1 and {MAX_PAGE}"
            )));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(CoreError::Validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        Ok(Self { page, page_size })
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Validate the owner statistics window.
pub fn validate_stats_days(days: Option<i64>) -> Result<i64, CoreError> {
    let days = days.unwrap_or(DEFAULT_STATS_DAYS);
    if !(1..=MAX_STATS_DAYS).contains(&days) {
        return Err(CoreError::Validation(format!(
            "days must be between 1 and {MAX_STATS_DAYS}"
        )));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults() {
        let page = Page::new(None, None).unwrap();
        assert_eq!(page, Page::default());
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn offset_follows_page() {
        let page = Page::new(Some(3), Some(20)).unwrap();
        assert_eq!(page.offset(), 40);
    }

    #[test]
    fn out_of_range_rejected() {
        assert_matches!(Page::new(Some(0), None), Err(CoreError::Validation(_)));
        assert_matches!(Page::new(None, Some(0)), Err(CoreError::Validation(_)));
        assert_matches!(Page::new(None, Some(101)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn huge_page_rejected_before_offset_overflows() {
        assert_matches!(
            Page::new(Some(i64::MAX), Some(MAX_PAGE_SIZE)),
            Err(CoreError::Validation(_))
        );
        let last = Page::new(Some(MAX_PAGE), Some(MAX_PAGE_SIZE)).unwrap();
        assert!(last.offset() > 0);
    }

    #[test]
    fn stats_days_window() {
        assert_eq!(validate_stats_days(None).unwrap(), DEFAULT_STATS_DAYS);
        assert_eq!(validate_stats_days(Some(365)).unwrap(), 365);
        assert!(validate_stats_days(Some(0)).is_err());
        assert!(validate_stats_days(Some(366)).is_err());
    }
}
