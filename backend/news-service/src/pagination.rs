/// Page-number pagination shared by all list endpoints.
///
/// Pages are 1-based, 3 items per page by default, and `page_size` is
/// clamped to at most 100 per request.
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: i64 = 3;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for paginated list endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PageParams {
    /// 1-based page number
    pub page: Option<i64>,
    /// Items per page (default 3, max 100)
    pub page_size: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.page_size()
    }
}

/// One page of results plus navigation metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64, params: &PageParams) -> Self {
        let page_size = params.page_size();
        let total_pages = (total_count + page_size - 1) / page_size;
        Self {
            items,
            total_count,
            page: params.page(),
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, page_size: Option<i64>) -> PageParams {
        PageParams { page, page_size }
    }

    #[test]
    fn defaults_to_first_page_of_three() {
        let p = params(None, None);
        assert_eq!(p.page(), 1);
        assert_eq!(p.page_size(), 3);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn page_size_is_capped_at_100() {
        let p = params(Some(1), Some(500));
        assert_eq!(p.page_size(), 100);
    }

    #[test]
    fn page_size_has_a_floor_of_one() {
        let p = params(Some(1), Some(0));
        assert_eq!(p.page_size(), 1);
        assert_eq!(params(Some(-3), None).page(), 1);
    }

    #[test]
    fn twelve_items_at_size_five_make_three_pages() {
        let p = params(Some(3), Some(5));
        assert_eq!(p.offset(), 10);
        let page = Page::new(vec![1, 2], 12, &p);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 12);
        assert_eq!(page.page, 3);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<i32> = Page::new(vec![], 0, &params(None, None));
        assert_eq!(page.total_pages, 0);
    }
}
