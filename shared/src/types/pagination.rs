//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 20;

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Create a new pagination, clamping out-of-range values to the minimum
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.limit
    }

    /// Calculate offset as i64 for SQL queries
    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    /// Calculate limit as i64 for SQL queries
    pub fn limit_i64(&self) -> i64 {
        self.limit as i64
    }
}

/// Paged result envelope for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub limit: u32,

    /// Total number of matching items
    pub total: u64,

    /// Whether more items exist beyond this page
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a page, deriving `has_more` from the page position and total
    pub fn new(items: Vec<T>, pagination: Pagination, total: u64) -> Self {
        let consumed = pagination.offset() as u64 + items.len() as u64;
        Self {
            items,
            page: pagination.page,
            limit: pagination.limit,
            total,
            has_more: consumed < total,
        }
    }

    /// Create an empty page
    pub fn empty(pagination: Pagination) -> Self {
        Self {
            items: Vec::new(),
            page: pagination.page,
            limit: pagination.limit,
            total: 0,
            has_more: false,
        }
    }

    /// Transform the items using a function
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            has_more: self.has_more,
        }
    }

    /// Number of items on this page
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::default();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_pagination_clamps_to_minimum() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 1);
    }

    #[test]
    fn test_offset_calculation() {
        let p = Pagination::new(3, 20);
        assert_eq!(p.offset(), 40);
        assert_eq!(p.offset_i64(), 40);
    }

    #[test]
    fn test_has_more_when_items_remain() {
        // 25 total, 20 per page: page 1 leaves 5 behind
        let items: Vec<u32> = (0..20).collect();
        let page = Page::new(items, Pagination::new(1, 20), 25);
        assert!(page.has_more);
    }

    #[test]
    fn test_has_more_false_on_last_page() {
        let items: Vec<u32> = (0..5).collect();
        let page = Page::new(items, Pagination::new(2, 20), 25);
        assert!(!page.has_more);
    }

    #[test]
    fn test_has_more_false_when_exact_fit() {
        let items: Vec<u32> = (0..20).collect();
        let page = Page::new(items, Pagination::new(1, 20), 20);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::new(vec![1u32], Pagination::default(), 1);
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("hasMore").is_some());
        assert!(json.get("has_more").is_none());
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1u32, 2, 3], Pagination::default(), 3).map(|n| n * 2);
        assert_eq!(page.items, vec![2, 4, 6]);
        assert_eq!(page.total, 3);
    }
}
