//! Shared API types for paginated list endpoints.
//!
//! The backend returns Spring-style page envelopes with zero-based page
//! indices. Requesting a page at or past `total_pages` yields an empty
//! `content`, never an error.

use serde::{Deserialize, Serialize};

/// One page of a larger server-side list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page; never longer than `size`.
    pub content: Vec<T>,
    /// Total number of items across all pages.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Zero-based page index.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Pages an in-memory collection the way the backend pages persisted
    /// ones: zero-based index, past-the-end pages come back empty.
    pub fn slice(items: Vec<T>, page: u32, size: u32) -> Self {
        let size = size.max(1);
        let total_elements = items.len() as u64;
        let total_pages = total_elements.div_ceil(size as u64) as u32;
        let content: Vec<T> = items
            .into_iter()
            .skip(page as usize * size as usize)
            .take(size as usize)
            .collect();

        Self {
            content,
            total_elements,
            total_pages,
            page,
            size,
        }
    }
}

/// Query pairs for a paginated request.
pub fn page_query(page: u32, size: u32) -> Vec<(String, String)> {
    vec![
        ("page".to_string(), page.to_string()),
        ("size".to_string(), size.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_middle_page() {
        let page = Page::slice((1..=10).collect(), 1, 3);
        assert_eq!(page.content, vec![4, 5, 6]);
        assert_eq!(page.total_elements, 10);
        assert_eq!(page.total_pages, 4);
        assert!(page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn test_slice_last_page_is_short() {
        let page = Page::slice((1..=10).collect(), 3, 3);
        assert_eq!(page.content, vec![10]);
        assert!(page.content.len() <= page.size as usize);
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_at_total_pages_is_empty_not_an_error() {
        let page = Page::slice((1..=10).collect(), 4, 3);
        assert_eq!(page.total_pages, 4);
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 10);
    }

    #[test]
    fn test_empty_collection() {
        let page: Page<i32> = Page::slice(vec![], 0, 20);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_envelope_field_names_are_camel_case() {
        let page: Page<i32> = serde_json::from_str(
            r#"{"content":[1,2],"totalElements":2,"totalPages":1,"page":0,"size":20}"#,
        )
        .unwrap();
        assert_eq!(page.content, vec![1, 2]);
        assert_eq!(page.total_elements, 2);
    }

    #[test]
    fn test_page_query_pairs() {
        assert_eq!(
            page_query(0, 20),
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "20".to_string()),
            ]
        );
    }
}
