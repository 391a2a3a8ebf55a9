//! Pagination query parameters.

use serde::Deserialize;

use crate::models::PageRequest;

/// Largest page size a client may ask for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// `?curr=&limit=` as sent by the reader front-end.
///
/// Both are optional. Out-of-range values are normalized rather than rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based)
    pub curr: Option<i64>,
    /// Items per page
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Normalizes to a [`PageRequest`].
    ///
    /// `curr < 1` becomes 1. A missing `limit`, or one outside
    /// `1..=MAX_PAGE_SIZE`, falls back to `default_limit`.
    pub fn resolve(self, default_limit: u32) -> PageRequest {
        let page = match self.curr {
            Some(curr) if curr >= 1 => u32::try_from(curr).unwrap_or(u32::MAX),
            _ => 1,
        };
        let page_size = match self.limit {
            Some(limit) if (1..=i64::from(MAX_PAGE_SIZE)).contains(&limit) => limit as u32,
            _ => default_limit,
        };
        PageRequest::new(page, page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let request = PaginationParams::default().resolve(10);
        assert_eq!(request, PageRequest::new(1, 10));
        assert_eq!(PaginationParams::default().resolve(5).page_size, 5);
    }

    #[test]
    fn test_explicit_values_kept() {
        let params = PaginationParams {
            curr: Some(3),
            limit: Some(20),
        };
        assert_eq!(params.resolve(10), PageRequest::new(3, 20));
    }

    #[test]
    fn test_out_of_range_limit_falls_back() {
        for limit in [0, -4, 101, 10_000] {
            let params = PaginationParams {
                curr: Some(2),
                limit: Some(limit),
            };
            assert_eq!(params.resolve(5).page_size, 5, "limit={limit}");
        }
    }

    #[test]
    fn test_deserializes_from_query() {
        let params: PaginationParams = from_query("curr=2&limit=7");
        assert_eq!(params.resolve(10), PageRequest::new(2, 7));
    }

    fn from_query(query: &str) -> PaginationParams {
        let uri: axum::http::Uri = format!("/x?{query}").parse().unwrap();
        axum::extract::Query::<PaginationParams>::try_from_uri(&uri)
            .unwrap()
            .0
    }

    proptest! {
        #[test]
        fn resolved_page_is_always_valid(curr in proptest::option::of(any::<i64>()),
                                         limit in proptest::option::of(any::<i64>()),
                                         default_limit in 1u32..=MAX_PAGE_SIZE) {
            let request = PaginationParams { curr, limit }.resolve(default_limit);
            prop_assert!(request.page >= 1);
            prop_assert!(request.page_size >= 1);
            prop_assert!(request.page_size <= MAX_PAGE_SIZE);
            prop_assert!(request.offset() >= 0);
        }

        #[test]
        fn valid_inputs_pass_through(curr in 1i64..10_000, limit in 1i64..=100) {
            let request = PaginationParams { curr: Some(curr), limit: Some(limit) }.resolve(10);
            prop_assert_eq!(i64::from(request.page), curr);
            prop_assert_eq!(i64::from(request.page_size), limit);
        }
    }
}
