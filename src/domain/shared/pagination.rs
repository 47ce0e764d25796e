use crate::domain::report::category::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// Largest page a caller may ask the backend for.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct PaginationRequest {
    #[validate(range(min = 1))]
    pub page: u32,
    /// Upper bound mirrors [`MAX_PAGE_SIZE`]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata recorded from the backend envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_records: u32,
}

impl PageMeta {
    /// Fill gaps in the envelope from the request and the items actually returned.
    pub fn resolve(
        requested_page: u32,
        limit: u32,
        item_count: usize,
        page_number: Option<u32>,
        total_pages: Option<u32>,
        total_records: Option<u32>,
    ) -> Self {
        let total_records = total_records.unwrap_or(item_count as u32);
        let total_pages = total_pages.unwrap_or_else(|| {
            if limit == 0 {
                0
            } else {
                total_records.div_ceil(limit)
            }
        });
        Self {
            current_page: page_number.filter(|p| *p > 0).unwrap_or(requested_page),
            total_pages,
            total_records,
        }
    }
}
