//! pagination metadata

use serde::{Deserialize, Serialize};

pub const FIRST_PAGE: u64 = 1;

/// Pagination summary returned next to a page of records. The all-zero value
/// means the listing matched nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub current_page: u64,
    pub page_size: u64,
    pub first_page: u64,
    pub last_page: u64,
    pub total_records: u64,
}

impl Metadata {
    /// `last_page` is derived from the total alone, so a page past the end
    /// still reports the real bounds.
    pub fn calculate(total_records: u64, page: u64, page_size: u64) -> Self {
        if total_records == 0 || page_size == 0 {
            return Self::default();
        }
        Self {
            current_page: page,
            page_size,
            first_page: FIRST_PAGE,
            last_page: total_records.div_ceil(page_size),
            total_records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }

    pub fn is_out_of_range(&self) -> bool {
        !self.is_empty() && self.current_page > self.last_page
    }
}
