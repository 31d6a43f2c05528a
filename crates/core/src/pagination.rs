//! Page slicing and page metadata.

use serde::{Deserialize, Serialize};

/// Page metadata returned alongside a page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Echo of the requested page; not clamped to `total_pages`.
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u32,
}

/// Number of pages needed for `total_items` at `limit` per page.
///
/// Zero items means zero pages.
pub fn total_pages(total_items: u64, limit: u32) -> u64 {
    total_items.div_ceil(u64::from(limit.max(1)))
}

/// Slice one page out of `items`.
///
/// A page past the end yields an empty page, never an error.
pub fn paginate<T>(items: Vec<T>, page: u64, limit: u32) -> (Vec<T>, Pagination) {
    let total_items = items.len() as u64;
    let start = page.saturating_sub(1).saturating_mul(u64::from(limit));
    let start = usize::try_from(start).unwrap_or(usize::MAX);

    let data: Vec<T> = items.into_iter().skip(start).take(limit as usize).collect();

    let pagination = Pagination {
        current_page: page,
        total_pages: total_pages(total_items, limit),
        total_items,
        items_per_page: limit,
    };

    (data, pagination)
}
