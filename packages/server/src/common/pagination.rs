//! Offset pagination for list endpoints.

use serde::Serialize;

pub const DEFAULT_PER_PAGE: usize = 12;
pub const MAX_PER_PAGE: usize = 100;

/// Validated page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    /// Apply defaults and clamp `per_page` to `1..=100`.
    pub fn new(page: Option<usize>, per_page: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        }
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Slice an already filtered and sorted list.
    pub fn paginate(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len();
        let offset = request.offset();
        let items: Vec<T> = all.into_iter().skip(offset).take(request.per_page).collect();

        Self {
            has_more: offset + items.len() < total,
            items,
            total,
            page: request.page,
            per_page: request.per_page,
        }
    }
}
