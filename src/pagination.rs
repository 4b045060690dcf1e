//! Page-link window shown under a listing.

use serde::Serialize;

use crate::listing::descriptor::QueryDescriptor;
use crate::listing::result::ListResult;

/// Page numbers to render, with `None` standing for an ellipsis gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// A page of items ready for rendering.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_count: usize, page_size: usize) -> Self {
        let current_page = current_page.max(1);
        let total_pages = crate::listing::result::total_pages(total_count, page_size);
        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
            total_count,
        }
    }

    pub fn from_result(result: ListResult<T>, descriptor: &QueryDescriptor) -> Self {
        Self::new(
            result.items,
            descriptor.page(),
            result.total_count,
            descriptor.page_size(),
        )
    }
}
