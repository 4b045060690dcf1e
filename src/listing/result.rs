use serde::Serialize;

use crate::domain::row::Row;
use crate::listing::descriptor::QueryDescriptor;

/// `ceil(total_count / page_size)`; zero when there is nothing to show.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// One page of rows plus the number of rows matching the query overall.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ListResult<T = Row> {
    pub items: Vec<T>,
    pub total_count: usize,
}

impl<T> ListResult<T> {
    pub fn new(items: Vec<T>, total_count: usize) -> Self {
        Self { items, total_count }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_pages(&self, page_size: usize) -> usize {
        total_pages(self.total_count, page_size)
    }
}

/// Why a listing has nothing to show.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The store holds no records of this kind.
    NoRecords,
    /// Records exist but none match the active filters.
    NoMatches,
}

impl EmptyState {
    pub fn classify<T>(result: &ListResult<T>, descriptor: &QueryDescriptor) -> Option<Self> {
        if !result.is_empty() {
            return None;
        }
        if descriptor.has_filters() {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::NoRecords)
        }
    }
}
