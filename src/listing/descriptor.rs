//! Canonical "what the user wants to see" for one listing.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::row::Field;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

/// The single active sort column.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: Field,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn ascending(field: Field) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub const fn descending(field: Field) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// Filter, sort and page state driving one list query.
///
/// Only [`crate::listing::ListQueryController`] mutates a descriptor, which is
/// how `page >= 1` and "a filter edit resets the page" are kept.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct QueryDescriptor {
    filters: BTreeMap<Field, String>,
    sort: SortSpec,
    page: usize,
    page_size: usize,
}

impl QueryDescriptor {
    pub(crate) fn new(sort: SortSpec, page_size: usize) -> Self {
        Self {
            filters: BTreeMap::new(),
            sort,
            page: 1,
            page_size,
        }
    }

    /// Raw filter value as typed, if any.
    pub fn filter(&self, field: Field) -> Option<&str> {
        self.filters.get(&field).map(String::as_str)
    }

    /// Filters that actually constrain the result, trimmed.
    pub fn active_filters(&self) -> impl Iterator<Item = (Field, &str)> {
        self.filters
            .iter()
            .map(|(field, value)| (*field, value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }

    pub fn has_filters(&self) -> bool {
        self.active_filters().next().is_some()
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Row offset of the first item on the current page.
    ///
    /// Saturates for page numbers far past the end; the store then returns an
    /// empty page together with the real total, which the controller clamps.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub(crate) fn set_filter(&mut self, field: Field, value: String) {
        if value.is_empty() {
            self.filters.remove(&field);
        } else {
            self.filters.insert(field, value);
        }
        self.page = 1;
    }

    pub(crate) fn retain_filters(&mut self, mut keep: impl FnMut(Field) -> bool) {
        self.filters.retain(|field, _| keep(*field));
    }

    pub(crate) fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    pub(crate) fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}
