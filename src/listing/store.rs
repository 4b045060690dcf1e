//! Contract between the listing engine and the tabular data store.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::row::{Field, Row, RowKind};
use crate::listing::descriptor::{QueryDescriptor, SortSpec};
use crate::listing::errors::FetchError;
use crate::listing::result::ListResult;

/// Case-insensitive "contains" predicate on one column.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: Field,
    pub contains: String,
}

/// Query in the store's native shape: ANDed filters, one ORDER BY column and
/// a row range.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct StoreQuery {
    pub kind: RowKind,
    pub filters: Vec<FieldFilter>,
    pub sort: SortSpec,
    pub offset: usize,
    pub limit: usize,
}

impl StoreQuery {
    pub fn from_descriptor(kind: RowKind, descriptor: &QueryDescriptor) -> Self {
        Self {
            kind,
            filters: descriptor
                .active_filters()
                .map(|(field, value)| FieldFilter {
                    field,
                    contains: value.to_string(),
                })
                .collect(),
            sort: descriptor.sort(),
            offset: descriptor.offset(),
            limit: descriptor.page_size(),
        }
    }
}

/// Asynchronous read side of the data store.
#[async_trait]
pub trait ListSource: Send + Sync {
    /// One page of rows matching `query` plus the total match count.
    async fn fetch_page(&self, query: StoreQuery) -> Result<ListResult<Row>, FetchError>;

    /// Most recently created row of `kind` flagged as featured.
    async fn fetch_featured(&self, kind: RowKind) -> Result<Option<Row>, FetchError>;
}
