use serde::Serialize;
use thiserror::Error;

use crate::domain::row::{Field, RowKind};

/// Rejected user intent; the descriptor is left untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("{field} is not a filterable field of {kind}")]
    NotFilterable { kind: RowKind, field: Field },

    #[error("{field} is not a sortable field of {kind}")]
    NotSortable { kind: RowKind, field: Field },

    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("the listing session has shut down")]
    SessionClosed,
}

/// Failure reported by the data store for a single request.
///
/// Always retryable: the caller keeps the last good result and re-triggers
/// the fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FetchError {
    #[error("data store error: {0}")]
    Store(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("fetch task failed: {0}")]
    Task(String),
}
