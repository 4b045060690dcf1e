//! Diesel-backed storage of every row kind.
//!
//! Reads and writes are synchronous, like the rest of the Diesel stack. The
//! listing engine reaches the same queries through [`ListSource`], which
//! moves them onto tokio's blocking pool.

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;

use crate::db::{DbConnection, DbPool};
use crate::domain::row::{Field, NewRow, Row, RowKind};
use crate::domain::types::RowId;
use crate::listing::errors::FetchError;
use crate::listing::result::ListResult;
use crate::listing::store::{ListSource, StoreQuery};
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Orders a boxed query by `$column`, breaking ties on `$id` in the same
/// direction so that pages never overlap.
macro_rules! sorted {
    ($query:expr, $column:expr, $id:expr, $direction:expr) => {
        match $direction {
            $crate::listing::descriptor::SortDirection::Ascending => {
                $query.order_by($column.asc()).then_order_by($id.asc())
            }
            $crate::listing::descriptor::SortDirection::Descending => {
                $query.order_by($column.desc()).then_order_by($id.desc())
            }
        }
    };
}

/// Case-insensitive "contains" on `$column`; `$pattern` comes from
/// [`contains_pattern`] and is already lower-cased.
macro_rules! contains {
    ($column:expr, $pattern:expr) => {
        $crate::db::unicode_lower($column)
            .like($pattern)
            .escape('\\')
    };
}

mod article;
mod blog_post;
pub mod errors;
mod event;
mod lead;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
mod pdf_download;

/// Read side of the row store.
pub trait RowReader {
    fn get_row(&self, kind: RowKind, id: RowId) -> RepositoryResult<Option<Row>>;
    /// One page of rows matching `query` and the overall match count.
    fn list_rows(&self, query: &StoreQuery) -> RepositoryResult<ListResult<Row>>;
    /// Most recently created featured row of `kind`, if the kind has a
    /// featured flag at all.
    fn latest_featured(&self, kind: RowKind) -> RepositoryResult<Option<Row>>;
}

/// Write side of the row store.
pub trait RowWriter {
    fn create_row(&self, row: &NewRow) -> RepositoryResult<Row>;
    /// Replaces every editable column of row `id` of `row.kind()`.
    fn update_row(&self, id: RowId, row: &NewRow) -> RepositoryResult<Row>;
    fn delete_row(&self, kind: RowKind, id: RowId) -> RepositoryResult<()>;
}

#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

impl RowReader for DieselRepository {
    fn get_row(&self, kind: RowKind, id: RowId) -> RepositoryResult<Option<Row>> {
        let mut conn = self.conn()?;
        let conn: &mut SqliteConnection = &mut conn;
        match kind {
            RowKind::BlogPost => blog_post::get(conn, id),
            RowKind::Article => article::get(conn, id),
            RowKind::Event => event::get(conn, id),
            RowKind::Lead => lead::get(conn, id),
            RowKind::PdfDownload => pdf_download::get(conn, id),
        }
    }

    fn list_rows(&self, query: &StoreQuery) -> RepositoryResult<ListResult<Row>> {
        let mut conn = self.conn()?;
        let conn: &mut SqliteConnection = &mut conn;
        match query.kind {
            RowKind::BlogPost => blog_post::list(conn, query),
            RowKind::Article => article::list(conn, query),
            RowKind::Event => event::list(conn, query),
            RowKind::Lead => lead::list(conn, query),
            RowKind::PdfDownload => pdf_download::list(conn, query),
        }
    }

    fn latest_featured(&self, kind: RowKind) -> RepositoryResult<Option<Row>> {
        match kind {
            RowKind::BlogPost => {
                let mut conn = self.conn()?;
                blog_post::latest_featured(&mut conn)
            }
            _ => Ok(None),
        }
    }
}

impl RowWriter for DieselRepository {
    fn create_row(&self, row: &NewRow) -> RepositoryResult<Row> {
        let mut conn = self.conn()?;
        let conn: &mut SqliteConnection = &mut conn;
        match row {
            NewRow::BlogPost(post) => blog_post::create(conn, post),
            NewRow::Article(article) => article::create(conn, article),
            NewRow::Event(event) => event::create(conn, event),
            NewRow::Lead(lead) => lead::create(conn, lead),
            NewRow::PdfDownload(download) => pdf_download::create(conn, download),
        }
    }

    fn update_row(&self, id: RowId, row: &NewRow) -> RepositoryResult<Row> {
        let mut conn = self.conn()?;
        let conn: &mut SqliteConnection = &mut conn;
        match row {
            NewRow::BlogPost(post) => blog_post::update(conn, id, post),
            NewRow::Article(article) => article::update(conn, id, article),
            NewRow::Event(event) => event::update(conn, id, event),
            NewRow::Lead(lead) => lead::update(conn, id, lead),
            NewRow::PdfDownload(download) => pdf_download::update(conn, id, download),
        }
    }

    fn delete_row(&self, kind: RowKind, id: RowId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let conn: &mut SqliteConnection = &mut conn;
        let affected = match kind {
            RowKind::BlogPost => blog_post::delete(conn, id)?,
            RowKind::Article => article::delete(conn, id)?,
            RowKind::Event => event::delete(conn, id)?,
            RowKind::Lead => lead::delete(conn, id)?,
            RowKind::PdfDownload => pdf_download::delete(conn, id)?,
        };
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ListSource for DieselRepository {
    async fn fetch_page(&self, query: StoreQuery) -> Result<ListResult<Row>, FetchError> {
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.list_rows(&query))
            .await
            .map_err(|err| FetchError::Task(err.to_string()))?
            .map_err(|err| {
                log::error!("Failed to list rows: {err}");
                FetchError::from(err)
            })
    }

    async fn fetch_featured(&self, kind: RowKind) -> Result<Option<Row>, FetchError> {
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.latest_featured(kind))
            .await
            .map_err(|err| FetchError::Task(err.to_string()))?
            .map_err(|err| {
                log::error!("Failed to load featured row: {err}");
                FetchError::from(err)
            })
    }
}

/// Lower-cased `LIKE` pattern matching `value` anywhere, with wildcards in
/// `value` escaped by `\`.
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn unsupported(action: &str, kind: RowKind, field: Field) -> RepositoryError {
    RepositoryError::ValidationError(format!("cannot {action} {kind} by {field}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(contains_pattern("health"), "%health%");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
        assert_eq!(contains_pattern("ЗДОРОВЬЕ"), "%здоровье%");
    }

    #[test]
    fn oversized_ranges_saturate() {
        assert_eq!(to_i64(10), 10);
        assert_eq!(to_i64(usize::MAX), i64::MAX);
    }
}
