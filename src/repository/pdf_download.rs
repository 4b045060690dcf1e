use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::pdf_download::{NewPdfDownload, PdfDownload};
use crate::domain::row::{Field, Row, RowKind};
use crate::domain::types::RowId;
use crate::listing::result::ListResult;
use crate::listing::store::StoreQuery;
use crate::models::pdf_download::{
    NewPdfDownload as DbNewPdfDownload, PdfDownload as DbPdfDownload,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{contains_pattern, to_i64, unsupported};
use crate::schema::pdf_downloads;

fn into_row(download: DbPdfDownload) -> RepositoryResult<Row> {
    Ok(Row::PdfDownload(PdfDownload::try_from(download)?))
}

fn filtered(query: &StoreQuery) -> RepositoryResult<pdf_downloads::BoxedQuery<'static, Sqlite>> {
    let mut boxed = pdf_downloads::table.into_boxed();
    for filter in &query.filters {
        let pattern = contains_pattern(&filter.contains);
        boxed = match filter.field {
            Field::Name => boxed.filter(contains!(pdf_downloads::name.nullable(), pattern)),
            Field::Email => boxed.filter(contains!(pdf_downloads::email.nullable(), pattern)),
            Field::Phone => boxed.filter(contains!(pdf_downloads::phone, pattern)),
            Field::Company => boxed.filter(contains!(pdf_downloads::company, pattern)),
            Field::DownloadedAsset => {
                boxed.filter(contains!(pdf_downloads::downloaded_asset.nullable(), pattern))
            }
            other => return Err(unsupported("filter", RowKind::PdfDownload, other)),
        };
    }
    Ok(boxed)
}

pub(super) fn list(
    conn: &mut SqliteConnection,
    query: &StoreQuery,
) -> RepositoryResult<ListResult<Row>> {
    let total: i64 = filtered(query)?.count().get_result(conn)?;

    let items = filtered(query)?;
    let id = pdf_downloads::id;
    let direction = query.sort.direction;
    let items = match query.sort.field {
        Field::Name => sorted!(items, pdf_downloads::name, id, direction),
        Field::Email => sorted!(items, pdf_downloads::email, id, direction),
        Field::Phone => sorted!(items, pdf_downloads::phone, id, direction),
        Field::Company => sorted!(items, pdf_downloads::company, id, direction),
        Field::DownloadedAsset => sorted!(items, pdf_downloads::downloaded_asset, id, direction),
        Field::CreatedAt => sorted!(items, pdf_downloads::created_at, id, direction),
        other => return Err(unsupported("sort", RowKind::PdfDownload, other)),
    };

    let items = items
        .offset(to_i64(query.offset))
        .limit(to_i64(query.limit))
        .select(DbPdfDownload::as_select())
        .load::<DbPdfDownload>(conn)?
        .into_iter()
        .map(into_row)
        .collect::<RepositoryResult<Vec<Row>>>()?;

    Ok(ListResult::new(items, total as usize))
}

pub(super) fn get(conn: &mut SqliteConnection, id: RowId) -> RepositoryResult<Option<Row>> {
    pdf_downloads::table
        .find(id.get())
        .select(DbPdfDownload::as_select())
        .first::<DbPdfDownload>(conn)
        .optional()?
        .map(into_row)
        .transpose()
}

pub(super) fn create(
    conn: &mut SqliteConnection,
    download: &NewPdfDownload,
) -> RepositoryResult<Row> {
    let created = diesel::insert_into(pdf_downloads::table)
        .values(&DbNewPdfDownload::from(download))
        .returning(DbPdfDownload::as_returning())
        .get_result::<DbPdfDownload>(conn)?;
    into_row(created)
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    id: RowId,
    download: &NewPdfDownload,
) -> RepositoryResult<Row> {
    let updated = diesel::update(pdf_downloads::table.find(id.get()))
        .set(&DbNewPdfDownload::from(download))
        .returning(DbPdfDownload::as_returning())
        .get_result::<DbPdfDownload>(conn)?;
    into_row(updated)
}

pub(super) fn delete(conn: &mut SqliteConnection, id: RowId) -> RepositoryResult<usize> {
    Ok(diesel::delete(pdf_downloads::table.find(id.get())).execute(conn)?)
}
