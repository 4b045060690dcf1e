use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::article::{Article, NewArticle};
use crate::domain::row::{Field, Row, RowKind};
use crate::domain::types::RowId;
use crate::listing::result::ListResult;
use crate::listing::store::StoreQuery;
use crate::models::article::{
    Article as DbArticle, NewArticle as DbNewArticle, UpdateArticle as DbUpdateArticle,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{contains_pattern, to_i64, unsupported};
use crate::schema::articles;

fn into_row(article: DbArticle) -> RepositoryResult<Row> {
    Ok(Row::Article(Article::try_from(article)?))
}

fn filtered(query: &StoreQuery) -> RepositoryResult<articles::BoxedQuery<'static, Sqlite>> {
    let mut boxed = articles::table.into_boxed();
    for filter in &query.filters {
        let pattern = contains_pattern(&filter.contains);
        boxed = match filter.field {
            Field::Title => boxed.filter(contains!(articles::title.nullable(), pattern)),
            Field::Author => boxed.filter(contains!(articles::author.nullable(), pattern)),
            Field::Category => boxed.filter(contains!(articles::category.nullable(), pattern)),
            other => return Err(unsupported("filter", RowKind::Article, other)),
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
    let id = articles::id;
    let direction = query.sort.direction;
    let items = match query.sort.field {
        Field::Title => sorted!(items, articles::title, id, direction),
        Field::Author => sorted!(items, articles::author, id, direction),
        Field::Category => sorted!(items, articles::category, id, direction),
        Field::CreatedAt => sorted!(items, articles::created_at, id, direction),
        other => return Err(unsupported("sort", RowKind::Article, other)),
    };

    let items = items
        .offset(to_i64(query.offset))
        .limit(to_i64(query.limit))
        .select(DbArticle::as_select())
        .load::<DbArticle>(conn)?
        .into_iter()
        .map(into_row)
        .collect::<RepositoryResult<Vec<Row>>>()?;

    Ok(ListResult::new(items, total as usize))
}

pub(super) fn get(conn: &mut SqliteConnection, id: RowId) -> RepositoryResult<Option<Row>> {
    articles::table
        .find(id.get())
        .select(DbArticle::as_select())
        .first::<DbArticle>(conn)
        .optional()?
        .map(into_row)
        .transpose()
}

pub(super) fn create(conn: &mut SqliteConnection, article: &NewArticle) -> RepositoryResult<Row> {
    let created = diesel::insert_into(articles::table)
        .values(&DbNewArticle::from(article))
        .returning(DbArticle::as_returning())
        .get_result::<DbArticle>(conn)?;
    into_row(created)
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    id: RowId,
    article: &NewArticle,
) -> RepositoryResult<Row> {
    let changes = DbUpdateArticle::new(article, Utc::now().naive_utc());
    let updated = diesel::update(articles::table.find(id.get()))
        .set(&changes)
        .returning(DbArticle::as_returning())
        .get_result::<DbArticle>(conn)?;
    into_row(updated)
}

pub(super) fn delete(conn: &mut SqliteConnection, id: RowId) -> RepositoryResult<usize> {
    Ok(diesel::delete(articles::table.find(id.get())).execute(conn)?)
}
