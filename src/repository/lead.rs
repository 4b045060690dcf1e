use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::lead::{Lead, NewLead};
use crate::domain::row::{Field, Row, RowKind};
use crate::domain::types::RowId;
use crate::listing::result::ListResult;
use crate::listing::store::StoreQuery;
use crate::models::lead::{Lead as DbLead, NewLead as DbNewLead};
use crate::repository::errors::RepositoryResult;
use crate::repository::{contains_pattern, to_i64, unsupported};
use crate::schema::leads;

fn into_row(lead: DbLead) -> RepositoryResult<Row> {
    Ok(Row::Lead(Lead::try_from(lead)?))
}

fn filtered(query: &StoreQuery) -> RepositoryResult<leads::BoxedQuery<'static, Sqlite>> {
    let mut boxed = leads::table.into_boxed();
    for filter in &query.filters {
        let pattern = contains_pattern(&filter.contains);
        boxed = match filter.field {
            Field::Name => boxed.filter(contains!(leads::name.nullable(), pattern)),
            Field::Email => boxed.filter(contains!(leads::email.nullable(), pattern)),
            Field::Phone => boxed.filter(contains!(leads::phone, pattern)),
            Field::Subject => boxed.filter(contains!(leads::subject.nullable(), pattern)),
            other => return Err(unsupported("filter", RowKind::Lead, other)),
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
    let id = leads::id;
    let direction = query.sort.direction;
    let items = match query.sort.field {
        Field::Name => sorted!(items, leads::name, id, direction),
        Field::Email => sorted!(items, leads::email, id, direction),
        Field::Phone => sorted!(items, leads::phone, id, direction),
        Field::Subject => sorted!(items, leads::subject, id, direction),
        Field::CreatedAt => sorted!(items, leads::created_at, id, direction),
        other => return Err(unsupported("sort", RowKind::Lead, other)),
    };

    let items = items
        .offset(to_i64(query.offset))
        .limit(to_i64(query.limit))
        .select(DbLead::as_select())
        .load::<DbLead>(conn)?
        .into_iter()
        .map(into_row)
        .collect::<RepositoryResult<Vec<Row>>>()?;

    Ok(ListResult::new(items, total as usize))
}

pub(super) fn get(conn: &mut SqliteConnection, id: RowId) -> RepositoryResult<Option<Row>> {
    leads::table
        .find(id.get())
        .select(DbLead::as_select())
        .first::<DbLead>(conn)
        .optional()?
        .map(into_row)
        .transpose()
}

pub(super) fn create(conn: &mut SqliteConnection, lead: &NewLead) -> RepositoryResult<Row> {
    let created = diesel::insert_into(leads::table)
        .values(&DbNewLead::from(lead))
        .returning(DbLead::as_returning())
        .get_result::<DbLead>(conn)?;
    into_row(created)
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    id: RowId,
    lead: &NewLead,
) -> RepositoryResult<Row> {
    let updated = diesel::update(leads::table.find(id.get()))
        .set(&DbNewLead::from(lead))
        .returning(DbLead::as_returning())
        .get_result::<DbLead>(conn)?;
    into_row(updated)
}

pub(super) fn delete(conn: &mut SqliteConnection, id: RowId) -> RepositoryResult<usize> {
    Ok(diesel::delete(leads::table.find(id.get())).execute(conn)?)
}
