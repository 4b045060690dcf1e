use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::event::{Event, NewEvent};
use crate::domain::row::{Field, Row, RowKind};
use crate::domain::types::RowId;
use crate::listing::result::ListResult;
use crate::listing::store::StoreQuery;
use crate::models::event::{Event as DbEvent, NewEvent as DbNewEvent, UpdateEvent as DbUpdateEvent};
use crate::repository::errors::RepositoryResult;
use crate::repository::{contains_pattern, to_i64, unsupported};
use crate::schema::events;

fn into_row(event: DbEvent) -> RepositoryResult<Row> {
    Ok(Row::Event(Event::try_from(event)?))
}

fn filtered(query: &StoreQuery) -> RepositoryResult<events::BoxedQuery<'static, Sqlite>> {
    let mut boxed = events::table.into_boxed();
    for filter in &query.filters {
        let pattern = contains_pattern(&filter.contains);
        boxed = match filter.field {
            Field::Title => boxed.filter(contains!(events::title.nullable(), pattern)),
            Field::Location => boxed.filter(contains!(events::location.nullable(), pattern)),
            other => return Err(unsupported("filter", RowKind::Event, other)),
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
    let id = events::id;
    let direction = query.sort.direction;
    let items = match query.sort.field {
        Field::Title => sorted!(items, events::title, id, direction),
        Field::Location => sorted!(items, events::location, id, direction),
        Field::StartsAt => sorted!(items, events::starts_at, id, direction),
        Field::CreatedAt => sorted!(items, events::created_at, id, direction),
        other => return Err(unsupported("sort", RowKind::Event, other)),
    };

    let items = items
        .offset(to_i64(query.offset))
        .limit(to_i64(query.limit))
        .select(DbEvent::as_select())
        .load::<DbEvent>(conn)?
        .into_iter()
        .map(into_row)
        .collect::<RepositoryResult<Vec<Row>>>()?;

    Ok(ListResult::new(items, total as usize))
}

pub(super) fn get(conn: &mut SqliteConnection, id: RowId) -> RepositoryResult<Option<Row>> {
    events::table
        .find(id.get())
        .select(DbEvent::as_select())
        .first::<DbEvent>(conn)
        .optional()?
        .map(into_row)
        .transpose()
}

pub(super) fn create(conn: &mut SqliteConnection, event: &NewEvent) -> RepositoryResult<Row> {
    let created = diesel::insert_into(events::table)
        .values(&DbNewEvent::from(event))
        .returning(DbEvent::as_returning())
        .get_result::<DbEvent>(conn)?;
    into_row(created)
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    id: RowId,
    event: &NewEvent,
) -> RepositoryResult<Row> {
    let changes = DbUpdateEvent::new(event, Utc::now().naive_utc());
    let updated = diesel::update(events::table.find(id.get()))
        .set(&changes)
        .returning(DbEvent::as_returning())
        .get_result::<DbEvent>(conn)?;
    into_row(updated)
}

pub(super) fn delete(conn: &mut SqliteConnection, id: RowId) -> RepositoryResult<usize> {
    Ok(diesel::delete(events::table.find(id.get())).execute(conn)?)
}
