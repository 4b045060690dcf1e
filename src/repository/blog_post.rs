use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::blog_post::{BlogPost, NewBlogPost};
use crate::domain::row::{Field, Row, RowKind};
use crate::domain::types::RowId;
use crate::listing::result::ListResult;
use crate::listing::store::StoreQuery;
use crate::models::blog_post::{
    BlogPost as DbBlogPost, NewBlogPost as DbNewBlogPost, UpdateBlogPost as DbUpdateBlogPost,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{contains_pattern, to_i64, unsupported};
use crate::schema::blog_posts;

fn into_row(post: DbBlogPost) -> RepositoryResult<Row> {
    Ok(Row::BlogPost(BlogPost::try_from(post)?))
}

fn filtered(query: &StoreQuery) -> RepositoryResult<blog_posts::BoxedQuery<'static, Sqlite>> {
    let mut boxed = blog_posts::table.into_boxed();
    for filter in &query.filters {
        let pattern = contains_pattern(&filter.contains);
        boxed = match filter.field {
            Field::Title => boxed.filter(contains!(blog_posts::title.nullable(), pattern)),
            Field::Author => boxed.filter(contains!(blog_posts::author.nullable(), pattern)),
            Field::Category => boxed.filter(contains!(blog_posts::category.nullable(), pattern)),
            other => return Err(unsupported("filter", RowKind::BlogPost, other)),
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
    let id = blog_posts::id;
    let direction = query.sort.direction;
    let items = match query.sort.field {
        Field::Title => sorted!(items, blog_posts::title, id, direction),
        Field::Author => sorted!(items, blog_posts::author, id, direction),
        Field::Category => sorted!(items, blog_posts::category, id, direction),
        Field::CreatedAt => sorted!(items, blog_posts::created_at, id, direction),
        other => return Err(unsupported("sort", RowKind::BlogPost, other)),
    };

    let items = items
        .offset(to_i64(query.offset))
        .limit(to_i64(query.limit))
        .select(DbBlogPost::as_select())
        .load::<DbBlogPost>(conn)?
        .into_iter()
        .map(into_row)
        .collect::<RepositoryResult<Vec<Row>>>()?;

    Ok(ListResult::new(items, total as usize))
}

pub(super) fn get(conn: &mut SqliteConnection, id: RowId) -> RepositoryResult<Option<Row>> {
    blog_posts::table
        .find(id.get())
        .select(DbBlogPost::as_select())
        .first::<DbBlogPost>(conn)
        .optional()?
        .map(into_row)
        .transpose()
}

pub(super) fn latest_featured(conn: &mut SqliteConnection) -> RepositoryResult<Option<Row>> {
    blog_posts::table
        .filter(blog_posts::featured.eq(true))
        .order_by(blog_posts::created_at.desc())
        .then_order_by(blog_posts::id.desc())
        .select(DbBlogPost::as_select())
        .first::<DbBlogPost>(conn)
        .optional()?
        .map(into_row)
        .transpose()
}

pub(super) fn create(conn: &mut SqliteConnection, post: &NewBlogPost) -> RepositoryResult<Row> {
    let insertable = DbNewBlogPost::from(post);
    let created = diesel::insert_into(blog_posts::table)
        .values(&insertable)
        .returning(DbBlogPost::as_returning())
        .get_result::<DbBlogPost>(conn)?;
    into_row(created)
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    id: RowId,
    post: &NewBlogPost,
) -> RepositoryResult<Row> {
    let changes = DbUpdateBlogPost::new(post, Utc::now().naive_utc());
    let updated = diesel::update(blog_posts::table.find(id.get()))
        .set(&changes)
        .returning(DbBlogPost::as_returning())
        .get_result::<DbBlogPost>(conn)?;
    into_row(updated)
}

pub(super) fn delete(conn: &mut SqliteConnection, id: RowId) -> RepositoryResult<usize> {
    Ok(diesel::delete(blog_posts::table.find(id.get())).execute(conn)?)
}
