//! Create, read, update and delete of single rows from the console.

use serde_json::Value;

use crate::domain::row::{NewRow, Row, RowKind};
use crate::domain::types::RowId;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{RowReader, RowWriter};
use crate::services::{ServiceError, ServiceResult, ensure_site_admin};

fn row_id(id: i32) -> ServiceResult<RowId> {
    RowId::new(id).map_err(|_| ServiceError::NotFound)
}

fn decode(kind: RowKind, payload: Value) -> ServiceResult<NewRow> {
    NewRow::from_json(kind, payload).map_err(|err| ServiceError::Form(err.to_string()))
}

pub fn get_row<R>(repo: &R, user: &AuthenticatedUser, kind: RowKind, id: i32) -> ServiceResult<Row>
where
    R: RowReader + ?Sized,
{
    ensure_site_admin(user)?;
    let id = row_id(id)?;
    repo.get_row(kind, id)
        .map_err(|err| {
            log::error!("Failed to load {kind} {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

/// Validates `payload` as a row of `kind` and stores it.
pub fn create_row<R>(
    repo: &R,
    user: &AuthenticatedUser,
    kind: RowKind,
    payload: Value,
) -> ServiceResult<Row>
where
    R: RowWriter + ?Sized,
{
    ensure_site_admin(user)?;
    let row = decode(kind, payload)?;
    repo.create_row(&row).map_err(|err| {
        log::error!("Failed to create {kind}: {err}");
        ServiceError::from(err)
    })
}

/// Replaces row `id` of `kind` with the validated `payload`.
pub fn update_row<R>(
    repo: &R,
    user: &AuthenticatedUser,
    kind: RowKind,
    id: i32,
    payload: Value,
) -> ServiceResult<Row>
where
    R: RowWriter + ?Sized,
{
    ensure_site_admin(user)?;
    let id = row_id(id)?;
    let row = decode(kind, payload)?;
    repo.update_row(id, &row).map_err(|err| {
        log::error!("Failed to update {kind} {id}: {err}");
        ServiceError::from(err)
    })
}

/// Deletes row `id` of `kind`. Nothing happens unless `confirmed` is set.
pub fn delete_row<R>(
    repo: &R,
    user: &AuthenticatedUser,
    kind: RowKind,
    id: i32,
    confirmed: bool,
) -> ServiceResult<()>
where
    R: RowWriter + ?Sized,
{
    ensure_site_admin(user)?;
    let id = row_id(id)?;
    if !confirmed {
        return Err(ServiceError::ConfirmationRequired);
    }
    repo.delete_row(kind, id).map_err(|err| {
        log::error!("Failed to delete {kind} {id}: {err}");
        ServiceError::from(err)
    })?;
    log::info!("Deleted {kind} {id}");
    Ok(())
}
