//! Console endpoints mounted under `/api/v1/admin`. Every handler requires a
//! session; the services check the console role.

use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::row::RowKind;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::listing::{ListingParams, list_rows};
use crate::services::rows::{create_row, delete_row, get_row, update_row};

#[derive(Deserialize)]
struct DeleteParams {
    #[serde(default)]
    confirm: bool,
}

fn parse_kind(kind: &str) -> Result<RowKind, HttpResponse> {
    kind.parse::<RowKind>()
        .map_err(|err| error_response(&ServiceError::Form(err.to_string())))
}

/// Runs a blocking service call on the worker pool and renders its outcome.
async fn respond<T, O, F>(ok: O, call: F) -> HttpResponse
where
    T: Send + 'static,
    O: FnOnce(T) -> HttpResponse,
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
{
    match web::block(call).await {
        Ok(Ok(value)) => ok(value),
        Ok(Err(err)) => error_response(&err),
        Err(err) => {
            log::error!("Console task failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/{kind}")]
pub async fn admin_list(
    kind: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let params = match ListingParams::from_query(&query) {
        Ok(params) => params,
        Err(err) => return error_response(&err),
    };
    let page_size = server_config.page_size;

    respond(
        |page| HttpResponse::Ok().json(page),
        move || list_rows(repo.get_ref(), &user, kind, &params, page_size),
    )
    .await
}

#[get("/{kind}/{id}")]
pub async fn admin_show(
    path: web::Path<(String, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (kind, id) = path.into_inner();
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    respond(
        |row| HttpResponse::Ok().json(row),
        move || get_row(repo.get_ref(), &user, kind, id),
    )
    .await
}

#[post("/{kind}")]
pub async fn admin_create(
    kind: web::Path<String>,
    payload: web::Json<Value>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let payload = payload.into_inner();

    respond(
        |row| HttpResponse::Created().json(row),
        move || create_row(repo.get_ref(), &user, kind, payload),
    )
    .await
}

#[put("/{kind}/{id}")]
pub async fn admin_update(
    path: web::Path<(String, i32)>,
    payload: web::Json<Value>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (kind, id) = path.into_inner();
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let payload = payload.into_inner();

    respond(
        |row| HttpResponse::Ok().json(row),
        move || update_row(repo.get_ref(), &user, kind, id, payload),
    )
    .await
}

#[delete("/{kind}/{id}")]
pub async fn admin_delete(
    path: web::Path<(String, i32)>,
    params: web::Query<DeleteParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (kind, id) = path.into_inner();
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let confirmed = params.confirm;

    respond(
        |()| HttpResponse::NoContent().finish(),
        move || delete_row(repo.get_ref(), &user, kind, id, confirmed),
    )
    .await
}
