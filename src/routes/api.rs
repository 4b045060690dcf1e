use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, get, web};

use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::listing::{ListingParams, blog_index};

/// Public blog index with the featured post pinned on page 1.
#[get("/v1/blog")]
pub async fn api_v1_blog(
    query: web::Query<HashMap<String, String>>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let params = match ListingParams::from_query(&query) {
        Ok(params) => params,
        Err(err) => return error_response(&err),
    };
    let page_size = server_config.page_size;

    let result = web::block(move || blog_index(repo.get_ref(), &params, page_size)).await;
    match result {
        Ok(Ok(index)) => HttpResponse::Ok().json(index),
        Ok(Err(err)) => error_response(&err),
        Err(err) => {
            log::error!("Blog index task failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
