//! HTTP handlers. Each one decodes the request, calls a service and maps the
//! outcome onto a JSON response.

use actix_web::body::EitherBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::HttpResponse;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use serde_json::json;

use crate::services::ServiceError;

pub mod admin;
pub mod api;

/// Where signed-out console users are sent.
pub const SIGNIN_PATH: &str = "/auth/signin";

/// Maps a service failure onto an HTTP response.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let status = match err {
        // Signed in but without the console role; a missing session is a 401
        // from the extractor instead.
        ServiceError::Unauthorized => StatusCode::FORBIDDEN,
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::Form(_) | ServiceError::Listing(_) => StatusCode::BAD_REQUEST,
        ServiceError::ConfirmationRequired => StatusCode::PRECONDITION_REQUIRED,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match err {
        ServiceError::Repository(_) => "internal error".to_string(),
        other => other.to_string(),
    };
    HttpResponse::build(status).json(json!({ "error": message }))
}

fn signin_redirect<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, _) = res.into_parts();
    let response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, SIGNIN_PATH))
        .finish();
    let res: ServiceResponse<EitherBody<B>> =
        ServiceResponse::new(req, response).map_into_right_body();
    Ok(ErrorHandlerResponse::Response(res))
}

/// Turns every `401 Unauthorized` of the wrapped scope into a redirect to
/// the sign-in page.
pub fn redirect_unauthorized<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::UNAUTHORIZED, signin_redirect)
}
