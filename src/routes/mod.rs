//! JSON HTTP handlers mounted under `/api`.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::auth::{BearerToken, JwtDecoder};
use crate::domain::user::User;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, user as user_service};

pub mod admin;
pub mod products;
pub mod reviews;
pub mod users;

pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        ServiceError::Forbidden => StatusCode::FORBIDDEN,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Query(_) | ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            StatusCode::BAD_REQUEST
        }
        ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a service failure as `{"error": "..."}`.
pub fn error_response(err: ServiceError) -> HttpResponse {
    let status = status_for(&err);
    let message = if status.is_server_error() {
        "internal server error".to_string()
    } else {
        err.to_string()
    };
    HttpResponse::build(status).json(json!({ "error": message }))
}

/// Rejects malformed JSON bodies with the same error shape as the handlers.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let response =
            HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

/// Resolves the bearer token to a stored user.
pub(crate) fn current_user(
    repo: &DieselRepository,
    decoder: &JwtDecoder,
    token: &BearerToken,
) -> Result<User, HttpResponse> {
    user_service::authenticate(repo, decoder, token.as_str()).map_err(error_response)
}

/// Registers every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(products::list_products)
            .service(products::search_products)
            .service(products::find_product_by_id)
            .service(admin::create_product)
            .service(admin::list_all_products)
            .service(admin::update_product)
            .service(admin::delete_product)
            .service(reviews::create_review)
            .service(reviews::list_product_reviews)
            .service(users::user_profile),
    );
}
