use actix_web::{HttpResponse, Responder, get, web};

use crate::auth::{BearerToken, JwtDecoder};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::user as user_service;

#[get("/users/profile")]
/// Profile of the user the bearer token was issued to.
pub async fn user_profile(
    token: BearerToken,
    repo: web::Data<DieselRepository>,
    decoder: web::Data<JwtDecoder>,
) -> impl Responder {
    match user_service::find_user_profile_by_jwt(repo.get_ref(), decoder.get_ref(), token.as_str())
    {
        Ok(profile) => HttpResponse::Accepted().json(profile),
        Err(err) => error_response(err),
    }
}
