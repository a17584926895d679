use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::{BearerToken, JwtDecoder};
use crate::forms::review::ReviewForm;
use crate::repository::DieselRepository;
use crate::routes::{current_user, error_response};
use crate::services::review as review_service;

#[post("/reviews/create")]
pub async fn create_review(
    token: BearerToken,
    repo: web::Data<DieselRepository>,
    decoder: web::Data<JwtDecoder>,
    form: web::Json<ReviewForm>,
) -> impl Responder {
    let user = match current_user(&repo, &decoder, &token) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match review_service::create_review(repo.get_ref(), &user, form.into_inner()) {
        Ok(review) => HttpResponse::Created().json(review),
        Err(err) => error_response(err),
    }
}

#[get("/reviews/product/{product_id}")]
pub async fn list_product_reviews(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match review_service::list_product_reviews(repo.get_ref(), path.into_inner()) {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => error_response(err),
    }
}
