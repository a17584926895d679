//! Product administration, restricted to admin users.

use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::auth::{BearerToken, JwtDecoder};
use crate::forms::product::ProductForm;
use crate::repository::DieselRepository;
use crate::routes::{current_user, error_response};
use crate::services::product as product_service;

#[post("/admin/products/")]
pub async fn create_product(
    token: BearerToken,
    repo: web::Data<DieselRepository>,
    decoder: web::Data<JwtDecoder>,
    form: web::Json<ProductForm>,
) -> impl Responder {
    let user = match current_user(&repo, &decoder, &token) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match product_service::create_product(repo.get_ref(), &user, form.into_inner()) {
        Ok(product) => HttpResponse::Accepted().json(product),
        Err(err) => error_response(err),
    }
}

#[get("/admin/products/all")]
pub async fn list_all_products(
    token: BearerToken,
    repo: web::Data<DieselRepository>,
    decoder: web::Data<JwtDecoder>,
) -> impl Responder {
    let user = match current_user(&repo, &decoder, &token) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match product_service::list_all_products(repo.get_ref(), &user) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(err),
    }
}

#[put("/admin/products/{id}/update")]
pub async fn update_product(
    path: web::Path<i32>,
    token: BearerToken,
    repo: web::Data<DieselRepository>,
    decoder: web::Data<JwtDecoder>,
    form: web::Json<ProductForm>,
) -> impl Responder {
    let user = match current_user(&repo, &decoder, &token) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match product_service::update_product(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.into_inner(),
    ) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err),
    }
}

#[delete("/admin/products/{id}/delete")]
pub async fn delete_product(
    path: web::Path<i32>,
    token: BearerToken,
    repo: web::Data<DieselRepository>,
    decoder: web::Data<JwtDecoder>,
) -> impl Responder {
    let user = match current_user(&repo, &decoder, &token) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match product_service::delete_product(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(json!({
            "message": "product deleted successfully",
            "status": true
        })),
        Err(err) => error_response(err),
    }
}
